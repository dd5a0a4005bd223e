use crate::errors::Error;
use private::TraitToAny;
use std::fmt::{Debug, Display};

pub mod serial;

pub use serial::Serial;

pub(crate) mod private {
    use std::any::Any;

    pub trait TraitToAny: 'static {
        fn as_any(&self) -> &dyn Any;
    }

    impl<T: 'static> TraitToAny for T {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }
}

/// Defines a communication channel to exactly one device port.
pub trait IoTransport: Debug + Display + Send + Sync + TraitToAny {
    /// Opens communication (in a blocking way) using the transport layer.
    ///
    /// # Notes
    ///  The method is sync and may block until the connection is established.
    fn open(&mut self) -> Result<(), Error>;

    /// Gracefully shuts down the transport layer.
    fn close(&mut self) -> Result<(), Error>;

    /// Checks if the transport layer is currently opened.
    fn is_open(&self) -> bool;

    /// Write all bytes to the internal connection. For more details see [`std::io::Write::write_all`].
    ///
    /// # Notes
    /// This function blocks until the write operation is complete.
    fn write(&mut self, buf: &[u8]) -> Result<(), Error>;

    /// Returns the port this transport talks to.
    fn get_port(&self) -> String;
}
