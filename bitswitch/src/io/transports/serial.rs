use crate::config::Settings;
use crate::errors::Error;
use crate::errors::ProtocolError::NotInitialized;
use crate::io::IoTransport;
use log::trace;
use parking_lot::Mutex;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::time::Duration;

/// Serial (UART over USB) transport layer.
#[derive(Debug)]
pub struct Serial {
    /// The connection port.
    port: String,
    /// The connection speed.
    baud_rate: u32,
    /// The read timeout.
    timeout: Duration,
    /// A Read/Write io object.
    io: Mutex<Option<Box<dyn SerialPort>>>,
}

impl Serial {
    /// Constructs a new `Serial` transport layer instance for communication through the specified port.
    ///
    /// The connection is not opened until [`IoTransport::open`] is called.
    ///
    /// # Example
    /// ```
    /// use bitswitch::io::{IoTransport, Serial};
    ///
    /// let transport = Serial::new("/dev/ttyACM0");
    /// assert!(!transport.is_open());
    /// ```
    pub fn new<P: Into<String>>(port: P) -> Self {
        Self::with_settings(port, &Settings::default())
    }

    /// Constructs a new `Serial` transport layer using the speed and timeout of the given settings.
    pub fn with_settings<P: Into<String>>(port: P, settings: &Settings) -> Self {
        Self {
            port: port.into(),
            baud_rate: settings.baud_rate(),
            timeout: settings.timeout(),
            io: Mutex::new(None),
        }
    }

    /// Retrieves the configured speed.
    pub fn get_baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Retrieves the read timeout applied when the port is opened.
    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }
}

impl Display for Serial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Serial({})", self.port)
    }
}

impl IoTransport for Serial {
    fn open(&mut self) -> Result<(), Error> {
        let connexion = serialport::new(self.port.clone(), self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.timeout)
            .open()?;
        trace!("Serial port is now opened: {:?}", connexion);

        *self.io.lock() = Some(connexion);

        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        // Dropping the native port releases the handle.
        if self.io.lock().take().is_some() {
            trace!("Serial port is now closed: {}", self.port);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.io.lock().is_some()
    }

    /// Write bytes to the internal connection. For more details see [`std::io::Write::write_all`].
    ///
    /// # Arguments
    /// * `buf` - The data to write.
    ///
    /// # Returns
    /// * `Ok(())` if all bytes were successfully written.
    /// * `Err(Error)` if there was an issue writing data.
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        let mut lock = self.io.lock();
        let io = lock.as_mut().ok_or(NotInitialized)?;
        io.write_all(buf)?;
        io.flush()?;
        trace!("Serial write to {}: {:?}", self.port, buf);
        Ok(())
    }

    fn get_port(&self) -> String {
        self.port.clone()
    }
}

impl From<serialport::Error> for Error {
    fn from(value: serialport::Error) -> Self {
        std::io::Error::from(value).into()
    }
}
