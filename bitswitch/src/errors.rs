use log::error;
use snafu::Snafu;

pub use crate::errors::Error::*;
use crate::errors::ProtocolError::IoException;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// No {target} found
    DeviceNotFound { target: String },
    /// Not connected to {target}
    NotConnected { target: String },
    /// Unknown command: '{input}'
    UnknownCommand { input: String },
    /// Protocol error: {source}.
    ProtocolError { source: ProtocolError },
    /// Unknown error: {info}.
    Unknown { info: String },
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        error!("std::io error {:?}", error);
        let info = match error.kind() {
            std::io::ErrorKind::NotFound => String::from("Device not found or already in use"),
            std::io::ErrorKind::PermissionDenied => String::from("Permission denied"),
            std::io::ErrorKind::BrokenPipe => String::from("Device connection lost"),
            _ => error.to_string(),
        };
        Self::ProtocolError {
            source: IoException { info },
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(value: ProtocolError) -> Self {
        Self::ProtocolError { source: value }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProtocolError {
    /// {info}
    IoException { info: String },
    /// Connection has not been initialized
    NotInitialized,
}
