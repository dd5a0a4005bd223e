use crate::config::Settings;
use crate::errors::Error;
use crate::io::{IoTransport, Serial};
use log::{debug, warn};
use serialport::{SerialPortInfo, SerialPortType};
use std::fmt::{Debug, Display, Formatter};

/// Description used when the platform gives no human-readable information about a port.
const NO_DESCRIPTION: &str = "n/a";

/// A serial port as enumerated by the operating system.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortDescriptor {
    /// The device path (`/dev/ttyACM0`, `COM5`, ...).
    pub device: String,
    /// The human-readable description given by the driver.
    pub description: String,
}

impl PortDescriptor {
    pub fn new<D: Into<String>, S: Into<String>>(device: D, description: S) -> Self {
        Self {
            device: device.into(),
            description: description.into(),
        }
    }

    /// Checks (case-insensitively) if the description contains the `target`.
    pub fn matches(&self, target: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&target.to_lowercase())
    }
}

impl Display for PortDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.device, self.description)
    }
}

impl From<SerialPortInfo> for PortDescriptor {
    fn from(info: SerialPortInfo) -> Self {
        let description = match info.port_type {
            SerialPortType::UsbPort(usb) => usb.product.or(usb.manufacturer),
            _ => None,
        };
        Self {
            device: info.port_name,
            description: description.unwrap_or_else(|| String::from(NO_DESCRIPTION)),
        }
    }
}

/// Returns the first port (in enumeration order) whose description contains the `target`.
///
/// # Example
/// ```
/// use bitswitch::io::{discover_port, PortDescriptor};
///
/// let ports = vec![
///     PortDescriptor::new("COM3", "Arduino Uno"),
///     PortDescriptor::new("COM5", "BBC micro:bit CMSIS-DAP"),
/// ];
/// let port = discover_port(ports, "micro:bit").unwrap();
/// assert_eq!(port.device, "COM5");
/// ```
pub fn discover_port<I>(ports: I, target: &str) -> Option<PortDescriptor>
where
    I: IntoIterator<Item = PortDescriptor>,
{
    ports.into_iter().find(|port| port.matches(target))
}

/// Gives access to the ports a controller may connect to.
pub trait PortProvider: Debug + Send + Sync {
    /// Lists the ports currently attached.
    fn available_ports(&self) -> Result<Vec<PortDescriptor>, Error>;

    /// Creates a (not yet opened) transport layer for the given port.
    fn transport(&self, port: &str, settings: &Settings) -> Box<dyn IoTransport>;

    /// Lists the ports currently attached: an enumeration failure counts as no port at all.
    fn scan(&self) -> Vec<PortDescriptor> {
        match self.available_ports() {
            Ok(ports) => {
                debug!("Available ports: {:?}", ports);
                ports
            }
            Err(error) => {
                warn!("Serial ports enumeration failed: {}", error);
                vec![]
            }
        }
    }
}

/// The serial ports exposed by the operating system.
#[derive(Clone, Debug, Default)]
pub struct SystemPorts;

impl PortProvider for SystemPorts {
    fn available_ports(&self) -> Result<Vec<PortDescriptor>, Error> {
        let ports = serialport::available_ports()?;
        Ok(ports.into_iter().map(PortDescriptor::from).collect())
    }

    fn transport(&self, port: &str, settings: &Settings) -> Box<dyn IoTransport> {
        Box::new(Serial::with_settings(port, settings))
    }
}
