use crate::config::Settings;
use crate::errors::{DeviceNotFound, Error, NotConnected};
use crate::io::{discover_port, IoTransport, PortDescriptor, PortProvider, SystemPorts};
use crate::pause_sync;
use log::{info, trace, warn};
use std::fmt::{Display, Formatter};

/// The only command the device understands: toggle the LED.
pub const TOGGLE_COMMAND: &[u8] = b"1\n";

/// Represents the host side of the link to a device: finds its port, owns the (single) connection
/// and sends it commands.
///
/// The device never answers: a successful [`Controller::send_toggle()`] only means the command was
/// written, not that the LED actually changed.
#[derive(Debug)]
pub struct Controller {
    /// Connection settings.
    settings: Settings,
    /// Where ports are listed and transports created.
    provider: Box<dyn PortProvider>,
    /// The currently opened connection (if any).
    connection: Option<Box<dyn IoTransport>>,
}

impl Default for Controller {
    /// Creates a controller for the serial ports of the system, using default [`Settings`].
    ///
    /// **_/!\ The controller will NOT be connected until the [`Controller::connect`] method is called._**
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Controller {
    /// Creates a controller for the serial ports of the system.
    pub fn new(settings: Settings) -> Self {
        Self::with_provider(settings, SystemPorts)
    }

    /// Creates a controller listing ports (and creating transports) with a custom provider.
    ///
    /// # Example
    /// ```
    /// use bitswitch::config::Settings;
    /// use bitswitch::hardware::Controller;
    /// use bitswitch::io::SystemPorts;
    ///
    /// let controller = Controller::with_provider(Settings::default(), SystemPorts);
    /// assert!(!controller.is_connected());
    /// ```
    pub fn with_provider<P: PortProvider + 'static>(settings: Settings, provider: P) -> Self {
        Self {
            settings,
            provider: Box::new(provider),
            connection: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Checks if a connection is currently opened.
    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|connection| connection.is_open())
    }

    /// Returns the port of the current connection.
    pub fn get_port(&self) -> Option<String> {
        self.connection
            .as_ref()
            .map(|connection| connection.get_port())
    }

    /// Finds the first attached port whose description matches the configured target.
    pub fn discover_port(&self) -> Option<PortDescriptor> {
        let port = discover_port(self.provider.scan(), self.settings.target());
        match &port {
            None => trace!("No port matches '{}'", self.settings.target()),
            Some(port) => trace!("Port matching '{}': {}", self.settings.target(), port),
        }
        port
    }

    /// Connects to the device: discovers its port, closes the previous connection and opens a new one.
    ///
    /// The call blocks during the settle delay: opening the port resets the device.
    ///
    /// # Returns
    /// * `Ok(port)` the port now connected.
    /// * `Err(DeviceNotFound)` if no port matches (any previous connection is closed).
    /// * `Err(_)` if the port could not be opened (no connection is kept).
    pub fn connect(&mut self) -> Result<String, Error> {
        let port = match self.discover_port() {
            Some(port) => port,
            None => {
                self.disconnect();
                return Err(DeviceNotFound {
                    target: self.settings.target().to_string(),
                });
            }
        };

        self.disconnect();

        let mut connection = self.provider.transport(&port.device, &self.settings);
        if let Err(error) = connection.open() {
            warn!("Failed to open {}: {}", port.device, error);
            return Err(error);
        }
        pause_sync!(self.settings.settle_delay().as_millis());

        info!("Connected to {} on {}", self.settings.target(), port.device);
        self.connection = Some(connection);
        Ok(port.device)
    }

    /// Sends the toggle command to the device.
    ///
    /// # Errors
    /// * `NotConnected` if [`Controller::connect`] did not succeed before (nothing is written).
    /// * Any transport error: the connection is kept as is, no reconnection is attempted.
    pub fn send_toggle(&mut self) -> Result<(), Error> {
        let connection = self.connection.as_mut().ok_or_else(|| NotConnected {
            target: self.settings.target().to_string(),
        })?;
        connection.write(TOGGLE_COMMAND)?;
        trace!("Toggle command sent to {}", connection.get_port());
        Ok(())
    }

    /// Closes the current connection (if any).
    pub fn disconnect(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            if let Err(error) = connection.close() {
                warn!("Failed to close {}: {}", connection, error);
            }
            trace!("Disconnected from {}", connection.get_port());
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl Display for Controller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.connection {
            None => write!(f, "Controller({}: not connected)", self.settings.target()),
            Some(connection) => write!(f, "Controller({}: {})", self.settings.target(), connection),
        }
    }
}
