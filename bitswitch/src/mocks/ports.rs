use crate::config::Settings;
use crate::errors::{Error, Unknown};
use crate::io::{IoTransport, PortDescriptor, PortProvider};
use crate::mocks::transport_layer::{MockLink, MockTransportLayer};

/// A fake set of attached ports: transports created from it are [`MockTransportLayer`] sharing the same [`MockLink`].
#[derive(Clone, Debug, Default)]
pub struct MockPorts {
    pub ports: Vec<PortDescriptor>,
    pub fail_enumeration: bool,
    pub link: MockLink,
}

impl MockPorts {
    pub fn new(ports: Vec<PortDescriptor>) -> Self {
        Self {
            ports,
            ..Default::default()
        }
    }

    /// A single micro:bit attached next to an unrelated board.
    pub fn with_microbit() -> Self {
        Self::new(vec![
            PortDescriptor::new("COM3", "Arduino Uno"),
            PortDescriptor::new("COM5", "BBC micro:bit CMSIS-DAP"),
        ])
    }

    pub fn failing_enumeration() -> Self {
        Self {
            fail_enumeration: true,
            ..Default::default()
        }
    }
}

impl PortProvider for MockPorts {
    fn available_ports(&self) -> Result<Vec<PortDescriptor>, Error> {
        match self.fail_enumeration {
            true => Err(Unknown {
                info: String::from("Mock enumeration failure"),
            }),
            false => Ok(self.ports.clone()),
        }
    }

    fn transport(&self, port: &str, _: &Settings) -> Box<dyn IoTransport> {
        Box::new(MockTransportLayer::new(port, self.link.clone()))
    }
}
