use crate::errors::Error;
use crate::errors::ProtocolError::NotInitialized;
use crate::io::IoTransport;
use parking_lot::Mutex;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// What happened on the mocked wire, shared by all transports created from a same [`MockLink`].
#[derive(Clone, Debug, Default)]
pub struct MockLinkState {
    /// Number of successful `open()` calls.
    pub opened: usize,
    /// Number of transports currently opened.
    pub open_handles: usize,
    /// All bytes written so far.
    pub written: Vec<u8>,
    /// Makes `open()` fail.
    pub fail_open: bool,
    /// Makes `write()` fail.
    pub fail_write: bool,
}

#[derive(Clone, Debug, Default)]
pub struct MockLink {
    state: Arc<Mutex<MockLinkState>>,
}

impl MockLink {
    /// Returns a copy of the current state.
    pub fn state(&self) -> MockLinkState {
        self.state.lock().clone()
    }

    pub fn set_fail_open(&self, fail: bool) {
        self.state.lock().fail_open = fail;
    }

    pub fn set_fail_write(&self, fail: bool) {
        self.state.lock().fail_write = fail;
    }
}

#[derive(Debug)]
pub struct MockTransportLayer {
    pub port: String,
    pub connected: bool,
    pub link: MockLink,
}

impl MockTransportLayer {
    pub fn new<P: Into<String>>(port: P, link: MockLink) -> Self {
        Self {
            port: port.into(),
            connected: false,
            link,
        }
    }
}

impl Display for MockTransportLayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockTransportLayer({})", self.port)
    }
}

impl IoTransport for MockTransportLayer {
    fn open(&mut self) -> Result<(), Error> {
        let mut state = self.link.state.lock();
        if state.fail_open {
            return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into());
        }
        state.opened += 1;
        state.open_handles += 1;
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        if self.connected {
            self.link.state.lock().open_handles -= 1;
        }
        self.connected = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.connected
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        if !self.connected {
            return Err(NotInitialized.into());
        }
        let mut state = self.link.state.lock();
        if state.fail_write {
            return Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe).into());
        }
        state.written.extend_from_slice(buf);
        Ok(())
    }

    fn get_port(&self) -> String {
        self.port.clone()
    }
}
