//! Defines how the host talks to the device: port discovery and transport layers.

mod discovery;
mod transports;

pub use discovery::*;
pub use transports::*;
