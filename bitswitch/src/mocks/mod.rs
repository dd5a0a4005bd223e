//! Mocked entities: useful to test code relying on a controller without any device attached.

pub mod ports;
pub mod serial_port;
pub mod transport_layer;
