//! Defines the host side controller of a remote device.

mod controller;

pub use controller::Controller;
pub use controller::TOGGLE_COMMAND;
