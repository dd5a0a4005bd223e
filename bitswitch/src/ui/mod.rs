//! Defines the front ends: an interactive prompt and (with the `gui` feature) a small window.

pub mod cli;
#[cfg(feature = "gui")]
pub mod gui;
mod status;

pub use status::*;
