#![doc(html_root_url = "https://docs.rs/bitswitch/0.1.0")]

//! <h1 align="center">BITSWITCH - Toggle a micro:bit LED from your computer</h1>
//!
//! # Features
//!
//! **BitSwitch** remotely toggles the LED drawn in the middle of a BBC micro:bit display.<br/>
//! The board runs the `bitswitch-firmware` binary: it listens to its USB serial port and flips the
//! LED each time it receives the `"1\n"` command.
//!
//! - Find the board among the serial ports of the system ([`discover_port`](io::discover_port))
//! - Open and own the connection to it ([`Controller`](hardware::Controller))
//! - Send it the toggle command, from a prompt ([`Shell`](ui::cli::Shell)) or a window (`gui` feature)
//!
//! The board never answers: a status only tells if the command could be written.
//!
//! # Getting Started
//!
//! ```no_run
//! use bitswitch::hardware::Controller;
//!
//! fn main() -> Result<(), bitswitch::errors::Error> {
//!     // Finds the first port described as a "micro:bit" and connects to it.
//!     let mut controller = Controller::default();
//!     controller.connect()?;
//!
//!     // Toggles the LED.
//!     controller.send_toggle()?;
//!     Ok(())
//! }
//! ```
//!
//! # Feature flags
//!
//! - **libudev** -- (enabled by default) Activates `serialport` crate _libudev_ feature under-the-hood (required on Linux for USB port descriptions).
//! - **serde** -- Enables serialize/deserialize capabilities for settings and port descriptors.
//! - **gui** -- Builds the `bitswitch-gui` graphical front end.
//! - **mocks** -- Provides mocked ports and transports (useful for tests mostly).

pub mod config;
pub mod errors;
pub mod hardware;
pub mod io;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod ui;
pub mod utils;
