//! Board-agnostic core of the bitswitch firmware.
//!
//! The device listens to its UART: each time the line `"1"` is received, the LED state flips and the
//! pixel in the middle of the 5×5 display follows it. Anything else is ignored. A line that cannot be
//! read or decoded shows the [`Image::NO`] glyph for a second.
//!
//! Nothing here depends on a board: [`Device`] takes bytes from anywhere, and [`DeviceLoop`] runs it
//! over any `embedded-io` UART, any `embedded-hal` delay and any [`Display`].

#![cfg_attr(not(test), no_std)]

mod command;
mod device_loop;
mod image;
mod led;
mod line;
mod receiver;

pub use command::*;
pub use device_loop::*;
pub use image::*;
pub use led::*;
pub use line::*;
pub use receiver::*;
