//! The 5×5 LED matrix of the micro:bit v2.
//!
//! Rows are driven high and columns low to light a pixel. The scan task lights one row at a time,
//! reading the frame last given to [`Matrix::show`].

use bitswitch_device::{Display, Image};
use core::cell::Cell;
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Timer;

/// How long each row stays lit: a full frame is scanned at 100Hz.
const ROW_TIME_US: u64 = 2_000;

static FRAME: Mutex<CriticalSectionRawMutex, Cell<Image>> = Mutex::new(Cell::new(Image::BLANK));

/// Handle on the frame shown by the [`scan`] task.
pub struct Matrix;

impl Display for Matrix {
    fn show(&mut self, image: &Image) {
        FRAME.lock(|frame| frame.set(*image));
    }
}

/// Multiplexes the matrix forever. Any non-zero brightness lights the pixel.
#[embassy_executor::task]
pub async fn scan(mut rows: [Output<'static>; 5], mut cols: [Output<'static>; 5]) {
    loop {
        let image = FRAME.lock(|frame| frame.get());
        for (row, pixels) in rows.iter_mut().zip(image.rows()) {
            for (col, &value) in cols.iter_mut().zip(pixels) {
                match value {
                    0 => col.set_high(),
                    _ => col.set_low(),
                }
            }
            row.set_high();
            Timer::after_micros(ROW_TIME_US).await;
            row.set_low();
        }
    }
}
