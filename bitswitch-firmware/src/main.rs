//! bitswitch firmware for the BBC micro:bit v2.
//!
//! Listens to the USB serial bridge (UARTE0, 115200 8N1): every `"1"` line toggles the middle pixel
//! of the display.

#![no_std]
#![no_main]

mod matrix;

use bitswitch_device::{Device, Reaction, ERROR_DISPLAY_MS};
use defmt::{info, trace, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::buffered_uarte::{self, BufferedUarte};
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::{bind_interrupts, peripherals, uarte};
use embassy_time::Timer;
use embedded_io_async::Read;
use matrix::Matrix;
use {defmt_rtt as _, panic_probe as _};

/// Size of the UART receive ring buffer: bytes keep coming in while the error glyph is shown.
const RX_BUF_SIZE: usize = 256;
/// Size of the chunks read from the ring buffer.
const CHUNK_SIZE: usize = 32;

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => buffered_uarte::InterruptHandler<peripherals::UARTE0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    let rows = [
        Output::new(p.P0_21, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_22, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_24, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_19, Level::Low, OutputDrive::Standard),
    ];
    let cols = [
        Output::new(p.P0_28, Level::High, OutputDrive::Standard),
        Output::new(p.P0_11, Level::High, OutputDrive::Standard),
        Output::new(p.P0_31, Level::High, OutputDrive::Standard),
        Output::new(p.P1_05, Level::High, OutputDrive::Standard),
        Output::new(p.P0_30, Level::High, OutputDrive::Standard),
    ];
    unwrap!(spawner.spawn(matrix::scan(rows, cols)));

    let mut config = uarte::Config::default();
    config.parity = uarte::Parity::EXCLUDED;
    config.baudrate = uarte::Baudrate::BAUD115200;
    let mut rx_buffer = [0u8; RX_BUF_SIZE];
    let mut tx_buffer = [0u8; 16];
    // RX on P1_08, TX on P0_06: the interface chip side of the USB bridge.
    let mut uart = BufferedUarte::new(
        p.UARTE0,
        p.TIMER0,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        Irqs,
        p.P1_08,
        p.P0_06,
        config,
        &mut rx_buffer,
        &mut tx_buffer,
    );

    let mut device: Device<Matrix> = Device::new(Matrix);
    info!("bitswitch ready");

    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let count = match uart.read(&mut chunk).await {
            Ok(count) => count,
            Err(_) => {
                warn!("UART read failed");
                device.read_failed();
                Timer::after_millis(ERROR_DISPLAY_MS as u64).await;
                device.recover();
                continue;
            }
        };
        trace!("RX: {} bytes", count);

        for &byte in &chunk[..count] {
            match device.feed(byte) {
                Some(Reaction::Toggled(state)) => info!("LED {}", state),
                Some(Reaction::Failed(error)) => {
                    warn!("Line rejected: {}", error);
                    Timer::after_millis(ERROR_DISPLAY_MS as u64).await;
                    device.recover();
                }
                Some(Reaction::Ignored) | None => {}
            }
        }
    }
}
