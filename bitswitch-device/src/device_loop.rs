use crate::image::Image;
use crate::line::{DecodeError, LineBuffer, LINE_CAPACITY};
use crate::receiver::{Reaction, Receiver};
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady};

/// How long the error glyph stays on the display.
pub const ERROR_DISPLAY_MS: u32 = 1000;

/// Size of the chunks read from the UART at each iteration.
const CHUNK_SIZE: usize = 16;

/// Something able to render an [`Image`]: the LED matrix of a board, or anything else.
pub trait Display {
    fn show(&mut self, image: &Image);
}

/// The device state machine, independent of how bytes are received and how time passes.
///
/// Received bytes are assembled into lines and applied to a [`Receiver`]; the [`Display`] follows.
/// When a [`Reaction::Failed`] is returned, the [`Image::NO`] glyph is on display: the caller waits
/// [`ERROR_DISPLAY_MS`] then calls [`Device::recover`].
#[derive(Debug)]
pub struct Device<D, const N: usize = LINE_CAPACITY> {
    display: D,
    receiver: Receiver,
    line: LineBuffer<N>,
}

impl<D: Display, const N: usize> Device<D, N> {
    /// Creates the device: the display is cleared and the LED is off.
    pub fn new(mut display: D) -> Self {
        let receiver = Receiver::new();
        display.show(receiver.image());
        Self {
            display,
            receiver,
            line: LineBuffer::new(),
        }
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    /// Feeds one received byte.
    ///
    /// # Returns
    /// The reaction to the line this byte terminates (if any).
    pub fn feed(&mut self, byte: u8) -> Option<Reaction> {
        let reaction = match self.line.push(byte)? {
            Ok(line) => self.receiver.handle_line(&line),
            Err(error) => Reaction::Failed(error),
        };
        Some(self.react(reaction))
    }

    /// Reports a UART failure: the pending bytes are dropped.
    pub fn read_failed(&mut self) -> Reaction {
        self.line.reset();
        self.react(Reaction::Failed(DecodeError::Read))
    }

    /// Clears the display once the error glyph has been shown long enough. The LED state is kept.
    pub fn recover(&mut self) {
        self.receiver.clear_image();
        self.display.show(self.receiver.image());
    }

    fn react(&mut self, reaction: Reaction) -> Reaction {
        match reaction {
            Reaction::Toggled(_) => self.display.show(self.receiver.image()),
            Reaction::Ignored => {}
            Reaction::Failed(_) => self.display.show(&Image::NO),
        }
        reaction
    }
}

/// A blocking main loop: polls the UART, feeds a [`Device`] and holds the error glyph with a delay.
///
/// # Example
/// ```ignore
/// let mut device = DeviceLoop::new(uart, matrix, delay);
/// device.run();
/// ```
pub struct DeviceLoop<U, D, T, const N: usize = LINE_CAPACITY> {
    uart: U,
    delay: T,
    device: Device<D, N>,
}

impl<U, D, T, const N: usize> DeviceLoop<U, D, T, N>
where
    U: Read + ReadReady,
    D: Display,
    T: DelayNs,
{
    pub fn new(uart: U, display: D, delay: T) -> Self {
        Self {
            uart,
            delay,
            device: Device::new(display),
        }
    }

    pub fn receiver(&self) -> &Receiver {
        self.device.receiver()
    }

    /// Runs forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Runs one iteration: does nothing if no byte is waiting on the UART.
    ///
    /// # Returns
    /// The reaction to the last line completed during this iteration (if any).
    pub fn poll(&mut self) -> Option<Reaction> {
        match self.uart.read_ready() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(_) => return Some(self.read_failed()),
        }

        let mut chunk = [0u8; CHUNK_SIZE];
        let count = match self.uart.read(&mut chunk) {
            Ok(count) => count,
            Err(_) => return Some(self.read_failed()),
        };

        let mut last = None;
        for &byte in &chunk[..count] {
            if let Some(reaction) = self.device.feed(byte) {
                if let Reaction::Failed(_) = reaction {
                    self.hold_error();
                }
                last = Some(reaction);
            }
        }
        last
    }

    fn read_failed(&mut self) -> Reaction {
        let reaction = self.device.read_failed();
        self.hold_error();
        reaction
    }

    fn hold_error(&mut self) {
        self.delay.delay_ms(ERROR_DISPLAY_MS);
        self.device.recover();
    }
}
