use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serialport::{
    ClearBuffer, DataBits, Error, ErrorKind, FlowControl, Parity, SerialPort, StopBits,
};

/// A native serial port stand-in: every call fails if built with an error kind, writes are recorded otherwise.
#[derive(Debug, Default, Clone)]
pub struct SerialPortMock {
    error: Option<Error>,
    written: Arc<Mutex<Vec<u8>>>,
}

impl SerialPortMock {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            error: Some(Error::new(kind, "Mock error reason")),
            written: Default::default(),
        }
    }

    /// Returns all bytes written so far (through this mock or any of its clones).
    pub fn written(&self) -> Vec<u8> {
        self.written.lock().clone()
    }

    fn answer<T>(&self, value: T) -> serialport::Result<T> {
        match &self.error {
            None => Ok(value),
            Some(error) => Err(error.clone()),
        }
    }

    fn io_answer<T>(&self, value: T) -> std::io::Result<T> {
        match self.error {
            None => Ok(value),
            Some(_) => Err(std::io::Error::from(std::io::ErrorKind::InvalidData)),
        }
    }
}

impl SerialPort for SerialPortMock {
    fn name(&self) -> Option<String> {
        Some(String::from("SerialPortMock"))
    }

    fn baud_rate(&self) -> serialport::Result<u32> {
        self.answer(115_200)
    }

    fn data_bits(&self) -> serialport::Result<DataBits> {
        self.answer(DataBits::Eight)
    }

    fn flow_control(&self) -> serialport::Result<FlowControl> {
        self.answer(FlowControl::None)
    }

    fn parity(&self) -> serialport::Result<Parity> {
        self.answer(Parity::None)
    }

    fn stop_bits(&self) -> serialport::Result<StopBits> {
        self.answer(StopBits::One)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn set_baud_rate(&mut self, _: u32) -> serialport::Result<()> {
        self.answer(())
    }

    fn set_data_bits(&mut self, _: DataBits) -> serialport::Result<()> {
        self.answer(())
    }

    fn set_flow_control(&mut self, _: FlowControl) -> serialport::Result<()> {
        self.answer(())
    }

    fn set_parity(&mut self, _: Parity) -> serialport::Result<()> {
        self.answer(())
    }

    fn set_stop_bits(&mut self, _: StopBits) -> serialport::Result<()> {
        self.answer(())
    }

    fn set_timeout(&mut self, _: Duration) -> serialport::Result<()> {
        self.answer(())
    }

    fn write_request_to_send(&mut self, _: bool) -> serialport::Result<()> {
        self.answer(())
    }

    fn write_data_terminal_ready(&mut self, _: bool) -> serialport::Result<()> {
        self.answer(())
    }

    fn read_clear_to_send(&mut self) -> serialport::Result<bool> {
        self.answer(true)
    }

    fn read_data_set_ready(&mut self) -> serialport::Result<bool> {
        self.answer(true)
    }

    fn read_ring_indicator(&mut self) -> serialport::Result<bool> {
        self.answer(true)
    }

    fn read_carrier_detect(&mut self) -> serialport::Result<bool> {
        self.answer(true)
    }

    fn bytes_to_read(&self) -> serialport::Result<u32> {
        self.answer(0)
    }

    fn bytes_to_write(&self) -> serialport::Result<u32> {
        self.answer(0)
    }

    fn clear(&self, _: ClearBuffer) -> serialport::Result<()> {
        self.answer(())
    }

    fn try_clone(&self) -> serialport::Result<Box<dyn SerialPort>> {
        self.answer(Box::new(self.clone()) as Box<dyn SerialPort>)
    }

    fn set_break(&self) -> serialport::Result<()> {
        self.answer(())
    }

    fn clear_break(&self) -> serialport::Result<()> {
        self.answer(())
    }
}

impl Read for SerialPortMock {
    fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
        // The device never answers.
        self.io_answer(0)
    }
}

impl Write for SerialPortMock {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = self.io_answer(buf.len())?;
        self.written.lock().extend_from_slice(buf);
        Ok(len)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.io_answer(())
    }
}
