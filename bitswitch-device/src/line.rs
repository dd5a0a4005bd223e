use heapless::Vec;

/// Size of the receive line buffer: way more than the one byte command needs.
pub const LINE_CAPACITY: usize = 32;

/// A complete line, without its newline terminator.
pub type Line<const N: usize> = Vec<u8, N>;

/// Why a received line could not be used.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The UART reported an error.
    Read,
    /// The line is longer than the receive buffer.
    Overflow,
    /// The line is not valid UTF-8 text.
    InvalidUtf8,
}

/// Assembles received bytes into newline-terminated lines.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize = LINE_CAPACITY> {
    buffer: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineBuffer<N> {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feeds one byte.
    ///
    /// # Returns
    /// * `None` while the line is not terminated.
    /// * `Some(Ok(line))` on a newline.
    /// * `Some(Err(Overflow))` on the newline ending a line that did not fit the buffer.
    pub fn push(&mut self, byte: u8) -> Option<Result<Line<N>, DecodeError>> {
        if byte == b'\n' {
            let line = core::mem::take(&mut self.buffer);
            return match core::mem::take(&mut self.overflowed) {
                true => Some(Err(DecodeError::Overflow)),
                false => Some(Ok(line)),
            };
        }
        if !self.overflowed && self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
        None
    }

    /// Drops the pending (not terminated) bytes.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of pending bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<const N: usize>(
        buffer: &mut LineBuffer<N>,
        bytes: &[u8],
    ) -> std::vec::Vec<Result<std::vec::Vec<u8>, DecodeError>> {
        bytes
            .iter()
            .filter_map(|byte| buffer.push(*byte))
            .map(|line| line.map(|line| line.to_vec()))
            .collect()
    }

    #[test]
    fn test_single_line() {
        let mut buffer: LineBuffer = LineBuffer::new();
        assert_eq!(feed(&mut buffer, b"1\n"), vec![Ok(b"1".to_vec())]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_partial_line_is_kept() {
        let mut buffer: LineBuffer = LineBuffer::new();
        assert!(feed(&mut buffer, b"hel").is_empty());
        assert_eq!(buffer.len(), 3);
        assert_eq!(feed(&mut buffer, b"lo\n1\n"), vec![Ok(b"hello".to_vec()), Ok(b"1".to_vec())]);
    }

    #[test]
    fn test_empty_line() {
        let mut buffer: LineBuffer = LineBuffer::new();
        assert_eq!(feed(&mut buffer, b"\n"), vec![Ok(vec![])]);
    }

    #[test]
    fn test_overflow() {
        let mut buffer: LineBuffer<4> = LineBuffer::new();
        assert_eq!(
            feed(&mut buffer, b"123456\n1\n"),
            vec![Err(DecodeError::Overflow), Ok(b"1".to_vec())]
        );
    }

    #[test]
    fn test_reset() {
        let mut buffer: LineBuffer<4> = LineBuffer::new();
        feed(&mut buffer, b"123456");
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(feed(&mut buffer, b"1\n"), vec![Ok(b"1".to_vec())]);
    }
}
