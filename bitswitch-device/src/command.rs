use crate::line::DecodeError;

/// The text of the toggle command (once surrounding whitespaces are stripped).
pub const TOGGLE_TOKEN: &str = "1";

/// Commands understood by the device.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Flips the LED state.
    Toggle,
}

impl Command {
    /// Decodes a received line.
    ///
    /// # Returns
    /// * `Ok(Some(command))` for a known command.
    /// * `Ok(None)` for any other text: it is silently ignored.
    /// * `Err(InvalidUtf8)` if the line is not text.
    pub fn parse(line: &[u8]) -> Result<Option<Command>, DecodeError> {
        let text = core::str::from_utf8(line).map_err(|_| DecodeError::InvalidUtf8)?;
        match text.trim() {
            TOGGLE_TOKEN => Ok(Some(Command::Toggle)),
            _ => Ok(None),
        }
    }
}
