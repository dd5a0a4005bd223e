use crate::command::Command;
use crate::image::Image;
use crate::led::LedState;
use crate::line::DecodeError;

/// Column and row of the pixel following the LED state.
pub const INDICATOR: (usize, usize) = (2, 2);

/// What a received line did.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// The LED state flipped to the given state.
    Toggled(LedState),
    /// The line is not a command.
    Ignored,
    /// The line could not be read or decoded.
    Failed(DecodeError),
}

/// Owns the LED state and the image rendering it.
#[derive(Clone, Debug, Default)]
pub struct Receiver {
    state: LedState,
    image: Image,
}

impl Receiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LedState {
        self.state
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Decodes a received line (without its newline) and runs the command it holds, if any.
    pub fn handle_line(&mut self, line: &[u8]) -> Reaction {
        match Command::parse(line) {
            Ok(Some(command)) => Reaction::Toggled(self.execute(command)),
            Ok(None) => Reaction::Ignored,
            Err(error) => Reaction::Failed(error),
        }
    }

    /// Runs a command and returns the new LED state.
    pub fn execute(&mut self, command: Command) -> LedState {
        match command {
            Command::Toggle => {
                self.state = self.state.toggle();
                let (x, y) = INDICATOR;
                // The indicator is inside the grid.
                let _ = self.image.set_pixel(x, y, self.state.brightness());
            }
        }
        self.state
    }

    /// Blanks the image: the LED state is kept.
    pub fn clear_image(&mut self) {
        self.image.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn indicator(receiver: &Receiver) -> u8 {
        receiver.image().get_pixel(INDICATOR.0, INDICATOR.1).unwrap()
    }

    #[test]
    fn test_boot_state() {
        let receiver = Receiver::new();
        assert_eq!(receiver.state(), LedState::Off);
        assert!(receiver.image().is_blank());
    }

    #[test]
    fn test_toggle_scenario() {
        let mut receiver = Receiver::new();

        assert_eq!(receiver.handle_line(b"1"), Reaction::Toggled(LedState::On));
        assert_eq!(indicator(&receiver), 9);

        assert_eq!(receiver.handle_line(b"1"), Reaction::Toggled(LedState::Off));
        assert_eq!(indicator(&receiver), 0);

        assert_eq!(receiver.handle_line(b"x"), Reaction::Ignored);
        assert_eq!(receiver.state(), LedState::Off);
        assert!(receiver.image().is_blank());
    }

    #[test]
    fn test_only_indicator_is_drawn() {
        let mut receiver = Receiver::new();
        receiver.handle_line(b"1");
        let lit = receiver
            .image()
            .rows()
            .iter()
            .flatten()
            .filter(|pixel| **pixel > 0)
            .count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_decode_failure_keeps_state() {
        let mut receiver = Receiver::new();
        receiver.handle_line(b"1");
        assert_eq!(
            receiver.handle_line(&[0xfe, 0xff]),
            Reaction::Failed(DecodeError::InvalidUtf8)
        );
        assert_eq!(receiver.state(), LedState::On);

        receiver.clear_image();
        assert!(receiver.image().is_blank());
        assert_eq!(receiver.state(), LedState::On);
    }

    proptest! {
        #[test]
        fn test_non_toggle_lines_change_nothing(line in proptest::collection::vec(any::<u8>(), 0..40)) {
            let is_toggle = core::str::from_utf8(&line).map(|text| text.trim() == "1").unwrap_or(false);
            prop_assume!(!is_toggle);

            let mut receiver = Receiver::new();
            receiver.handle_line(b"1");
            let image = *receiver.image();

            let reaction = receiver.handle_line(&line);
            prop_assert!(!matches!(reaction, Reaction::Toggled(_)));
            prop_assert_eq!(receiver.state(), LedState::On);
            prop_assert_eq!(*receiver.image(), image);
        }

        #[test]
        fn test_toggle_has_period_two(toggles in 0usize..50) {
            let mut receiver = Receiver::new();
            for _ in 0..toggles {
                receiver.handle_line(b"1");
            }
            prop_assert_eq!(receiver.state().is_on(), toggles % 2 == 1);
            prop_assert_eq!(indicator(&receiver) > 0, toggles % 2 == 1);

            let before = receiver.state();
            receiver.handle_line(b"1");
            receiver.handle_line(b"1");
            prop_assert_eq!(receiver.state(), before);
        }
    }
}
