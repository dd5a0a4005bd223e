use crate::image::MAX_BRIGHTNESS;

/// The LED state: `Off` at boot, flipped by each toggle command.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LedState {
    #[default]
    Off,
    On,
}

impl LedState {
    /// Returns the opposite state.
    pub fn toggle(self) -> Self {
        match self {
            LedState::Off => LedState::On,
            LedState::On => LedState::Off,
        }
    }

    pub fn is_on(self) -> bool {
        self == LedState::On
    }

    /// The brightness of the indicator pixel for this state.
    pub fn brightness(self) -> u8 {
        match self {
            LedState::Off => 0,
            LedState::On => MAX_BRIGHTNESS,
        }
    }
}

impl From<bool> for LedState {
    fn from(on: bool) -> Self {
        match on {
            true => LedState::On,
            false => LedState::Off,
        }
    }
}
