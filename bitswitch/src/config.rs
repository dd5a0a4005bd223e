//! Defines the connection settings used by the host controllers.

use std::time::Duration;

/// Default substring looked up (case-insensitively) in the port descriptions.
pub const DEFAULT_TARGET: &str = "micro:bit";
/// Default serial speed, matching the micro:bit UART configuration.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
/// Default read timeout of the serial connection.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
/// Default pause after opening the port: opening the port resets the board.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Settings of a [`Controller`](crate::hardware::Controller).
///
/// The settings are never persisted by this crate: [`Settings::default()`] carries the values
/// expected by the micro:bit firmware.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use bitswitch::config::Settings;
///
/// let settings = Settings::default()
///     .with_target("CMSIS-DAP")
///     .with_settle_delay(Duration::ZERO);
/// assert_eq!(settings.baud_rate(), 115_200);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Substring identifying the device family in a port description.
    target: String,
    /// Serial speed.
    baud_rate: u32,
    /// Read timeout.
    timeout: Duration,
    /// Delay to wait after the port is opened.
    settle_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target: String::from(DEFAULT_TARGET),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl Settings {
    pub fn with_target<S: Into<String>>(mut self, target: S) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// The device family looked up in port descriptions (also used as display name).
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}
