use crate::errors::Error;

/// The outcome of a user action, as reported by the front ends.
///
/// A [`Report`] only reflects what the host did: the device never acknowledges anything, so
/// [`Report::ToggleSent`] does not tell the LED actual state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    /// Nothing happened yet.
    Idle,
    /// Connection established on `port`.
    Connected { target: String, port: String },
    /// No port matches the target.
    DeviceNotFound { target: String },
    /// The port was found but could not be opened.
    ConnectionFailed { target: String, reason: String },
    /// A toggle was requested without a connection.
    NotConnected { target: String },
    /// The toggle command was written.
    ToggleSent,
    /// The toggle command could not be written.
    SendFailed { target: String, reason: String },
    /// The typed command does not exist.
    UnknownCommand,
}

impl Report {
    /// Turns the result of [`Controller::connect`](crate::hardware::Controller::connect) into a report.
    pub fn from_connect(result: Result<String, Error>, target: &str) -> Self {
        match result {
            Ok(port) => Report::Connected {
                target: target.to_string(),
                port,
            },
            Err(Error::DeviceNotFound { target }) => Report::DeviceNotFound { target },
            Err(error) => Report::ConnectionFailed {
                target: target.to_string(),
                reason: error.to_string(),
            },
        }
    }

    /// Turns the result of [`Controller::send_toggle`](crate::hardware::Controller::send_toggle) into a report.
    pub fn from_toggle(result: Result<(), Error>, target: &str) -> Self {
        match result {
            Ok(()) => Report::ToggleSent,
            Err(Error::NotConnected { target }) => Report::NotConnected { target },
            Err(error) => Report::SendFailed {
                target: target.to_string(),
                reason: error.to_string(),
            },
        }
    }

    /// Success are shown green, everything else red.
    pub fn is_success(&self) -> bool {
        matches!(self, Report::Connected { .. } | Report::ToggleSent)
    }

    /// The line printed by the command-line front end.
    pub fn console(&self) -> String {
        let message = match self {
            Report::Idle => String::from("Not connected"),
            Report::Connected { target, port } => format!("Connected to {} on {}", target, port),
            Report::DeviceNotFound { target } => format!(
                "No {} found. Please connect your {} via USB.",
                target, target
            ),
            Report::ConnectionFailed { target, reason } => {
                format!("Failed to connect to {}: {}", target, reason)
            }
            Report::NotConnected { target } => format!("Not connected to {}", target),
            Report::ToggleSent => String::from("Toggle command sent"),
            Report::SendFailed { target, reason } => {
                format!("Error sending data to {}: {}", target, reason)
            }
            Report::UnknownCommand => String::from("Unknown command. Type 'h' for help."),
        };
        match self.is_success() {
            true => format!("✅ {}", message),
            false => format!("❌ {}", message),
        }
    }

    /// The text of the graphical front end status label.
    pub fn label(&self) -> String {
        let message = match self {
            Report::Idle => String::from("Not Connected"),
            Report::Connected { port, .. } => format!("Connected to {}", port),
            Report::DeviceNotFound { target } => format!("No {} found", target),
            Report::ConnectionFailed { reason, .. } => format!("Connection failed - {}", reason),
            Report::NotConnected { target } => format!("Not connected to {}", target),
            Report::ToggleSent => String::from("Toggle command sent"),
            Report::SendFailed { reason, .. } => format!("Failed to send - {}", reason),
            Report::UnknownCommand => String::from("Unknown command"),
        };
        format!("Status: {}", message)
    }
}

/// Builds the application title from the device name: `micro:bit` gives `Micro:bit LED Control`.
pub fn title(target: &str) -> String {
    let mut chars = target.chars();
    match chars.next() {
        None => String::from("LED Control"),
        Some(first) => format!(
            "{}{} LED Control",
            first.to_uppercase(),
            chars.as_str()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DeviceNotFound, NotConnected, ProtocolError};

    #[test]
    fn test_report_from_connect() {
        let report = Report::from_connect(Ok(String::from("COM5")), "micro:bit");
        assert_eq!(report.console(), "✅ Connected to micro:bit on COM5");
        assert_eq!(report.label(), "Status: Connected to COM5");
        assert!(report.is_success());

        let error = DeviceNotFound {
            target: String::from("micro:bit"),
        };
        let report = Report::from_connect(Err(error), "micro:bit");
        assert_eq!(
            report.console(),
            "❌ No micro:bit found. Please connect your micro:bit via USB."
        );
        assert_eq!(report.label(), "Status: No micro:bit found");
        assert!(!report.is_success());

        let error = Error::from(ProtocolError::IoException {
            info: String::from("Permission denied"),
        });
        let report = Report::from_connect(Err(error), "micro:bit");
        assert_eq!(
            report.console(),
            "❌ Failed to connect to micro:bit: Protocol error: Permission denied."
        );
        assert_eq!(
            report.label(),
            "Status: Connection failed - Protocol error: Permission denied."
        );
    }

    #[test]
    fn test_report_from_toggle() {
        let report = Report::from_toggle(Ok(()), "micro:bit");
        assert_eq!(report.console(), "✅ Toggle command sent");
        assert_eq!(report.label(), "Status: Toggle command sent");
        assert!(report.is_success());

        let error = NotConnected {
            target: String::from("micro:bit"),
        };
        let report = Report::from_toggle(Err(error), "micro:bit");
        assert_eq!(report.console(), "❌ Not connected to micro:bit");
        assert_eq!(report.label(), "Status: Not connected to micro:bit");

        let error = Error::from(ProtocolError::IoException {
            info: String::from("Device connection lost"),
        });
        let report = Report::from_toggle(Err(error), "micro:bit");
        assert_eq!(
            report.console(),
            "❌ Error sending data to micro:bit: Protocol error: Device connection lost."
        );
        assert_eq!(
            report.label(),
            "Status: Failed to send - Protocol error: Device connection lost."
        );
        assert!(!report.is_success());
    }

    #[test]
    fn test_idle_and_unknown_reports() {
        assert_eq!(Report::Idle.label(), "Status: Not Connected");
        assert!(!Report::Idle.is_success());
        assert_eq!(
            Report::UnknownCommand.console(),
            "❌ Unknown command. Type 'h' for help."
        );
    }

    #[test]
    fn test_title() {
        assert_eq!(title("micro:bit"), "Micro:bit LED Control");
        assert_eq!(title(""), "LED Control");
    }
}
