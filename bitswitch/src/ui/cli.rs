use crate::errors::{Error, UnknownCommand};
use crate::hardware::Controller;
use crate::ui::status::{title, Report};
use std::future::Future;
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;
use tokio::sync::mpsc;

/// How many typed lines may wait for the prompt.
const LINE_QUEUE: usize = 8;

/// Lists all commands the interactive prompt accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `t`: sends the toggle command.
    Toggle,
    /// `c`: (re)connects to the device.
    Connect,
    /// `h`: prints the help.
    Help,
    /// `q`: leaves the prompt.
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    /// Parses a typed line: surrounding whitespaces and case are ignored.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "t" => Ok(Command::Toggle),
            "c" => Ok(Command::Connect),
            "h" => Ok(Command::Help),
            "q" => Ok(Command::Quit),
            _ => Err(UnknownCommand {
                input: input.trim().to_string(),
            }),
        }
    }
}

/// The interactive command-line front end: reads one command per line and prints a report for each.
pub struct Shell<W: Write> {
    controller: Controller,
    output: W,
    running: bool,
}

impl<W: Write> Shell<W> {
    pub fn new(controller: Controller, output: W) -> Self {
        Self {
            controller,
            output,
            running: true,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs a single command.
    pub fn execute(&mut self, command: Command) -> Result<(), Error> {
        let target = self.controller.settings().target().to_string();
        match command {
            Command::Toggle => {
                let report = Report::from_toggle(self.controller.send_toggle(), &target);
                writeln!(self.output, "{}", report.console())?;
            }
            Command::Connect => {
                let report = Report::from_connect(self.controller.connect(), &target);
                writeln!(self.output, "{}", report.console())?;
            }
            Command::Help => self.print_help()?,
            Command::Quit => {
                self.running = false;
                writeln!(self.output, "Goodbye!")?;
            }
        }
        Ok(())
    }

    /// Parses and runs a typed line.
    pub fn handle_line(&mut self, line: &str) -> Result<(), Error> {
        match Command::from_str(line) {
            Ok(command) => self.execute(command),
            Err(_) => {
                writeln!(self.output, "{}", Report::UnknownCommand.console())?;
                Ok(())
            }
        }
    }

    pub fn print_help(&mut self) -> Result<(), Error> {
        let target = self.controller.settings().target().to_string();
        writeln!(self.output)?;
        writeln!(self.output, "Commands:")?;
        writeln!(self.output, "  t - Toggle LED")?;
        writeln!(self.output, "  c - Connect to {}", target)?;
        writeln!(self.output, "  h - Show this help message")?;
        writeln!(self.output, "  q - Quit")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn print_banner(&mut self) -> Result<(), Error> {
        let banner = format!("{} (CLI Version)", title(self.controller.settings().target()));
        writeln!(self.output, "{}", banner)?;
        // The rule stops one column short of the banner.
        let rule = "=".repeat(banner.chars().count().saturating_sub(1));
        writeln!(self.output, "{}", rule)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<(), Error> {
        write!(self.output, "Enter command (h for help): ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Runs the prompt over stdin until `q` is typed, the input is closed or Ctrl-C is pressed.
    pub async fn run(&mut self) -> Result<(), Error> {
        let lines = spawn_reader(std::io::BufReader::new(std::io::stdin()));
        self.run_until(lines, tokio::signal::ctrl_c()).await
    }

    /// Runs the prompt over the received `lines` until `q` is typed, the sender is gone or the
    /// `interrupt` future completes.
    ///
    /// A line that could not be read is reported and the prompt goes on. The connection is
    /// closed when leaving.
    pub async fn run_until<F: Future>(
        &mut self,
        lines: mpsc::Receiver<Result<String, Error>>,
        interrupt: F,
    ) -> Result<(), Error> {
        let session = self.session(lines, interrupt).await;
        self.controller.disconnect();
        session
    }

    async fn session<F: Future>(
        &mut self,
        mut lines: mpsc::Receiver<Result<String, Error>>,
        interrupt: F,
    ) -> Result<(), Error> {
        self.print_banner()?;
        self.print_help()?;

        tokio::pin!(interrupt);

        while self.running {
            self.prompt()?;
            tokio::select! {
                line = lines.recv() => match line {
                    Some(Ok(line)) => self.handle_line(&line)?,
                    Some(Err(error)) => writeln!(self.output, "❌ Error: {}", error)?,
                    None => {
                        writeln!(self.output)?;
                        self.execute(Command::Quit)?;
                    }
                },
                _ = &mut interrupt => {
                    writeln!(self.output)?;
                    self.execute(Command::Quit)?;
                }
            }
        }
        Ok(())
    }
}

/// Reads `input` line by line on a dedicated thread and forwards each line to the returned channel.
///
/// A line that is not valid UTF-8 is forwarded as an error and reading goes on. The thread stops
/// at the end of the input, on a read error (forwarded first) or once the receiver is dropped. A
/// blocked read never holds the caller: the thread is simply left behind when the process exits.
pub fn spawn_reader<R>(mut input: R) -> mpsc::Receiver<Result<String, Error>>
where
    R: BufRead + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(LINE_QUEUE);
    std::thread::spawn(move || loop {
        let mut bytes = Vec::new();
        let line = match input.read_until(b'\n', &mut bytes) {
            Ok(0) => break,
            Ok(_) => String::from_utf8(bytes).map_err(|_| {
                Error::from(std::io::Error::new(
                    ErrorKind::InvalidData,
                    "stream did not contain valid UTF-8",
                ))
            }),
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => {
                let _ = sender.blocking_send(Err(error.into()));
                break;
            }
        };
        if sender.blocking_send(line).is_err() {
            break;
        }
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::mocks::ports::MockPorts;
    use std::time::Duration;

    fn mock_shell(ports: MockPorts) -> Shell<Vec<u8>> {
        let settings = Settings::default().with_settle_delay(Duration::ZERO);
        Shell::new(Controller::with_provider(settings, ports), Vec::new())
    }

    fn output(shell: &Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.output.clone()).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::from_str("t").unwrap(), Command::Toggle);
        assert_eq!(Command::from_str(" T \n").unwrap(), Command::Toggle);
        assert_eq!(Command::from_str("c").unwrap(), Command::Connect);
        assert_eq!(Command::from_str("H").unwrap(), Command::Help);
        assert_eq!(Command::from_str("q").unwrap(), Command::Quit);

        let error = Command::from_str(" toggle ").unwrap_err();
        assert_eq!(error.to_string(), "Unknown command: 'toggle'");
        assert!(Command::from_str("").is_err());
    }

    #[test]
    fn test_execute_commands() {
        let ports = MockPorts::with_microbit();
        let link = ports.link.clone();
        let mut shell = mock_shell(ports);

        shell.execute(Command::Toggle).unwrap();
        shell.execute(Command::Connect).unwrap();
        shell.execute(Command::Toggle).unwrap();
        assert_eq!(
            output(&shell),
            "❌ Not connected to micro:bit\n✅ Connected to micro:bit on COM5\n✅ Toggle command sent\n"
        );
        assert_eq!(link.state().written, b"1\n".to_vec());
        assert!(shell.is_running());

        shell.execute(Command::Quit).unwrap();
        assert!(!shell.is_running());
    }

    #[test]
    fn test_handle_unknown_line() {
        let mut shell = mock_shell(MockPorts::with_microbit());
        shell.handle_line("x").unwrap();
        assert_eq!(output(&shell), "❌ Unknown command. Type 'h' for help.\n");
        assert!(shell.is_running());
    }

    #[test]
    fn test_print_help() {
        let mut shell = mock_shell(MockPorts::default());
        shell.handle_line("h").unwrap();
        assert_eq!(
            output(&shell),
            "\nCommands:\n  t - Toggle LED\n  c - Connect to micro:bit\n  h - Show this help message\n  q - Quit\n\n"
        );
    }

    #[tokio::test]
    async fn test_run_session() {
        let ports = MockPorts::with_microbit();
        let link = ports.link.clone();
        let mut shell = mock_shell(ports);

        let input: &'static [u8] = b"c\nT\nwhat\nq\nt\n";
        shell
            .run_until(spawn_reader(input), std::future::pending::<()>())
            .await
            .unwrap();

        let output = output(&shell);
        assert!(output.starts_with(
            "Micro:bit LED Control (CLI Version)\n==================================\n"
        ));
        assert!(output.contains("✅ Connected to micro:bit on COM5\n"));
        assert!(output.contains("✅ Toggle command sent\n"));
        assert!(output.contains("❌ Unknown command. Type 'h' for help.\n"));
        assert!(output.ends_with("Enter command (h for help): Goodbye!\n"));

        // The last 't' is never read: the session ended with 'q'.
        assert_eq!(link.state().written, b"1\n".to_vec());
        assert_eq!(link.state().open_handles, 0);
        assert!(!shell.controller().is_connected());
    }

    #[tokio::test]
    async fn test_run_goes_on_after_invalid_line() {
        let ports = MockPorts::with_microbit();
        let link = ports.link.clone();
        let mut shell = mock_shell(ports);

        let input: &'static [u8] = b"c\n\xff\nt\nq\n";
        let result = shell
            .run_until(spawn_reader(input), std::future::pending::<()>())
            .await;
        assert!(result.is_ok());

        let output = output(&shell);
        assert!(output.contains(
            "Enter command (h for help): ❌ Error: Protocol error: stream did not contain valid UTF-8.\n"
        ));
        assert!(output.ends_with("Enter command (h for help): Goodbye!\n"));
        // The toggle typed after the invalid line still went through.
        assert_eq!(link.state().written, b"1\n".to_vec());
    }

    #[tokio::test]
    async fn test_run_ends_with_input() {
        let mut shell = mock_shell(MockPorts::default());
        let input: &'static [u8] = b"h\n";
        shell
            .run_until(spawn_reader(input), std::future::pending::<()>())
            .await
            .unwrap();
        assert!(output(&shell).ends_with("Enter command (h for help): \nGoodbye!\n"));
        assert!(!shell.is_running());
    }

    /// An input whose reads block until its sender is dropped.
    struct BlockedInput(std::sync::mpsc::Receiver<u8>);

    impl std::io::Read for BlockedInput {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.recv() {
                Ok(byte) => {
                    buf[0] = byte;
                    Ok(1)
                }
                Err(_) => Ok(0),
            }
        }
    }

    #[tokio::test]
    async fn test_run_interrupted_while_reading() {
        let ports = MockPorts::with_microbit();
        let link = ports.link.clone();
        let mut shell = mock_shell(ports);
        shell.execute(Command::Connect).unwrap();
        assert_eq!(link.state().open_handles, 1);

        // The reader thread stays blocked, even once the runtime is dropped at the end of the test:
        // only the interruption ends the session.
        let (_keep_blocked, blocked) = std::sync::mpsc::channel::<u8>();
        let lines = spawn_reader(std::io::BufReader::new(BlockedInput(blocked)));
        shell
            .run_until(lines, std::future::ready(()))
            .await
            .unwrap();

        assert!(output(&shell).ends_with("Enter command (h for help): \nGoodbye!\n"));
        assert_eq!(link.state().open_handles, 0);
    }

    #[tokio::test]
    async fn test_run_reports_read_failure() {
        let mut shell = mock_shell(MockPorts::default());
        let (sender, lines) = mpsc::channel(LINE_QUEUE);
        sender
            .send(Err(std::io::Error::from(ErrorKind::BrokenPipe).into()))
            .await
            .unwrap();
        drop(sender);

        shell
            .run_until(lines, std::future::pending::<()>())
            .await
            .unwrap();
        assert!(output(&shell).contains("❌ Error: Protocol error: Device connection lost.\n"));
        assert!(output(&shell).ends_with("\nGoodbye!\n"));
    }
}
