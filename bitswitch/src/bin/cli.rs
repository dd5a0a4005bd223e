use bitswitch::config::Settings;
use bitswitch::hardware::Controller;
use bitswitch::ui::cli::{Command, Shell};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let mut shell = Shell::new(Controller::new(Settings::default()), std::io::stdout());

    // Try to connect right away: 'c' retries.
    let session = match shell.execute(Command::Connect) {
        Ok(()) => shell.run().await,
        Err(error) => Err(error),
    };
    if let Err(error) = session {
        log::error!("Session aborted: {}", error);
        eprintln!("❌ Error: {}", error);
    }
}
