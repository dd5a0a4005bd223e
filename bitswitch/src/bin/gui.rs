use bitswitch::config::Settings;
use bitswitch::hardware::Controller;

fn main() {
    env_logger::init();

    if let Err(error) = bitswitch::ui::gui::run(Controller::new(Settings::default())) {
        log::error!("Window closed unexpectedly: {}", error);
    }
}
