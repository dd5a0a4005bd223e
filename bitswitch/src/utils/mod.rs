//! Small helpers shared by the controllers.

/// Blocks the current thread for the given amount of milliseconds.
#[macro_export]
macro_rules! pause_sync {
    ($ms:expr) => {
        std::thread::sleep(std::time::Duration::from_millis($ms as u64))
    };
}
