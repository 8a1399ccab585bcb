//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the environment
pub fn init() {
    env_logger::init();
}

/// Initialize with a default level filter, overridable via `RUST_LOG`
pub fn init_with_level(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
