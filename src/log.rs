use env_logger::{Builder, Env};
use log::LevelFilter;

/// Builds the global logger honoring `RUST_LOG`, defaulting to `info`.
/// Safe to call more than once; only the first call takes effect.
pub fn build_logger() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Builds the global logger with an explicit level, e.g. from tests.
pub fn build_logger_for_level(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init();
}
