//! Runtime log level control.
//!
//! The crate only talks to the `log` facade. Installing a logger is the host app's job.

use log::LevelFilter;

/// Maps a level name from the settings UI to a filter. Unknown names fall back to info.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Applies a new global log level and returns the one it replaced, so callers can restore it.
pub fn set_log_level(level: &str) -> LevelFilter {
    let previous = log::max_level();
    let filter = parse_level(level);
    log::set_max_level(filter);
    if previous != filter {
        log::info!("Classifier log level {previous} -> {filter}");
    }
    previous
}
