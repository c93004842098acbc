//! Logger setup.

use log::LevelFilter;

/// Environment variable that overrides the default `info` level.
pub const LOG_ENV: &str = "HELLO_TRIANGLE_LOG";

/// Parses a level name, case-insensitively.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

/// Routes `log` records to stdout with a timestamp. Calling it twice is harmless.
pub fn init() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Info);

    if dispatch(level).apply().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// The stdout dispatch `init` installs, filtered at `level`.
pub fn dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
}
