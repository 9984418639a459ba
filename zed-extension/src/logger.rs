use log::SetLoggerError;

/// Formats log lines for stderr; Zed prefixes its own timestamps.
fn stderr_formatter(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args!(
        "[{}] {}: {}",
        get_level(record.level()),
        record.target(),
        message
    ))
}

fn get_level(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "E",
        log::Level::Warn => "W",
        log::Level::Info => "I",
        log::Level::Debug => "D",
        log::Level::Trace => "T",
    }
}

fn level_filter() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Sends this crate's logs to stderr, which Zed forwards to its log.
///
/// Fails if a logger is already installed.
pub fn setup_logger() -> Result<(), SetLoggerError> {
    fern::Dispatch::new()
        .level(log::LevelFilter::Warn)
        .level_for("local_ai_zed", level_filter())
        .format(stderr_formatter)
        .chain(std::io::stderr())
        .apply()
}

#[cfg(test)]
pub fn setup_test_logger() {
    if log::logger().enabled(&log::Metadata::builder().level(log::Level::Debug).build()) {
        return;
    }

    let _ = fern::Dispatch::new()
        .format(stderr_formatter)
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();
}
