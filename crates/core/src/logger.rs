use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::format::{Format, Writer},
    EnvFilter,
};

/// Timestamps log lines as "DD Month - HH:MM:SS.microseconds" in local time.
struct BundlerTimer;

impl tracing_subscriber::fmt::time::FormatTime for BundlerTimer {
    fn format_time(&self, writer: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(writer, "{} - {}", now.format("%d %B"), now.format("%H:%M:%S%.6f"))
    }
}

/// Sets up the global logger with the specified log level.
///
/// `RUST_LOG` directives still apply on top of `log_level`, so a single module
/// (for example `rbundler_core::gas=debug`) can be turned up to see every fee
/// suggestion. If a global logger is already set this does nothing.
pub fn setup_logger(log_level: LevelFilter) {
    let filter = EnvFilter::from_default_env().add_directive(log_level.into());

    let format = Format::default().with_timer(BundlerTimer).with_level(true).with_target(false);

    let subscriber =
        tracing_subscriber::fmt().with_env_filter(filter).event_format(format).finish();

    // already initialised by the embedding application
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn setup_info_logger() {
    setup_logger(LevelFilter::INFO);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logger_twice_is_a_no_op() {
        setup_logger(LevelFilter::DEBUG);
        setup_info_logger();

        tracing::info!("logger still usable after second setup");
    }
}
