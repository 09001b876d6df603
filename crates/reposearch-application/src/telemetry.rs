//! Tracing subscriber setup.

use reposearch_core::config::{DEFAULT_LOG_LEVEL, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

const LOG_FILE_PREFIX: &str = "reposearch.log";

/// Builds the filter: `RUST_LOG` when set and valid, else `config.level`,
/// else `info`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter(from_env.as_deref(), &config.level)
}

fn build_filter(env_directives: Option<&str>, level: &str) -> EnvFilter {
    env_directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| {
            eprintln!("Invalid log level {level:?}, falling back to {DEFAULT_LOG_LEVEL}");
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        })
}

/// Installs the global subscriber: console output, plus a daily-rolling file
/// under `config.log_dir` when one is configured.
///
/// Returns the file writer's guard, which must be kept alive for buffered
/// lines to be flushed. Installing twice is a no-op.
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console = tracing_subscriber::fmt::layer().with_target(true);

    match &config.log_dir {
        Some(log_dir) => {
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = Registry::default()
                .with(env_filter(config))
                .with(console)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                );
            tracing::subscriber::set_global_default(subscriber).ok()?;
            tracing::info!(log_dir = %log_dir.display(), "File logging enabled");
            Some(guard)
        }
        None => {
            let subscriber = Registry::default().with(env_filter(config)).with(console);
            tracing::subscriber::set_global_default(subscriber).ok();
            None
        }
    }
}
