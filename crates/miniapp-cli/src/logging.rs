//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Library crates only emit events; the binary decides where they go.
//!
//! # Log Levels
//!
//! - `error`: import and write failures
//! - `warn`: dropped inserts, ignored page switches
//! - `info`: files written, generation summary
//! - `debug`: store mutations
//! - `trace`: per-component detail

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter`.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-field.
    #[default]
    Pretty,
    /// Single line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
        }
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, io::stderr);
}

/// Install the global subscriber with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(config.with_target);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                tracing_subscriber::registry().with(filter).with(layer).init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .init();
            }
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                tracing_subscriber::registry().with(filter).with(layer).init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .init();
            }
        }
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || default_directives(config.level_filter);
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

/// Our crates at the configured level, everything else at warn.
fn default_directives(level: LevelFilter) -> EnvFilter {
    let level = level.to_string().to_lowercase();
    EnvFilter::new(format!(
        "warn,miniapp={level},miniapp_cli={level},miniapp_core={level},\
         miniapp_store={level},miniapp_codegen={level}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_workspace_crates() {
        let filter = default_directives(LevelFilter::DEBUG).to_string();
        assert!(filter.contains("miniapp_store=debug"));
        assert!(filter.contains("miniapp_codegen=debug"));
    }

    #[test]
    fn test_off_level() {
        let filter = default_directives(LevelFilter::OFF).to_string();
        assert!(filter.contains("miniapp_cli=off"));
    }
}
