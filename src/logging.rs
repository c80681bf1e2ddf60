//! Logging setup for the binary.
//!
//! Library modules only emit `tracing` events; nothing is printed unless a
//! subscriber is installed. The binary installs one here, writing to stderr
//! so command output on stdout stays clean.
//!
//! # Log Levels
//!
//! - `warn`: a project's detail document could not be loaded
//! - `info`: load summaries
//! - `debug`: dropped transitions, rejected sorts/filters/selections
//! - `trace`: every dispatched intent
//!
//! `RUST_LOG` overrides the level chosen with `-v`.

use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// Include the module path of each event.
    pub with_target: bool,
    /// Colour output; on by default only when stderr is a terminal.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_target: false,
            with_ansi: io::stderr().is_terminal(),
        }
    }
}

impl LogConfig {
    /// Map the `-v` count to a level.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+ (`-vvv`): trace, with targets
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_target: verbosity >= 3,
            ..Default::default()
        }
    }
}

/// Install the global subscriber writing to stderr. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, io::stderr);
}

/// Install the global subscriber with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .compact()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .init();
}

/// `RUST_LOG` when set, otherwise our crate at `level` and everything else
/// at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

fn default_directive(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("warn,studio_folio={level}")
}
