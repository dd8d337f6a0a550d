//! Log output setup for the command-line tool.
//!
//! Events go to stderr so that generated code on stdout stays clean. The
//! filter comes from `IFUZZ_LOG` when set, otherwise from the requested
//! level.

use std::fmt;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt as subscriber_fmt, EnvFilter};

/// Environment variable holding a filter directive such as `pipeline=info`.
pub const LOG_ENV: &str = "IFUZZ_LOG";

/// Output format for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        })
    }
}

/// Logging verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Errors and warnings.
    #[default]
    Warn,
    /// Stage summaries, individual directives and harnesses.
    Debug,
}

impl LogLevel {
    /// `Debug` when verbose, `Warn` otherwise.
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Warn => "warn",
            LogLevel::Debug => "debug",
        })
    }
}

/// Install the global subscriber. Later calls do nothing.
pub fn init(format: LogFormat, level: LogLevel) {
    static INITIALISED: OnceLock<()> = OnceLock::new();

    INITIALISED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.to_string()));
        let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let builder = subscriber_fmt()
            .with_env_filter(filter)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .with_target(true);

        let _ = match format {
            LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
            LogFormat::Text => tracing::subscriber::set_global_default(builder.compact().finish()),
        };
    });
}
