//! Diagnostics for recipebox.
//!
//! Log lines go to stderr; stdout carries the recipe list and the status
//! messages of the command that ran.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much the binary reports besides the data it was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only. Status messages on stdout are suppressed too.
    Quiet,
    /// Warnings such as an unreadable stored collection.
    #[default]
    Normal,
    /// Loads, saves and exports.
    Verbose,
    /// Every store mutation and dispatched action.
    Trace,
}

impl Verbosity {
    /// Pick a verbosity from the `-q` flag and the number of `-v` flags.
    ///
    /// `quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level that gets logged.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Trace => Level::DEBUG,
        }
    }

    /// Whether status messages like "Recipe saved successfully!" are printed.
    #[must_use]
    pub fn shows_messages(self) -> bool {
        self != Self::Quiet
    }

    fn directive(self) -> String {
        format!("recipebox={}", self.level())
    }
}

/// Install the stderr subscriber.
///
/// A `RUST_LOG` value replaces the filter derived from `verbosity`. Calling
/// this again once a subscriber is installed does nothing.
///
/// ```no_run
/// use recipebox::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init();
}
