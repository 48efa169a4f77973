//! Error taxonomy for a single invocation.
//!
//! Every variant is terminal: nothing is retried, and the caller reports the
//! error exactly once before exiting with [`Error::exit_code`].

use thiserror::Error;

use crate::constants::{EXIT_FAILURE, EXIT_USAGE};

/// Errors that end an invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// Unrecognized flag or malformed flag usage.
    #[error("{0}")]
    Usage(String),

    /// A package path is missing or is not a directory.
    #[error("Package path '{0}' does not exist.")]
    PackageNotFound(String),

    /// Neither the directory nor its direct subdirectories hold Go sources.
    #[error("No Go files found in '{0}'.")]
    NoGoFiles(String),

    /// Opening the coverage report was requested on an unsupported platform.
    #[error("--open-coverage is only supported on macOS.")]
    UnsupportedPlatform,

    /// The delegated test run exited with a failure.
    #[error("go test failed: {0}")]
    TestsFailed(String),

    /// The coverage viewer exited with a failure.
    #[error("failed to open coverage report: {0}")]
    ViewerFailed(String),

    /// Writing to one of the caller's streams failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    /// Build a usage error naming the offending token.
    ///
    /// Single-dash tokens are reported as short options, everything else as
    /// long options.
    #[must_use]
    pub fn unknown_option(token: &str) -> Self {
        let kind = if token.starts_with("--") { "long" } else { "short" };
        Self::Usage(format!("Unknown {kind} option: {token}"))
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
