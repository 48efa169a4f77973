//! Subprocess seam.
//!
//! The orchestrator only ever talks to a [`CommandRunner`]; production uses
//! [`ProcessRunner`], tests substitute a scripted runner.

mod process;

use std::fmt;
use std::io::{self, Write};

pub use process::ProcessRunner;

use crate::constants::{COVERAGE_MODE, COVERAGE_PROFILE};

/// One subprocess to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// `go test [-coverprofile=coverage.out -covermode=atomic] <packages>`.
    #[must_use]
    pub fn go_test(go: &str, packages: &[String], coverage: bool) -> Self {
        let mut args = vec!["test".to_string()];
        if coverage {
            args.push(format!("-coverprofile={COVERAGE_PROFILE}"));
            args.push(format!("-covermode={COVERAGE_MODE}"));
        }
        args.extend(packages.iter().cloned());
        Self {
            program: go.to_string(),
            args,
        }
    }

    /// `go tool cover -html=coverage.out`.
    #[must_use]
    pub fn cover_viewer(go: &str) -> Self {
        Self {
            program: go.to_string(),
            args: vec![
                "tool".to_string(),
                "cover".to_string(),
                format!("-html={COVERAGE_PROFILE}"),
            ],
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Where a subprocess's stdout and stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Forwarded live, stdout to the caller's `out` and stderr to `err`.
    Passthrough,
    /// Both streams interleaved into one in-memory buffer.
    Combined,
}

/// Result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code; `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Captured bytes; empty unless run with [`Capture::Combined`].
    pub output: Vec<u8>,
}

impl RunOutcome {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Human-readable exit status, e.g. `exit status 1`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs subprocesses synchronously, one at a time.
pub trait CommandRunner {
    /// Run `invocation` to completion.
    ///
    /// With [`Capture::Passthrough`] the child's streams are written to `out`
    /// and `err` as they arrive; with [`Capture::Combined`] the writers are
    /// untouched and everything lands in [`RunOutcome::output`].
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or its output
    /// cannot be collected or forwarded. A non-zero exit is not an error.
    fn run(
        &mut self,
        invocation: &Invocation,
        capture: Capture,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<RunOutcome>;
}
