//! Post-processing of captured test output.
//!
//! Output is split on newlines and lines are matched by plain substring.
//! Lines are handled as raw bytes, so whatever `go test` printed is
//! re-emitted unchanged and never reordered.

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::constants::{COVERAGE_MARKER, MSG_TESTS_FAILED, MSG_TESTS_PASSED, NO_TEST_FILES_MARKER};
use crate::runner::Capture;

/// How the primary run's output reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Streamed live, untouched.
    Live,
    /// Captured, then re-emitted without "no test files" lines.
    Clean,
    /// Captured and replaced by a one-line summary.
    Quiet,
}

impl DisplayMode {
    /// Quiet takes precedence over clean: its summary replaces the detailed
    /// output that clean would have filtered.
    #[must_use]
    pub const fn from_flags(quiet: bool, clean: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if clean {
            Self::Clean
        } else {
            Self::Live
        }
    }

    #[must_use]
    pub const fn capture(self) -> Capture {
        match self {
            Self::Live => Capture::Passthrough,
            Self::Clean | Self::Quiet => Capture::Combined,
        }
    }
}

/// Write every line of `buf` except those mentioning `[no test files]`.
///
/// # Errors
///
/// Fails only if the writer does.
pub fn write_clean(buf: &[u8], out: &mut dyn Write) -> io::Result<()> {
    if buf.is_empty() {
        return Ok(());
    }
    let body = buf.strip_suffix(b"\n").unwrap_or(buf);
    for line in body
        .split(|&b| b == b'\n')
        .filter(|l| !contains(l, NO_TEST_FILES_MARKER))
    {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Last line of `buf` mentioning `coverage:`, if any.
///
/// Trailing whitespace of the whole buffer is ignored.
#[must_use]
pub fn last_coverage_line(buf: &[u8]) -> Option<&[u8]> {
    let body = buf.trim_ascii_end();
    if body.is_empty() {
        return None;
    }
    body.rsplit(|&b| b == b'\n')
        .find(|l| contains(l, COVERAGE_MARKER))
}

fn contains(line: &[u8], marker: &str) -> bool {
    line.windows(marker.len()).any(|w| w == marker.as_bytes())
}

/// Quiet-mode success line, green when `color` is set.
#[must_use]
pub fn passed_line(color: bool) -> String {
    if color {
        MSG_TESTS_PASSED.green().to_string()
    } else {
        MSG_TESTS_PASSED.to_string()
    }
}

/// Quiet-mode failure line, red when `color` is set.
#[must_use]
pub fn failed_line(color: bool) -> String {
    if color {
        MSG_TESTS_FAILED.red().to_string()
    } else {
        MSG_TESTS_FAILED.to_string()
    }
}
