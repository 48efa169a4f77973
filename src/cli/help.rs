//! Usage and version texts.

use std::io::{self, Write};

use crate::constants::{APP_AUTHOR, APP_SUMMARY, APP_VERSION, BIN_NAME, TOOL_NAME};
use crate::policy::Platform;

/// Write the usage text.
///
/// # Errors
///
/// Fails only if the writer does.
pub fn usage(w: &mut dyn Write) -> io::Result<()> {
    write!(
        w,
        "{TOOL_NAME} v{APP_VERSION}
{APP_SUMMARY}
Author: {APP_AUTHOR}

Usage: {BIN_NAME} [options] [packages]

Options:
  -c, --with-coverage   Run tests with coverage report generation (coverage.out)
  -o, --open-coverage   Open coverage report in browser (macOS only, implies -c)
  -q, --quiet           Suppress info messages and show a short summary only
  -C, --clean           Suppress 'no test files' lines for cleaner output
                        (alias: --clean-view; ignored when --quiet is set)
  -h, --help            Show this help
  -v, --version         Show version info
"
    )
}

/// Write the version text, naming the processor of `platform`.
///
/// # Errors
///
/// Fails only if the writer does.
pub fn version(w: &mut dyn Write, platform: &Platform) -> io::Result<()> {
    writeln!(
        w,
        "{APP_VERSION}\n\n{TOOL_NAME}\n{APP_SUMMARY}\nAuthor: {APP_AUTHOR}\nVersion: {APP_VERSION}\nProcessor: {} ({})",
        platform.arch, platform.os
    )
}
