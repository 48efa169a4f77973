//! Invocation options.

use crate::cli::Args;
use crate::config::Defaults;
use crate::constants::ALL_PACKAGES;
use crate::output::DisplayMode;

/// Flags and package paths for one invocation, fixed once parsing is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Write a coverage profile. Always set when `open_coverage` is.
    pub with_coverage: bool,
    /// Open the HTML coverage report after a successful run.
    pub open_coverage: bool,
    /// Replace detailed output with a one-line summary.
    pub quiet: bool,
    /// Drop "no test files" lines from the output.
    pub clean: bool,
    /// Package paths in the order they were given; never empty.
    pub packages: Vec<String>,
}

impl Options {
    /// Build options from parsed flags, OR-ing in configured defaults.
    #[must_use]
    pub fn from_args(args: Args, defaults: &Defaults) -> Self {
        let packages = if args.packages.is_empty() {
            vec![ALL_PACKAGES.to_string()]
        } else {
            args.packages
        };

        Self {
            with_coverage: args.with_coverage || args.open_coverage || defaults.with_coverage,
            open_coverage: args.open_coverage,
            quiet: args.quiet || defaults.quiet,
            clean: args.clean || defaults.clean,
            packages,
        }
    }

    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_flags(self.quiet, self.clean)
    }
}
