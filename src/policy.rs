//! Coverage and report-opening policy.
//!
//! Reconciles the coverage and open-report flags into a single decision
//! before anything is dispatched.

use crate::constants::REPORT_PLATFORM;
use crate::error::{Error, Result};
use crate::options::Options;

/// Operating system and processor the tool runs on.
///
/// Injected into the orchestrator so tests can pretend to run elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system identifier, as in [`std::env::consts::OS`].
    pub os: String,
    /// Processor identifier, as in [`std::env::consts::ARCH`].
    pub arch: String,
}

impl Platform {
    #[must_use]
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Whether the coverage report can be opened here.
    #[must_use]
    pub fn supports_report(&self) -> bool {
        self.os == REPORT_PLATFORM
    }
}

/// How coverage is handled for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoveragePlan {
    /// Plain test run.
    Off,
    /// Write a coverage profile.
    Profile,
    /// Write a coverage profile, then open the HTML report.
    ProfileAndOpen,
}

impl CoveragePlan {
    #[must_use]
    pub const fn coverage(self) -> bool {
        !matches!(self, Self::Off)
    }

    #[must_use]
    pub const fn opens_report(self) -> bool {
        matches!(self, Self::ProfileAndOpen)
    }
}

/// Decide the coverage plan for `options` on `platform`.
///
/// Opening the report always implies coverage.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPlatform`] when opening the report is requested
/// anywhere but macOS.
pub fn resolve(options: &Options, platform: &Platform) -> Result<CoveragePlan> {
    if options.open_coverage {
        if !platform.supports_report() {
            return Err(Error::UnsupportedPlatform);
        }
        return Ok(CoveragePlan::ProfileAndOpen);
    }

    if options.with_coverage {
        Ok(CoveragePlan::Profile)
    } else {
        Ok(CoveragePlan::Off)
    }
}
