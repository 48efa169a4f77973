//! Application-wide constants.
//!
//! This module defines the static values used throughout gotestx, including
//! tool metadata, delegated tool arguments, output markers, and user-facing
//! messages.

// === Application Metadata ===

/// Display name of the tool.
pub const TOOL_NAME: &str = "GoTestX";
/// Binary name, as typed on the command line.
pub const BIN_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Short technical summary of the application (from Cargo.toml).
pub const APP_SUMMARY: &str = env!("CARGO_PKG_DESCRIPTION");
/// Authors (from Cargo.toml).
pub const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

// === Exit Statuses ===

/// Everything went fine.
pub const EXIT_SUCCESS: u8 = 0;
/// Generic failure: bad path, failing tests, viewer failure, platform refusal.
pub const EXIT_FAILURE: u8 = 1;
/// Malformed flag usage.
pub const EXIT_USAGE: u8 = 2;

// === Delegated Tool ===

/// Default program used to run tests and open coverage reports.
pub const DEFAULT_GO_BIN: &str = "go";
/// Coverage profile written by `go test` into the working directory.
pub const COVERAGE_PROFILE: &str = "coverage.out";
/// Coverage accounting mode passed to `go test`.
pub const COVERAGE_MODE: &str = "atomic";
/// Package pattern meaning "every package under the working directory".
pub const ALL_PACKAGES: &str = "./...";
/// Suffix marking a package path as recursive.
pub const RECURSIVE_MARKER: &str = "...";
/// Glob matching Go source files directly inside a directory.
pub const GO_SOURCE_GLOB: &str = "*.go";
/// Glob matching Go source files one directory level down.
pub const GO_SUBPACKAGE_GLOB: &str = "*/*.go";

// === Platform ===

/// The only platform on which the coverage report can be opened.
pub const REPORT_PLATFORM: &str = "macos";

// === Output Markers ===

/// Line marker `go test` prints for packages without tests.
pub const NO_TEST_FILES_MARKER: &str = "[no test files]";
/// Line marker `go test` prints in per-package coverage summaries.
pub const COVERAGE_MARKER: &str = "coverage:";

// === Configuration ===

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "GOTESTX_CONFIG";
/// Project-local configuration file name.
pub const LOCAL_CONFIG_FILE_NAME: &str = "gotestx.toml";
/// Name of the configuration subdirectory under the user config dir.
pub const CONFIG_DIR_NAME: &str = "gotestx";
/// Name of the configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "GOTESTX_LOG";

// === Messages: Summary ===

/// Quiet mode success line.
pub const MSG_TESTS_PASSED: &str = "✔ Tests passed";
/// Quiet mode failure line.
pub const MSG_TESTS_FAILED: &str = "✘ Tests failed";

// === Messages: Progress ===

pub const MSG_RUNNING_WITH_COVERAGE: &str = "Running tests with coverage across: ";
pub const MSG_RUNNING_NORMALLY: &str = "Running tests normally across: ";
pub const MSG_OPENING_REPORT: &str = "Opening coverage report in browser...";
