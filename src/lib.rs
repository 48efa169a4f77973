//! GoTestX - Go Test eXtended.
//!
//! Runs `go test` with optional coverage, filters or summarizes its output,
//! and can open the HTML coverage report. The binary is a thin shell around
//! [`app::run`]; everything it touches from the outside world (subprocesses,
//! platform, configuration) is passed in through [`app::Context`].

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod options;
pub mod output;
pub mod packages;
pub mod policy;
pub mod runner;

pub use app::{run, Context};
pub use error::{Error, Result};
