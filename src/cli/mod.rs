//! Command-line interface module.
//!
//! Provides argument parsing, the usage/version texts, and the conversion
//! from parsed flags into invocation options.

pub mod args;
pub mod help;

pub use args::{parse, Args, Command};
