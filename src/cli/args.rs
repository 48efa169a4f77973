//! Command-line argument definitions.

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};

use crate::constants;
use crate::error::{Error, Result};

/// GoTestX - Go Test eXtended tool with coverage support
///
/// Help and version are plain flags so that their text is rendered by
/// [`crate::cli::help`] onto the caller's streams instead of by clap.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(
    name = "gotestx",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Args {
    /// Show this help
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Show version info
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Run tests with coverage report generation
    #[arg(short = 'c', long = "with-coverage")]
    pub with_coverage: bool,

    /// Open coverage report in browser (macOS only, implies -c)
    #[arg(short = 'o', long = "open-coverage")]
    pub open_coverage: bool,

    /// Suppress info messages and replace test output with a summary
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Suppress 'no test files' lines for cleaner output
    #[arg(short = 'C', long, visible_alias = "clean-view")]
    pub clean: bool,

    /// Package paths; defaults to every package under the working directory
    pub packages: Vec<String>,
}

/// What the parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage and stop.
    Help,
    /// Print version information and stop.
    Version,
    /// Run the tests.
    Run(Args),
}

/// Parse the command-line tokens, excluding the program name.
///
/// Tokens are examined left to right: help or version ends parsing as soon as
/// it is seen, so anything after it is ignored, while an unknown flag seen
/// first is an error. Flags may repeat. A lone `-` is an empty cluster and is
/// dropped; `--` is not an end-of-options marker.
///
/// # Errors
///
/// Returns [`Error::Usage`] for unrecognized flags, including an unknown
/// character inside a combined short-flag cluster such as `-cx`.
pub fn parse<I, T>(tokens: I) -> Result<Command>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let tokens: Vec<OsString> = tokens
        .into_iter()
        .map(Into::into)
        .filter(|t| t != "-")
        .collect();

    if let Some(command) = scan(&tokens)? {
        return Ok(command);
    }

    let argv = std::iter::once(OsString::from(constants::BIN_NAME)).chain(tokens);
    let args = Args::try_parse_from(argv).map_err(|e| usage_error(&e))?;
    Ok(Command::Run(args))
}

/// Walk the flags in order, stopping at help, version, or the first unknown
/// flag.
fn scan(tokens: &[OsString]) -> Result<Option<Command>> {
    let cmd = Args::command();

    for token in tokens.iter().filter_map(|t| t.to_str()) {
        if token == "--" {
            return Err(Error::unknown_option(token));
        }

        if let Some(long) = token.strip_prefix("--") {
            let name = long.split_once('=').map_or(long, |(name, _)| name);
            let id = cmd
                .get_arguments()
                .find(|a| {
                    a.get_long_and_visible_aliases()
                        .is_some_and(|names| names.contains(&name))
                })
                .map(|a| a.get_id().as_str());
            match id {
                Some(id) => {
                    if let Some(command) = terminal(id) {
                        return Ok(Some(command));
                    }
                }
                None => return Err(Error::unknown_option(&format!("--{name}"))),
            }
        } else if let Some(cluster) = token.strip_prefix('-') {
            for c in cluster.chars() {
                let id = cmd
                    .get_arguments()
                    .find(|a| a.get_short() == Some(c))
                    .map(|a| a.get_id().as_str());
                match id {
                    Some(id) => {
                        if let Some(command) = terminal(id) {
                            return Ok(Some(command));
                        }
                    }
                    None => return Err(Error::unknown_option(&format!("-{c}"))),
                }
            }
        }
    }

    Ok(None)
}

fn terminal(id: &str) -> Option<Command> {
    match id {
        "help" => Some(Command::Help),
        "version" => Some(Command::Version),
        _ => None,
    }
}

fn usage_error(err: &clap::Error) -> Error {
    if err.kind() == ErrorKind::UnknownArgument {
        if let Some(ContextValue::String(token)) = err.get(ContextKind::InvalidArg) {
            return Error::unknown_option(token);
        }
    }
    Error::Usage(
        err.kind()
            .as_str()
            .unwrap_or("invalid arguments")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(tokens: &[&str]) -> Args {
        match parse(tokens.iter().copied()) {
            Ok(Command::Run(args)) => args,
            other => panic!("expected a run command, got {other:?}"),
        }
    }

    #[test]
    fn test_no_tokens_runs_with_nothing_set() {
        assert_eq!(run_args(&[]), Args::default());
    }

    #[test]
    fn test_long_flags() {
        let args = run_args(&[
            "--with-coverage",
            "--open-coverage",
            "--quiet",
            "--clean",
        ]);
        assert!(args.with_coverage);
        assert!(args.open_coverage);
        assert!(args.quiet);
        assert!(args.clean);
    }

    #[test]
    fn test_clean_view_alias() {
        assert!(run_args(&["--clean-view"]).clean);
    }

    #[test]
    fn test_combined_short_flags() {
        let args = run_args(&["-cqC", "./pkg"]);
        assert!(args.with_coverage);
        assert!(args.quiet);
        assert!(args.clean);
        assert!(!args.open_coverage);
        assert_eq!(args.packages, vec!["./pkg".to_string()]);
    }

    #[test]
    fn test_packages_keep_encounter_order() {
        let args = run_args(&["./b", "-c", "./a", "./c/..."]);
        assert_eq!(args.packages, vec!["./b", "./a", "./c/..."]);
    }

    #[test]
    fn test_help_and_version_short_circuit() {
        assert_eq!(parse(["-h"]).ok(), Some(Command::Help));
        assert_eq!(parse(["--help", "./missing"]).ok(), Some(Command::Help));
        assert_eq!(parse(["-v"]).ok(), Some(Command::Version));
        assert_eq!(parse(["--version"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_help_and_version_win_over_later_tokens() {
        assert_eq!(parse(["-h", "--bogus"]).ok(), Some(Command::Help));
        assert_eq!(parse(["-h", "-x"]).ok(), Some(Command::Help));
        assert_eq!(parse(["-ch", "--"]).ok(), Some(Command::Help));
        assert_eq!(parse(["-v", "--bogus"]).ok(), Some(Command::Version));
        assert_eq!(parse(["./pkg", "--version", "-x"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_unknown_flag_before_help_is_an_error() {
        assert!(parse(["-x", "-h"]).is_err());
        assert!(parse(["-xh"]).is_err());
        assert!(parse(["--bogus", "--help"]).is_err());
    }

    #[test]
    fn test_repeated_flags_are_accepted() {
        let args = run_args(&["-cc", "-c", "--with-coverage"]);
        assert!(args.with_coverage);
        assert!(!args.quiet);

        let args = run_args(&["-q", "--quiet", "-CC", "--clean-view", "--clean"]);
        assert!(args.quiet);
        assert!(args.clean);
    }

    #[test]
    fn test_lone_dash_is_ignored() {
        let args = run_args(&["-", "-c", "-", "./pkg"]);
        assert!(args.with_coverage);
        assert_eq!(args.packages, vec!["./pkg"]);
    }

    #[test]
    fn test_double_dash_is_rejected() {
        let err = parse(["--", "./pkg"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Unknown long option: --");
        assert!(parse(["-c", "--", "-q"]).is_err());
    }

    #[test]
    fn test_unknown_character_in_cluster() {
        let err = parse(["-cx"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Unknown short option: -x");
    }

    #[test]
    fn test_unknown_long_flag() {
        let err = parse(["--bogus"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Unknown long option: --bogus");
        let err = parse(["--bogus=1"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown long option: --bogus");
    }

    #[test]
    fn test_value_on_a_flag_is_not_an_unknown_option() {
        let err = parse(["--quiet=yes"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!err.to_string().starts_with("Unknown"));
    }
}
