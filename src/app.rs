//! Per-invocation orchestration.
//!
//! Control flows linearly: parse flags, validate packages, apply the coverage
//! policy, run `go test`, post-process its output, and optionally open the
//! coverage report. Any failure ends the invocation.

use std::io::Write;

use tracing::{debug, info};

use crate::cli::{self, help, Command};
use crate::config::Config;
use crate::constants::{
    COVERAGE_PROFILE, EXIT_SUCCESS, MSG_OPENING_REPORT, MSG_RUNNING_NORMALLY,
    MSG_RUNNING_WITH_COVERAGE,
};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::output::{self, DisplayMode};
use crate::packages;
use crate::policy::{self, Platform};
use crate::runner::{Capture, CommandRunner, Invocation};

/// Collaborators an invocation depends on.
pub struct Context<R> {
    /// Spawns `go test` and `go tool cover`.
    pub runner: R,
    /// Platform the report-opening policy is checked against.
    pub platform: Platform,
    /// Loaded configuration.
    pub config: Config,
    /// Colour the quiet-mode summary lines.
    pub color: bool,
}

impl<R: CommandRunner> Context<R> {
    #[must_use]
    pub fn new(runner: R, platform: Platform, config: Config) -> Self {
        Self {
            runner,
            platform,
            config,
            color: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Run one invocation with `args` (program name excluded) and return its
/// exit status.
pub fn run<R, I, T>(ctx: &mut Context<R>, args: I, out: &mut dyn Write, err: &mut dyn Write) -> u8
where
    R: CommandRunner,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString>,
{
    let parsed = match cli::parse(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            let _ = help::usage(err);
            return e.exit_code();
        }
    };

    let options = match parsed {
        Command::Help => return finish(help::usage(out).map_err(Error::from), err),
        Command::Version => {
            return finish(help::version(out, &ctx.platform).map_err(Error::from), err)
        }
        Command::Run(args) => Options::from_args(args, &ctx.config.defaults),
    };

    debug!(?options, "parsed options");
    let quiet = options.quiet;

    match dispatch(ctx, options, out, err) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            info!(error = %e, "invocation failed");
            let _ = match &e {
                Error::TestsFailed(_) if quiet => writeln!(err, "{}", output::failed_line(ctx.color)),
                _ => writeln!(err, "Error: {e}"),
            };
            e.exit_code()
        }
    }
}

fn finish(result: Result<()>, err: &mut dyn Write) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            e.exit_code()
        }
    }
}

fn dispatch<R: CommandRunner>(
    ctx: &mut Context<R>,
    mut options: Options,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    packages::validate(&mut options.packages, options.quiet, out)?;
    let plan = policy::resolve(&options, &ctx.platform)?;
    let mode = options.display_mode();
    let go = ctx.config.go.as_str();

    if !options.quiet {
        let prefix = if plan.coverage() {
            MSG_RUNNING_WITH_COVERAGE
        } else {
            MSG_RUNNING_NORMALLY
        };
        writeln!(out, "{prefix}{}", options.packages.join(" "))?;
    }

    let invocation = Invocation::go_test(go, &options.packages, plan.coverage());
    debug!(%invocation, ?mode, "running tests");
    let outcome = ctx
        .runner
        .run(&invocation, mode.capture(), out, err)
        .map_err(|e| Error::TestsFailed(e.to_string()))?;
    debug!(code = ?outcome.code, captured = outcome.output.len(), "tests finished");

    match mode {
        DisplayMode::Quiet => {
            if !outcome.success() {
                return Err(Error::TestsFailed(outcome.describe()));
            }
            match plan
                .coverage()
                .then(|| output::last_coverage_line(&outcome.output))
                .flatten()
            {
                Some(line) => {
                    out.write_all(line)?;
                    out.write_all(b"\n")?;
                }
                None => writeln!(out, "{}", output::passed_line(ctx.color))?,
            }
        }
        DisplayMode::Clean => {
            output::write_clean(&outcome.output, out)?;
            if !outcome.success() {
                return Err(Error::TestsFailed(outcome.describe()));
            }
        }
        DisplayMode::Live => {
            if !outcome.success() {
                return Err(Error::TestsFailed(outcome.describe()));
            }
        }
    }

    if plan.coverage() && !options.quiet {
        writeln!(out, "Coverage report saved as {COVERAGE_PROFILE}")?;
        writeln!(
            out,
            "Run '{go} tool cover -html={COVERAGE_PROFILE}' to view it"
        )?;
    }

    if plan.opens_report() {
        if !options.quiet {
            writeln!(out, "{MSG_OPENING_REPORT}")?;
        }
        out.flush()?;
        err.flush()?;

        let viewer = Invocation::cover_viewer(go);
        debug!(%viewer, "opening coverage report");
        let outcome = ctx
            .runner
            .run(&viewer, Capture::Passthrough, out, err)
            .map_err(|e| Error::ViewerFailed(e.to_string()))?;
        if !outcome.success() {
            return Err(Error::ViewerFailed(outcome.describe()));
        }
    }

    Ok(())
}
