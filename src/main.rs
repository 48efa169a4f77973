use std::io::{self, IsTerminal};
use std::process::ExitCode;

use color_eyre::Result;

use gotestx::config;
use gotestx::policy::Platform;
use gotestx::runner::ProcessRunner;
use gotestx::{logging, Context};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    logging::init();

    let (config, source) = config::load()?;
    tracing::debug!(%source, "configuration loaded");

    let color = io::stdout().is_terminal() && io::stderr().is_terminal();
    let mut ctx = Context::new(ProcessRunner, Platform::current(), config).with_color(color);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let code = gotestx::run(
        &mut ctx,
        std::env::args_os().skip(1),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    Ok(ExitCode::from(code))
}
