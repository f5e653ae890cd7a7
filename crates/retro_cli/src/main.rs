use std::io;

use anyhow::{Context, Result};
use retro_cli::Args;
use solver::Solver;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse_from_env();

    // Protocol output owns stdout; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = args
        .solver_config()
        .context("failed to load solver configuration")?;
    let mut solver = Solver::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    retro_cli::run(&mut solver, stdin.lock(), &mut stdout).context("failed to write to stdout")?;
    Ok(())
}
