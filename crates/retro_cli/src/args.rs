use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use solver::{ConfigError, SolverConfig};

/// Reads `<stipulation> <fen>` lines from stdin and prints every solution.
#[derive(Debug, Parser)]
#[command(name = "retro", version, long_about = None)]
pub struct Args {
    /// Abort a problem after visiting this many nodes (also accepted as `-limit`)
    #[arg(long, value_name = "NODES")]
    pub limit: Option<u64>,

    /// TOML file with solver settings
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Transposition cache size in MiB (0 disables the cache)
    #[arg(long, value_name = "MIB")]
    pub hash: Option<usize>,

    /// Also print forced-mate lines
    #[arg(long)]
    pub forced_lines: bool,
}

impl Args {
    pub fn parse_from_env() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// File settings (or defaults) with command-line overrides applied.
    pub fn solver_config(&self) -> Result<SolverConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::load(path)?,
            None => SolverConfig::default(),
        };
        if let Some(limit) = self.limit {
            config.node_limit = Some(limit);
        }
        if let Some(hash) = self.hash {
            config.hash_mb = hash;
        }
        if self.forced_lines {
            config.report_forced_lines = true;
        }
        Ok(config)
    }
}

/// Rewrite the single-dash `-limit` spelling to `--limit`.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-limit" {
                OsString::from("--limit")
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod args_tests;
