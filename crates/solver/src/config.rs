//! Solver settings, read from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Transposition cache size in MiB. `0` disables the cache.
    pub hash_mb: usize,
    /// Longest line the solution path stores; deeper moves are counted but
    /// not printed.
    pub path_capacity: usize,
    /// Abort a search after this many visited nodes (None = unbounded).
    pub node_limit: Option<u64>,
    /// Distinct positions the dead-position oracle may explore per query.
    pub dead_position_budget: usize,
    /// Print forced-mate lines as they are found.
    pub report_forced_lines: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            hash_mb: 16,
            path_capacity: 300,
            node_limit: None,
            dead_position_budget: 4096,
            report_forced_lines: false,
        }
    }
}

impl SolverConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
