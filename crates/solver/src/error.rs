use std::io;
use std::path::PathBuf;

use chess_core::FenError;
use thiserror::Error;

/// Why an input line could not be turned into a [`crate::Problem`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("empty problem line")]
    Empty,
    #[error("unknown stipulation '{0}'")]
    InvalidStipulation(String),
    #[error("move count in '{0}' must be a positive integer")]
    InvalidMoveCount(String),
    #[error("missing position after stipulation")]
    MissingPosition,
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] FenError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("node limit reached after {nodes} nodes")]
    NodeLimit { nodes: u64 },
    #[error("failed to write solution: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
