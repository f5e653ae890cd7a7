//! Search core for chess composition problems.
//!
//! A [`Solver`] owns a depth-tagged transposition cache and a dead-position
//! oracle, and counts (and prints) the move sequences that satisfy a
//! stipulation: helpmate `h#N`, helpdraw `h=N` or forced mate `#N`.

pub mod cache;
pub mod config;
pub mod error;
pub mod path;
pub mod problem;
mod search;
pub mod solver;

pub use cache::{CacheEntry, CacheStats, TranspositionCache};
pub use config::SolverConfig;
pub use error::{ConfigError, ProblemError, SearchError};
pub use path::SolutionPath;
pub use problem::{Goal, Problem, SearchKind, Stipulation};
pub use solver::Solver;
