//! Top-level drivers.

use std::io::Write;

use chess_core::{DeadPositionOracle, Position};
use tracing::{debug, warn};

use crate::cache::{CacheStats, TranspositionCache};
use crate::config::SolverConfig;
use crate::error::SearchError;
use crate::path::SolutionPath;
use crate::problem::{Goal, Problem, SearchKind};
use crate::search::Search;

/// Owns the long-lived search resources. One search runs at a time; the
/// cache is cleared at the start of every driver call.
pub struct Solver {
    config: SolverConfig,
    cache: TranspositionCache,
    oracle: DeadPositionOracle,
    last_nodes: u64,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        let cache = TranspositionCache::with_megabytes(config.hash_mb);
        let oracle = DeadPositionOracle::new(config.dead_position_budget);
        debug!(
            slots = cache.capacity(),
            dead_budget = oracle.budget(),
            "solver ready"
        );
        Self {
            config,
            cache,
            oracle,
            last_nodes: 0,
        }
    }

    /// Nodes visited by the most recent driver call, aborted or not.
    pub fn nodes(&self) -> u64 {
        self.last_nodes
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Cooperative mate in exactly `plies`, lines printed to `out`.
    pub fn helpmate(
        &mut self,
        pos: &mut Position,
        plies: u32,
        out: &mut dyn Write,
    ) -> Result<u64, SearchError> {
        self.run(pos, plies, out, |search, pos, n| {
            search.cooperative(pos, Goal::Mate, n)
        })
    }

    /// Cooperative play into a dead position after exactly `plies`.
    pub fn helpdraw(
        &mut self,
        pos: &mut Position,
        plies: u32,
        out: &mut dyn Write,
    ) -> Result<u64, SearchError> {
        self.run(pos, plies, out, |search, pos, n| {
            search.cooperative(pos, Goal::Draw, n)
        })
    }

    /// Forced mate within `plies` against every defence.
    pub fn mate(
        &mut self,
        pos: &mut Position,
        plies: u32,
        out: &mut dyn Write,
    ) -> Result<u64, SearchError> {
        self.run(pos, plies, out, |search, pos, n| search.competitive(pos, n))
    }

    /// Run the driver matching the problem's stipulation.
    pub fn solve(&mut self, problem: &mut Problem, out: &mut dyn Write) -> Result<u64, SearchError> {
        let stipulation = problem.stipulation;
        let plies = stipulation.plies();
        let pos = &mut problem.position;
        match (stipulation.kind(), stipulation.goal()) {
            (SearchKind::Cooperative, Goal::Mate) => self.helpmate(pos, plies, out),
            (SearchKind::Cooperative, Goal::Draw) => self.helpdraw(pos, plies, out),
            (SearchKind::Competitive, _) => self.mate(pos, plies, out),
        }
    }

    fn run<F>(
        &mut self,
        pos: &mut Position,
        plies: u32,
        out: &mut dyn Write,
        walk: F,
    ) -> Result<u64, SearchError>
    where
        F: FnOnce(&mut Search<'_>, &mut Position, u32) -> Result<u64, SearchError>,
    {
        self.cache.clear();
        let mut search = Search {
            cache: &mut self.cache,
            oracle: &mut self.oracle,
            out,
            path: SolutionPath::new(self.config.path_capacity),
            nodes: 0,
            node_limit: self.config.node_limit,
            report_forced_lines: self.config.report_forced_lines,
            moves: vec![Vec::with_capacity(64); plies as usize + 1],
        };
        let result = walk(&mut search, pos, plies);
        self.last_nodes = search.nodes;

        let stats = self.cache.stats();
        match &result {
            Ok(count) => debug!(
                plies,
                count,
                nodes = self.last_nodes,
                hits = stats.hits,
                misses = stats.misses,
                writes = stats.writes,
                "search finished"
            ),
            Err(err) => warn!(plies, nodes = self.last_nodes, "search aborted: {err}"),
        }
        result
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod solver_tests;
