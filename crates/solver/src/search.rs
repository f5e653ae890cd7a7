//! The recursive traversals behind the [`crate::Solver`] drivers.
//!
//! Both walks apply each trial move through [`Position::play`], so the move is
//! taken back on every way out of the loop body, including `?`.

use std::io::Write;

use chess_core::{legal_moves_into, DeadPositionOracle, Move, Position};
use tracing::trace;

use crate::cache::TranspositionCache;
use crate::error::SearchError;
use crate::path::SolutionPath;
use crate::problem::Goal;

/// State for one top-level search call.
pub(crate) struct Search<'a> {
    pub cache: &'a mut TranspositionCache,
    pub oracle: &'a mut DeadPositionOracle,
    pub out: &'a mut dyn Write,
    pub path: SolutionPath,
    pub nodes: u64,
    pub node_limit: Option<u64>,
    pub report_forced_lines: bool,
    /// Move buffers indexed by path depth, reused across siblings.
    pub moves: Vec<Vec<Move>>,
}

impl Search<'_> {
    fn visit(&mut self) -> Result<(), SearchError> {
        self.nodes += 1;
        if self.node_limit.is_some_and(|limit| self.nodes > limit) {
            return Err(SearchError::NodeLimit { nodes: self.nodes });
        }
        Ok(())
    }

    /// Fill the buffer for the current ply with the legal moves of `pos`.
    fn generate(&mut self, pos: &mut Position) -> usize {
        let ply = self.path.depth();
        if self.moves.len() <= ply {
            self.moves.resize_with(ply + 1, || Vec::with_capacity(64));
        }
        legal_moves_into(pos, &mut self.moves[ply]);
        ply
    }

    fn emit(&mut self) -> Result<(), SearchError> {
        trace!(depth = self.path.depth(), "solution");
        self.path.render(&mut *self.out)?;
        Ok(())
    }

    /// Number of cooperative lines reaching `goal` in exactly the remaining
    /// budget, printing each one as it is confirmed.
    pub fn cooperative(
        &mut self,
        pos: &mut Position,
        goal: Goal,
        n: u32,
    ) -> Result<u64, SearchError> {
        self.visit()?;
        let ply = self.generate(pos);

        match goal {
            Goal::Mate => {
                if self.moves[ply].is_empty() && pos.checkers_present() {
                    // Only lines where the side that started also mates.
                    if self.path.depth() % 2 == 0 {
                        self.emit()?;
                    }
                    return Ok(u64::from(n % 2 == 0));
                }
            }
            Goal::Draw => {
                if self.oracle.is_dead(pos) {
                    if n == 0 {
                        self.emit()?;
                    }
                    return Ok(u64::from(n == 0));
                }
            }
        }

        if n == 0 {
            return Ok(0);
        }

        let key = pos.position_hash();
        if let Some(count) = self.cache.lookup(key, n) {
            return Ok(count);
        }

        let mut count = 0;
        for i in 0..self.moves[ply].len() {
            let mv = self.moves[ply][i];
            let mut child = pos.play(mv);
            self.path.push(mv);
            let result = self.cooperative(&mut child, goal, n - 1);
            self.path.pop();
            count += result?;
        }

        self.cache.save(key, n, count);
        Ok(count)
    }

    /// Forced mate: attacker nodes (even path depth) sum their replies,
    /// defender nodes keep the reply with the fewest mating lines.
    pub fn competitive(&mut self, pos: &mut Position, n: u32) -> Result<u64, SearchError> {
        self.visit()?;
        let ply = self.generate(pos);

        if self.moves[ply].is_empty() {
            let mated = pos.checkers_present() && n % 2 == 0;
            if mated && self.report_forced_lines {
                self.emit()?;
            }
            return Ok(u64::from(mated));
        }

        if n == 0 {
            return Ok(0);
        }

        let key = pos.position_hash();
        if let Some(count) = self.cache.lookup(key, n) {
            return Ok(count);
        }

        let attacking = ply % 2 == 0;
        let mut best: Option<u64> = None;
        for i in 0..self.moves[ply].len() {
            let mv = self.moves[ply][i];
            let mut child = pos.play(mv);
            self.path.push(mv);
            let result = self.competitive(&mut child, n - 1);
            self.path.pop();
            let value = result?;
            best = Some(match best {
                None => value,
                Some(acc) if attacking => acc + value,
                Some(acc) => acc.min(value),
            });
        }
        let count = best.unwrap_or(0);

        self.cache.save(key, n, count);
        Ok(count)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
