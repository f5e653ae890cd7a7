//! Dead-position detection: positions from which no sequence of legal moves
//! leads to checkmate, whoever cooperates with whom.
//!
//! Two tests, cheapest first:
//! 1. insufficient mating material ([`Position::is_insufficient_material`]);
//! 2. an exhaustive walk of every position reachable from the candidate.
//!    Finding a checkmate proves the position alive. Running out of positions
//!    without one proves it dead, which covers stalemates and locked pawn
//!    structures where the pieces can only shuffle.
//!
//! The walk is capped at a budget of distinct positions. Open positions blow
//! through any budget quickly and are reported alive, so the oracle never
//! calls a live position dead, but a dead position with a very large
//! reachable set can be missed.

use std::collections::HashSet;

use crate::{board::Position, movegen::legal_moves_into, types::Move};

pub struct DeadPositionOracle {
    budget: usize,
    seen: HashSet<u64>,
    pending: Vec<Position>,
    moves: Vec<Move>,
}

impl Default for DeadPositionOracle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUDGET)
    }
}

impl DeadPositionOracle {
    pub const DEFAULT_BUDGET: usize = 4096;

    /// `budget` caps the distinct positions explored per query.
    pub fn new(budget: usize) -> Self {
        Self {
            budget: budget.max(1),
            seen: HashSet::new(),
            pending: Vec::new(),
            moves: Vec::with_capacity(64),
        }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn is_dead(&mut self, pos: &Position) -> bool {
        if pos.is_insufficient_material() {
            return true;
        }

        let Self {
            budget,
            seen,
            pending,
            moves,
        } = self;
        seen.clear();
        pending.clear();
        seen.insert(pos.position_hash());
        pending.push(pos.clone());

        while let Some(mut node) = pending.pop() {
            legal_moves_into(&mut node, moves);
            if moves.is_empty() {
                if node.checkers_present() {
                    return false;
                }
                continue;
            }
            for &mv in moves.iter() {
                let child = node.play(mv);
                if !seen.insert(child.position_hash()) {
                    continue;
                }
                if seen.len() > *budget {
                    return false;
                }
                // Nothing past an insufficient-material position can mate.
                if !child.is_insufficient_material() {
                    pending.push(child.clone());
                }
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "dead_tests.rs"]
mod dead_tests;
