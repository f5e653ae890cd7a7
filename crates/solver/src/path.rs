//! The line of moves leading to the node being searched.

use std::io::{self, Write};

use chess_core::{move_to_uci, Move};

/// Move stack with a fixed storage capacity.
///
/// The depth counter tracks every push and pop even past capacity, so parity
/// decisions stay correct on very long lines; only the stored prefix is
/// printed.
#[derive(Debug, Clone)]
pub struct SolutionPath {
    moves: Vec<Move>,
    capacity: usize,
    depth: usize,
}

impl SolutionPath {
    pub const DEFAULT_CAPACITY: usize = 300;

    pub fn new(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
            depth: 0,
        }
    }

    pub fn push(&mut self, mv: Move) {
        if self.depth < self.capacity {
            self.moves.truncate(self.depth);
            self.moves.push(mv);
        }
        self.depth += 1;
    }

    pub fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Moves currently on the line, stored or not.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The printable part of the current line.
    pub fn moves(&self) -> &[Move] {
        &self.moves[..self.depth.min(self.capacity)]
    }

    pub fn reset(&mut self) {
        self.moves.clear();
        self.depth = 0;
    }

    /// Write `solution <m1> <m2> ...#` as one line.
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"solution")?;
        for &mv in self.moves() {
            write!(out, " {}", move_to_uci(mv))?;
        }
        out.write_all(b"#\n")
    }
}

impl Default for SolutionPath {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod path_tests;
