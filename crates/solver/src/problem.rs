//! Problem lines: a stipulation token followed by a FEN position.

use std::fmt;
use std::str::FromStr;

use chess_core::Position;

use crate::error::ProblemError;

/// What the searched side is trying to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Mate,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Both sides work together towards the goal.
    Cooperative,
    /// One side mates against every defence.
    Competitive,
}

/// A stipulation with its move count in full moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stipulation {
    /// `h#N`
    Helpmate(u32),
    /// `h=N`
    Helpdraw(u32),
    /// `#N`
    Mate(u32),
}

impl Stipulation {
    pub fn moves(self) -> u32 {
        match self {
            Stipulation::Helpmate(n) | Stipulation::Helpdraw(n) | Stipulation::Mate(n) => n,
        }
    }

    pub fn kind(self) -> SearchKind {
        match self {
            Stipulation::Helpmate(_) | Stipulation::Helpdraw(_) => SearchKind::Cooperative,
            Stipulation::Mate(_) => SearchKind::Competitive,
        }
    }

    pub fn goal(self) -> Goal {
        match self {
            Stipulation::Helpdraw(_) => Goal::Draw,
            Stipulation::Helpmate(_) | Stipulation::Mate(_) => Goal::Mate,
        }
    }

    /// Root ply budget: `2N` for help play, `2N - 1` for a forced mate.
    pub fn plies(self) -> u32 {
        match self {
            Stipulation::Helpmate(n) | Stipulation::Helpdraw(n) => 2 * n,
            Stipulation::Mate(n) => 2 * n - 1,
        }
    }
}

impl FromStr for Stipulation {
    type Err = ProblemError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (build, count): (fn(u32) -> Stipulation, &str) =
            if let Some(rest) = token.strip_prefix("h#") {
                (Stipulation::Helpmate, rest)
            } else if let Some(rest) = token.strip_prefix("h=") {
                (Stipulation::Helpdraw, rest)
            } else if let Some(rest) = token.strip_prefix('#') {
                (Stipulation::Mate, rest)
            } else {
                return Err(ProblemError::InvalidStipulation(token.to_string()));
            };

        // Capped so that 2N still fits the ply counter.
        let moves = count
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| count.parse::<u32>().ok())
            .flatten()
            .filter(|n| (1..=u32::MAX / 2).contains(n))
            .ok_or_else(|| ProblemError::InvalidMoveCount(token.to_string()))?;
        Ok(build(moves))
    }
}

impl fmt::Display for Stipulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stipulation::Helpmate(n) => write!(f, "h#{n}"),
            Stipulation::Helpdraw(n) => write!(f, "h={n}"),
            Stipulation::Mate(n) => write!(f, "#{n}"),
        }
    }
}

/// One parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub stipulation: Stipulation,
    pub position: Position,
}

impl Problem {
    /// Parse `<stipulation> <fen...>`. The FEN fields are rejoined with single
    /// spaces, so any whitespace between them is accepted.
    pub fn parse(line: &str) -> Result<Self, ProblemError> {
        let mut tokens = line.split_whitespace();
        let stipulation: Stipulation = tokens.next().ok_or(ProblemError::Empty)?.parse()?;
        let fen = tokens.collect::<Vec<_>>().join(" ");
        if fen.is_empty() {
            return Err(ProblemError::MissingPosition);
        }
        let position = Position::from_fen(&fen)?;
        Ok(Self {
            stipulation,
            position,
        })
    }
}

impl FromStr for Problem {
    type Err = ProblemError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::parse(line)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stipulation, self.position)
    }
}

#[cfg(test)]
#[path = "problem_tests.rs"]
mod problem_tests;
