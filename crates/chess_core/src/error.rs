//! Errors raised while reading positions.

use thiserror::Error;

/// Why a FEN string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 2 FEN fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in FEN board, found {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}' in FEN")]
    PieceChar(char),
    #[error("rank {rank} of FEN board does not describe 8 files")]
    RankWidth { rank: u8 },
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: &'static str, count: usize },
    #[error("side not to move is in check")]
    OpponentInCheck,
}
