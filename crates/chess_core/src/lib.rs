//! Chess rules for the problem solver: mailbox positions with FEN I/O,
//! legal move generation, scoped make/unmake, Zobrist identity keys,
//! UCI move text and the dead-position oracle.

pub mod board;
pub mod dead;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use board::*;
pub use dead::DeadPositionOracle;
pub use error::FenError;
pub use movegen::*;
pub use perft::perft;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;
