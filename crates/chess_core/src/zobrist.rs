//! Zobrist keys: the position identity used by the solver's transposition
//! cache and by the dead-position oracle's visited set.
//!
//! A key XORs together fixed random values for:
//! - each piece on each square (12 pieces × 64 squares)
//! - black to move
//! - each castling right still held
//! - the en passant file, when an en passant square is set
//!
//! Move clocks do not take part, so positions differing only in their
//! halfmove clock or move number share a key.

use crate::{board::Position, types::Piece};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// xorshift64 stream from a fixed seed, usable in const context.
struct KeyStream(u64);

impl KeyStream {
    const fn next(&mut self) -> u64 {
        let mut s = self.0;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.0 = s;
        s
    }
}

impl ZobristKeys {
    pub const fn new() -> Self {
        let mut stream = KeyStream(0x123456789ABCDEF0);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            pieces[i / 384][(i / 64) % 6][i % 64] = stream.next();
            i += 1;
        }

        let side_to_move = stream.next();

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            castling[i] = stream.next();
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            en_passant[i] = stream.next();
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Full key of `pos`, computed from scratch.
    pub fn hash(&self, pos: &Position) -> u64 {
        let mut key = pos
            .board
            .iter()
            .enumerate()
            .filter_map(|(s, pc)| pc.map(|pc| self.piece_key(pc, s as u8)))
            .fold(0u64, |acc, k| acc ^ k);

        if pos.side_to_move == crate::types::Color::Black {
            key ^= self.side_to_move;
        }
        for (held, k) in pos.castling.as_array().into_iter().zip(self.castling) {
            if held {
                key ^= k;
            }
        }
        if let Some(ep) = pos.en_passant {
            key ^= self.en_passant[(ep % 8) as usize];
        }
        key
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
