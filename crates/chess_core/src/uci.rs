//! Long algebraic move text (`e2e4`, `b2b1r`), as used by UCI.

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(kind) = mv.promo {
        s.push(kind.to_char());
    }
    s
}

/// Resolve move text against the legal moves of `pos`, so castling and
/// en passant flags come out right. A missing promotion suffix means queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(ch) => match PieceKind::from_char(ch)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
        None => None,
    };

    legal_moves(pos).into_iter().find(|m| {
        m.from == from
            && m.to == to
            && (m.promo.is_none() || m.promo == promo.or(Some(PieceKind::Queen)))
    })
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
