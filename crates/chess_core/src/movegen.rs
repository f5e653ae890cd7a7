use crate::{board::Position, types::*};

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Enumeration order is fixed: origin squares a1..h8, and per piece the order
/// of its step table. Search output depends on this order.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else { continue };
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_steps(pos, from, us, &KNIGHT_STEPS, out),
            PieceKind::Bishop => gen_slides(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => gen_slides(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slides(pos, from, us, &DIAGONALS, out);
                gen_slides(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, us, &KING_STEPS, out);
                gen_castles(pos, from, us, out);
            }
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(from: u8, to: u8, us: Color, out: &mut Vec<Move>) {
    if rank_of(to) == us.promotion_rank() {
        out.extend(
            PieceKind::PROMOTIONS
                .into_iter()
                .map(|kind| Move::promotion(from, to, kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = us.forward();
    let start_rank = match us {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(one) = sq(f, r + dir).filter(|&s| pos.piece_at(s).is_none()) {
        push_pawn_move(from, one, us, out);
        if r == start_rank {
            if let Some(two) = sq(f, r + 2 * dir).filter(|&s| pos.piece_at(s).is_none()) {
                out.push(Move::new(from, two));
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else { continue };
        match pos.piece_at(to) {
            Some(target) if target.color != us => push_pawn_move(from, to, us, out),
            Some(_) => {}
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            None => {}
        }
    }
}

/// Single-step pieces (knight, king).
fn gen_steps(pos: &Position, from: u8, us: Color, steps: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    for &(df, dr) in steps {
        let Some(to) = sq(f + df, r + dr) else { continue };
        if pos.piece_at(to).is_none_or(|pc| pc.color != us) {
            out.push(Move::new(from, to));
        }
    }
}

/// Sliding pieces: walk each ray until the edge, a friendly piece, or a capture.
fn gen_slides(pos: &Position, from: u8, us: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

struct CastleSide {
    king_to: u8,
    /// Squares between king and rook that must be empty.
    empty: &'static [u8],
    /// Squares the king crosses or lands on; none may be attacked.
    safe: [u8; 2],
}

const WHITE_KINGSIDE: CastleSide = CastleSide {
    king_to: 6,
    empty: &[5, 6],
    safe: [5, 6],
};
const WHITE_QUEENSIDE: CastleSide = CastleSide {
    king_to: 2,
    empty: &[3, 2, 1],
    safe: [3, 2],
};
const BLACK_KINGSIDE: CastleSide = CastleSide {
    king_to: 62,
    empty: &[61, 62],
    safe: [61, 62],
};
const BLACK_QUEENSIDE: CastleSide = CastleSide {
    king_to: 58,
    empty: &[59, 58, 57],
    safe: [59, 58],
};

fn gen_castles(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (home, sides) = match us {
        Color::White => (
            4u8,
            [
                (pos.castling.wk, &WHITE_KINGSIDE),
                (pos.castling.wq, &WHITE_QUEENSIDE),
            ],
        ),
        Color::Black => (
            60u8,
            [
                (pos.castling.bk, &BLACK_KINGSIDE),
                (pos.castling.bq, &BLACK_QUEENSIDE),
            ],
        ),
    };
    // No castling out of check.
    if from != home || pos.in_check(us) {
        return;
    }

    let them = us.other();
    for (allowed, side) in sides {
        if allowed
            && side.empty.iter().all(|&s| pos.piece_at(s).is_none())
            && side.safe.iter().all(|&s| !pos.is_square_attacked(s, them))
        {
            out.push(Move {
                is_castle: true,
                ..Move::new(from, side.king_to)
            });
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
