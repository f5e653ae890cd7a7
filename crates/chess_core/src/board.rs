use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::FenError;
use crate::movegen::legal_moves_into;
use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    /// Rights in Zobrist order: wk, wq, bk, bq.
    pub fn as_array(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }

    /// Drop every right that depends on a piece standing on `sq`.
    fn revoke_touching(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            7 => self.wk = false,
            56 => self.bq = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            63 => self.bk = false,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

/// Rook relocation for a castling king move, keyed by (king_from, king_to).
fn castle_rook_squares(king_from: u8, king_to: u8) -> Option<(u8, u8)> {
    match (king_from, king_to) {
        (4, 6) => Some((7, 5)),
        (4, 2) => Some((0, 3)),
        (60, 62) => Some((63, 61)),
        (60, 58) => Some((56, 59)),
        _ => None,
    }
}

impl Position {
    /// Parse a Forsyth-Edwards Notation string.
    ///
    /// Only the board and side-to-move fields are mandatory; castling and
    /// en passant default to `-`, the clocks to `0 1`. Castling rights whose
    /// king or rook is not on its home square are dropped.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = [None; 64];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or(FenError::PieceChar(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or(FenError::RankWidth {
                        rank: rank as u8 + 1,
                    })?;
                    board[s as usize] = Some(Piece::new(color, kind));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth {
                        rank: rank as u8 + 1,
                    });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth {
                    rank: rank as u8 + 1,
                });
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let castle_part = parts.get(2).copied().unwrap_or("-");
        let mut castling = CastlingRights::NONE;
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::Castling(castle_part.to_string())),
                }
            }
        }

        let ep_part = parts.get(3).copied().unwrap_or("-");
        let en_passant = match ep_part {
            "-" => None,
            coord => match coord_to_sq(coord) {
                Some(s) if rank_of(s) == 2 || rank_of(s) == 5 => Some(s),
                _ => return Err(FenError::EnPassant(coord.to_string())),
            },
        };

        let counter = |idx: usize, default: u32| -> Result<u32, FenError> {
            match parts.get(idx) {
                None => Ok(default),
                Some(txt) => txt.parse().map_err(|_| FenError::Counter(txt.to_string())),
            }
        };
        let halfmove_clock = counter(4, 0)?;
        let fullmove_number = counter(5, 1)?;

        let mut pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };

        for color in [Color::White, Color::Black] {
            let count = pos
                .board
                .iter()
                .flatten()
                .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if count != 1 {
                let color = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(FenError::KingCount { color, count });
            }
        }
        if pos.in_check(side_to_move.other()) {
            return Err(FenError::OpponentInCheck);
        }

        pos.sanitize_castling();
        Ok(pos)
    }

    fn sanitize_castling(&mut self) {
        let has = |p: &Position, s: u8, color: Color, kind: PieceKind| {
            p.piece_at(s) == Some(Piece::new(color, kind))
        };
        let white_king = has(self, 4, Color::White, PieceKind::King);
        let black_king = has(self, 60, Color::Black, PieceKind::King);
        self.castling.wk &= white_king && has(self, 7, Color::White, PieceKind::Rook);
        self.castling.wq &= white_king && has(self, 0, Color::White, PieceKind::Rook);
        self.castling.bk &= black_king && has(self, 63, Color::Black, PieceKind::Rook);
        self.castling.bq &= black_king && has(self, 56, Color::Black, PieceKind::Rook);
    }

    /// Render the position back to FEN (all six fields).
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[(rank * 8 + file) as usize] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (flag, ch) in self.castling.as_array().into_iter().zip(['K', 'Q', 'k', 'q']) {
            if flag {
                out.push(ch);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(s) => out.push_str(&sq_to_coord(s)),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        let king = Some(Piece::new(c, PieceKind::King));
        (0..64u8).find(|&s| self.board[s as usize] == king)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Whether the side to move is in check.
    pub fn checkers_present(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    /// Side to move has no legal move and is in check.
    pub fn is_checkmate(&self) -> bool {
        !self.has_legal_move() && self.checkers_present()
    }

    /// Side to move has no legal move and is not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.has_legal_move() && !self.checkers_present()
    }

    pub fn has_legal_move(&self) -> bool {
        let mut tmp = self.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut tmp, &mut moves);
        !moves.is_empty()
    }

    /// Zobrist identity key: pieces, side to move, castling rights and
    /// en passant file. Move clocks are ignored.
    pub fn position_hash(&self) -> u64 {
        ZOBRIST.hash(self)
    }

    /// Neither side has material that could ever deliver mate: bare kings,
    /// a single knight or bishop, or only bishops that all share a square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut light_bishops = 0;
        let mut dark_bishops = 0;
        for (s, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    if is_light_square(s as u8) {
                        light_bishops += 1;
                    } else {
                        dark_bishops += 1;
                    }
                }
            }
        }
        minors <= 1 || (knights == 0 && (light_bishops == 0 || dark_bishops == 0))
    }

    /// First piece met walking from `from` in direction `(df, dr)`.
    fn first_piece_along(&self, from: u8, df: i8, dr: i8) -> Option<Piece> {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(s) = sq(f, r) {
            if let Some(pc) = self.piece_at(s) {
                return Some(pc);
            }
            f += df;
            r += dr;
        }
        None
    }

    fn piece_on_step(&self, from: u8, step: (i8, i8), wanted: Piece) -> bool {
        sq(file_of(from) + step.0, rank_of(from) + step.1)
            .is_some_and(|s| self.piece_at(s) == Some(wanted))
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        // A pawn of `by` attacks `target` from one rank behind it.
        let behind = -by.forward();
        let pawn = Piece::new(by, PieceKind::Pawn);
        if [(-1, behind), (1, behind)]
            .into_iter()
            .any(|step| self.piece_on_step(target, step, pawn))
        {
            return true;
        }

        let knight = Piece::new(by, PieceKind::Knight);
        if KNIGHT_STEPS
            .into_iter()
            .any(|step| self.piece_on_step(target, step, knight))
        {
            return true;
        }

        let king = Piece::new(by, PieceKind::King);
        if KING_STEPS
            .into_iter()
            .any(|step| self.piece_on_step(target, step, king))
        {
            return true;
        }

        let slider_hits = |dirs: [(i8, i8); 4], kind: PieceKind| {
            dirs.into_iter().any(|(df, dr)| {
                self.first_piece_along(target, df, dr)
                    .is_some_and(|pc| pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen))
            })
        };
        slider_hits(DIAGONALS, PieceKind::Bishop) || slider_hits(ORTHOGONALS, PieceKind::Rook)
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut undo = Undo {
            captured: self.piece_at(to),
            castling: self.castling.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moved_piece: moved,
            rook_move: None,
            ep_captured_sq: None,
        };

        self.en_passant = None;

        if mv.is_en_passant {
            // The captured pawn sits beside the mover, one rank behind `to`.
            if let Some(cs) = sq(file_of(to), rank_of(to) - moved.color.forward()) {
                undo.captured = self.piece_at(cs);
                undo.ep_captured_sq = Some(cs);
                self.set_piece(cs, None);
            }
        }

        self.set_piece(from, None);
        let landed = if moved.kind == PieceKind::Pawn && rank_of(to) == moved.color.promotion_rank()
        {
            Piece::new(moved.color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.set_piece(to, Some(landed));

        if mv.is_castle && moved.kind == PieceKind::King {
            if let Some((rf, rt)) = castle_rook_squares(from, to) {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                undo.rook_move = Some((rf, rt));
            }
        }

        self.castling.revoke_touching(from);
        self.castling.revoke_touching(to);

        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        let irreversible = moved.kind == PieceKind::Pawn || undo.captured.is_some();
        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Restores the pawn for promotions as well.
        self.set_piece(mv.from, Some(undo.moved_piece));
        match undo.ep_captured_sq {
            Some(cs) => {
                self.set_piece(mv.to, None);
                self.set_piece(cs, undo.captured);
            }
            None => self.set_piece(mv.to, undo.captured),
        }
    }

    /// Apply `mv` for the lifetime of the returned guard; dropping the guard
    /// takes the move back. The guard dereferences to the position.
    pub fn play(&mut self, mv: Move) -> PlayedMove<'_> {
        let undo = self.make_move(mv);
        PlayedMove {
            pos: self,
            mv,
            undo: Some(undo),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

/// A move applied to a [`Position`], taken back when dropped.
///
/// Undo runs on every exit path of the scope holding the guard: normal
/// fall-through, early `return`, `?` propagation and unwinding.
pub struct PlayedMove<'a> {
    pos: &'a mut Position,
    mv: Move,
    undo: Option<Undo>,
}

impl PlayedMove<'_> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for PlayedMove<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for PlayedMove<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for PlayedMove<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.unmake_move(self.mv, undo);
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
