use super::*;
use crate::move_to_uci;

fn fen(txt: &str) -> Position {
    Position::from_fen(txt).unwrap()
}

#[test]
fn test_startpos_moves() {
    let pos = fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(legal_moves(&pos).len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_promotions_enumerate_four_pieces_in_order() {
    let pos = fen("8/4K2k/4P2p/8/5q2/2b5/8/8 b - - 0 1");
    assert!(legal_moves(&pos).iter().all(|m| m.promo.is_none()));

    let pos = fen("4k3/8/8/8/8/8/1p6/4K3 b - - 0 1");
    let promos: Vec<PieceKind> = legal_moves(&pos)
        .into_iter()
        .filter_map(|m| m.promo)
        .collect();
    assert_eq!(promos, PieceKind::PROMOTIONS.to_vec());
}

#[test]
fn test_pinned_piece_cannot_move() {
    // White knight on e2 is pinned by the rook on e8.
    let pos = fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
    let knight = coord_to_sq("e2").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| m.from != knight));
}

#[test]
fn test_no_castling_through_attacked_square() {
    // Black bishop on a6 covers f1.
    let pos = fen("4k3/8/b7/8/8/8/8/4K2R w K - 0 1");
    assert!(legal_moves(&pos).iter().all(|m| !m.is_castle));
}

#[test]
fn test_en_passant_generated_only_for_marked_square() {
    let with_ep = fen("4k3/8/8/8/1p2pP2/8/8/4K3 b - f3");
    let ep: Vec<Move> = legal_moves(&with_ep)
        .into_iter()
        .filter(|m| m.is_en_passant)
        .collect();
    assert_eq!(ep.len(), 1);
    assert_eq!(move_to_uci(ep[0]), "e4f3");

    let without = fen("4k3/8/8/8/1p2pP2/8/8/4K3 b - -");
    assert!(legal_moves(&without).iter().all(|m| !m.is_en_passant));
}
