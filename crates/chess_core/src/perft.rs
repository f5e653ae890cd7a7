use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Leaf count of the legal move tree `depth` plies deep.
/// Used to check move generation against published node counts.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    // One move buffer per ply, reused across siblings.
    fn walk(pos: &mut Position, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };
        legal_moves_into(pos, buf);
        if rest.is_empty() {
            return buf.len() as u64;
        }
        let mut nodes = 0;
        for &mv in buf.iter() {
            nodes += walk(&mut pos.play(mv), rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    walk(pos, &mut layers)
}
