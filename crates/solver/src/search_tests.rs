use super::*;

struct Outcome {
    result: Result<u64, SearchError>,
    lines: Vec<String>,
    nodes: u64,
    buffers: usize,
}

fn walk(
    fen: &str,
    node_limit: Option<u64>,
    report_forced_lines: bool,
    f: impl FnOnce(&mut Search<'_>, &mut Position) -> Result<u64, SearchError>,
) -> Outcome {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut cache = TranspositionCache::with_capacity(1 << 12);
    let mut oracle = DeadPositionOracle::default();
    let mut out = Vec::new();
    let mut search = Search {
        cache: &mut cache,
        oracle: &mut oracle,
        out: &mut out,
        path: SolutionPath::default(),
        nodes: 0,
        node_limit,
        report_forced_lines,
        moves: Vec::new(),
    };
    let result = f(&mut search, &mut pos);
    let nodes = search.nodes;
    let buffers = search.moves.len();
    assert_eq!(search.path.depth(), 0, "path not unwound");
    assert_eq!(pos.to_fen(), fen, "position not restored");

    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    Outcome {
        result,
        lines,
        nodes,
        buffers,
    }
}

#[test]
fn test_helpmate_counts_only_even_budgets() {
    let fen = "7k/8/6K1/8/8/8/8/R7 b - - 0 1";

    let one = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Mate, 2));
    assert_eq!(one.result.unwrap(), 1);
    assert_eq!(one.lines, ["solution h8g8 a1a8#"]);

    // The one-move mate is still found, and counted, inside a two-move budget.
    let two = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Mate, 4));
    assert_eq!(two.result.unwrap(), 14);
    assert_eq!(two.lines.len(), 14);
    assert!(two.lines.contains(&"solution h8g8 a1a8#".to_string()));
    assert!(two.lines.contains(&"solution h8g8 g6f6 g8f8 a1a8#".to_string()));
}

#[test]
fn test_helpmate_odd_budget_counts_nothing() {
    let fen = "7k/8/6K1/8/8/8/8/R7 b - - 0 1";
    let outcome = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Mate, 3));
    assert_eq!(outcome.result.unwrap(), 0);
}

#[test]
fn test_helpdraw_needs_exact_depth() {
    let fen = "7k/8/8/8/1n6/8/2P5/7K w - - 0 1";

    let outcome = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Draw, 2));
    assert_eq!(outcome.result.unwrap(), 3);
    let mut lines = outcome.lines;
    lines.sort();
    assert_eq!(
        lines,
        [
            "solution h1g1 b4c2#",
            "solution h1g2 b4c2#",
            "solution h1h2 b4c2#"
        ]
    );
}

#[test]
fn test_dead_root_counts_only_at_zero_budget() {
    let fen = "8/8/8/4k3/8/4K3/8/8 w - - 0 1";

    let now = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Draw, 0));
    assert_eq!(now.result.unwrap(), 1);
    assert_eq!(now.lines, ["solution#"]);

    let later = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Draw, 2));
    assert_eq!(later.result.unwrap(), 0);
    assert!(later.lines.is_empty());
}

#[test]
fn test_forced_mate_counts() {
    let back_rank = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    let outcome = walk(back_rank, None, false, |s, p| s.competitive(p, 1));
    assert_eq!(outcome.result.unwrap(), 1);
    assert!(outcome.lines.is_empty(), "forced lines print only on request");

    let corner = "7k/8/6K1/8/8/8/8/R7 w - - 0 1";
    let outcome = walk(corner, None, false, |s, p| s.competitive(p, 1));
    assert_eq!(outcome.result.unwrap(), 1);
    let outcome = walk(corner, None, false, |s, p| s.competitive(p, 3));
    assert_eq!(outcome.result.unwrap(), 12);
}

#[test]
fn test_forced_mate_defender_escape_gives_zero() {
    // Ra8+ is met by Kg7.
    let fen = "6k1/8/8/8/8/8/8/R5K1 w - - 0 1";
    let outcome = walk(fen, None, false, |s, p| s.competitive(p, 1));
    assert_eq!(outcome.result.unwrap(), 0);
}

#[test]
fn test_forced_lines_reported_on_request() {
    let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    let outcome = walk(fen, None, true, |s, p| s.competitive(p, 1));
    assert_eq!(outcome.result.unwrap(), 1);
    assert_eq!(outcome.lines, ["solution a1a8#"]);
}

#[test]
fn test_node_limit_aborts_and_unwinds() {
    let fen = "7k/8/6K1/8/8/8/8/R7 b - - 0 1";
    let outcome = walk(fen, Some(10), false, |s, p| s.cooperative(p, Goal::Mate, 4));
    assert!(matches!(
        outcome.result,
        Err(SearchError::NodeLimit { nodes: 11 })
    ));
    assert_eq!(outcome.nodes, 11);

    let outcome = walk(fen, Some(10), false, |s, p| s.competitive(p, 3));
    assert!(matches!(outcome.result, Err(SearchError::NodeLimit { .. })));
}

#[test]
fn test_move_buffers_one_per_ply() {
    let fen = "7k/8/6K1/8/8/8/8/R7 b - - 0 1";

    let one = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Mate, 2));
    assert_eq!(one.buffers, 3);

    let two = walk(fen, None, false, |s, p| s.cooperative(p, Goal::Mate, 4));
    assert_eq!(two.buffers, 5);

    let corner = "7k/8/6K1/8/8/8/8/R7 w - - 0 1";
    let forced = walk(corner, None, false, |s, p| s.competitive(p, 3));
    assert_eq!(forced.result.unwrap(), 12);
    assert!(forced.buffers <= 4, "{} buffers for three plies", forced.buffers);
}
