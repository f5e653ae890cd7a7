use std::io::Cursor;

use retro_cli::{banner, run};
use solver::{Solver, SolverConfig};

fn session(config: SolverConfig, input: &str) -> Vec<String> {
    let mut solver = Solver::new(config);
    let mut out = Vec::new();
    run(&mut solver, Cursor::new(input), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn banner_names_the_version() {
    assert_eq!(banner(), format!("Retrospective Chess version {}", env!("CARGO_PKG_VERSION")));
    let lines = session(SolverConfig::default(), "");
    assert_eq!(lines, [banner()]);
}

#[test]
fn solutions_then_summary_per_line() {
    let input = "h#1 7k/8/6K1/8/8/8/8/R7 b - - 0 1\n\
                 #1 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1\n\
                 h=1 8/5p2/5P2/8/1p2pP2/kP2p3/1pKpP3/3B4 b - f3\n";
    let lines = session(SolverConfig::default(), input);
    assert_eq!(
        lines[1..],
        [
            "solution h8g8 a1a8#",
            "finished nsols 1",
            "finished nsols 1",
            "solution b2b1r c2b1#",
            "finished nsols 1",
        ]
    );
}

#[test]
fn bad_lines_report_errors_and_continue() {
    let input = "\n\
                 x3 8/8/8/8/8/8/8/8 w\n\
                 h#0 7k/8/6K1/8/8/8/8/R7 b\n\
                 h#1 8/8/8/8/8/8/8/8 w\n\
                 h#1\n\
                 h#1 7k/8/6K1/8/8/8/8/R7 b\n";
    let lines = session(SolverConfig::default(), input);
    assert_eq!(lines.len(), 7, "{lines:?}");
    assert_eq!(lines[1], "error unknown stipulation 'x3'");
    assert_eq!(lines[2], "error move count in 'h#0' must be a positive integer");
    assert!(lines[3].starts_with("error invalid position"), "{}", lines[3]);
    assert_eq!(lines[4], "error missing position after stipulation");
    assert_eq!(lines[5..], ["solution h8g8 a1a8#", "finished nsols 1"]);
}

#[test]
fn quit_stops_reading() {
    let input = "quit\nh#1 7k/8/6K1/8/8/8/8/R7 b - - 0 1\n";
    assert_eq!(session(SolverConfig::default(), input), [banner()]);
}

#[test]
fn node_limit_reports_abort_and_continues() {
    let config = SolverConfig {
        node_limit: Some(25),
        ..SolverConfig::default()
    };
    let input = "h#2 7k/8/6K1/8/8/8/8/R7 b - - 0 1\n\
                 h#1 7k/8/6K1/8/8/8/8/R7 b - - 0 1\n";
    let lines = session(config, input);
    // Lines found before the limit was hit stay printed; no summary follows them.
    let abort = lines
        .iter()
        .position(|l| l == "aborted nodes 26")
        .unwrap_or_else(|| panic!("no abort line in {lines:?}"));
    assert!(abort > 1, "expected streamed solutions before the abort: {lines:?}");
    assert!(lines[1..abort].iter().all(|l| l.starts_with("solution ")), "{lines:?}");
    assert!(!lines[..abort].iter().any(|l| l.starts_with("finished")));
    assert_eq!(lines[abort + 1..], ["solution h8g8 a1a8#", "finished nsols 1"]);
}

#[test]
fn forced_lines_printed_when_enabled() {
    let config = SolverConfig {
        report_forced_lines: true,
        ..SolverConfig::default()
    };
    let lines = session(config, "#1 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1\n");
    assert_eq!(lines[1..], ["solution a1a8#", "finished nsols 1"]);
}
