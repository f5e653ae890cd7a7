//! Composed problems with published solution counts.

use std::time::Instant;

use rayon::prelude::*;

use solver::{Problem, Solver};

const FULL_SUITE_ENV: &str = "FULL_SUITE";

struct Case {
    composer: &'static str,
    line: &'static str,
    nsols: u64,
    /// Printed lines, when pinned down.
    solutions: &'static [&'static str],
    slow: bool,
}

const CASES: &[Case] = &[
    Case {
        composer: "Jeff Coakley, 1977",
        line: "h#3 8/4K2k/4P2p/8/5q2/2b5/8/8 b - - 0 1",
        nsols: 1,
        solutions: &["solution f4b8 e7f7 c3h8 e6e7 b8f8 e7f8n#"],
        slow: false,
    },
    Case {
        composer: "Sam Loyd, 1860",
        line: "h#3 6R1/7q/8/5k2/5B2/8/5Kbb/8 b - - 0 1",
        nsols: 1,
        solutions: &[],
        slow: true,
    },
    Case {
        composer: "Josef Jana, 1928",
        line: "h#3 r3k3/3N4/2N5/8/1K6/8/7p/8 b q - 0 1",
        nsols: 1,
        solutions: &[],
        slow: true,
    },
    Case {
        composer: "Chris Feather, 1975",
        line: "h#2 1RrB2b1/8/4n3/2n3p1/2K2b2/1p1rk3/6BR/8 b - - 0 1",
        nsols: 2,
        solutions: &[
            "solution d3d8 g2c6 c5d7 b8b3#",
            "solution f4b8 g2d5 e6c7 d8g5#",
        ],
        slow: false,
    },
    Case {
        composer: "Milan Vukcevich, 1996",
        line: "h#2 4K2n/3P1P2/4k3/3p4/8/8/8/8 b - - 0 1",
        nsols: 1,
        solutions: &["solution h8g6 f7f8q g6e5 d7d8n#"],
        slow: false,
    },
    Case {
        composer: "Roddy McKay, 2021",
        line: "h#2 8/1B6/3p1P1q/4ppB1/1p3b2/1Pk3p1/2P4p/1K6 b - -",
        nsols: 1,
        solutions: &["solution f4c1 g5c1 h6d2 c1b2#"],
        slow: false,
    },
    Case {
        composer: "Neal Turner, 1995",
        line: "h#3 q1b1n1K1/2P1P3/8/3k4/8/8/8/8 b - -",
        nsols: 1,
        solutions: &[],
        slow: true,
    },
    Case {
        composer: "Andrew Buchanan, 2017",
        line: "h=1 8/5p2/5P2/8/1p2pP2/kP2p3/1pKpP3/3B4 b - f3",
        nsols: 1,
        solutions: &["solution b2b1r c2b1#"],
        slow: false,
    },
];

#[test]
fn composed_problems_have_published_counts() {
    let full = std::env::var(FULL_SUITE_ENV).is_ok();

    CASES.par_iter().for_each(|case| {
        if case.slow && !full {
            eprintln!(
                "Skipping {} ({}), set {FULL_SUITE_ENV}=1 to run it.",
                case.composer, case.line
            );
            return;
        }

        let start = Instant::now();
        let mut problem = Problem::parse(case.line).unwrap();
        let mut solver = Solver::default();
        let mut out = Vec::new();
        let nsols = solver.solve(&mut problem, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(nsols, case.nsols, "{}: {}", case.composer, case.line);
        if !case.solutions.is_empty() {
            assert_eq!(
                text.lines().collect::<Vec<_>>(),
                case.solutions,
                "{}",
                case.composer
            );
        }
        println!(
            "{}: nsols {nsols}, {} nodes in {:.3?}",
            case.composer,
            solver.nodes(),
            start.elapsed()
        );
    });
}
