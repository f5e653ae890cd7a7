//! The problem loop: one request per input line, answered on the output.

use std::io::{self, BufRead, Write};

use solver::{Problem, SearchError, Solver};
use tracing::{debug, warn};

pub fn banner() -> String {
    format!("Retrospective Chess version {}", env!("CARGO_PKG_VERSION"))
}

/// Print the banner, then answer each line of `input` until `quit` or end
/// of input. Bad lines get an `error` reply and the loop moves on; only a
/// failure to write the output ends it early.
///
/// Solutions are streamed as they are found, so a problem that hits the node
/// limit may print some `solution` lines before its `aborted nodes` reply.
pub fn run<R, W>(solver: &mut Solver, input: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", banner())?;
    out.flush()?;

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        match Problem::parse(line) {
            Ok(mut problem) => {
                debug!(%problem, "solving");
                match solver.solve(&mut problem, out) {
                    Ok(nsols) => writeln!(out, "finished nsols {nsols}")?,
                    Err(SearchError::NodeLimit { nodes }) => {
                        writeln!(out, "aborted nodes {nodes}")?;
                    }
                    Err(SearchError::Output(err)) => return Err(err),
                }
            }
            Err(err) => {
                warn!(line, "rejected problem: {err}");
                writeln!(out, "error {err}")?;
            }
        }
        out.flush()?;
    }
    Ok(())
}
