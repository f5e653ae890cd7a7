//! Command-line plumbing for the `retro` binary: argument handling and the
//! stdin/stdout problem loop.

pub mod args;
pub mod session;

pub use args::Args;
pub use session::{banner, run};
