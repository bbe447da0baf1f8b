//! crates/cli/src/commands/mod.rs
//!
//! Subcommand implementations. Each takes its parsed arguments and the
//! standard output handle and reports failures as [`CliError`](crate::CliError).

mod convert;
mod interpret;
mod replay;
mod segment;

use std::fs;
use std::io::Write;
use std::path::Path;

pub use replay::ReplayOptions;

use crate::command::Action;
use crate::error::{CliError, CliResult};

/// Runs the subcommand selected by `action`.
pub(crate) fn execute<W: Write>(action: Action, stdout: &mut W) -> CliResult<()> {
    match action {
        Action::Segment(args) => segment::run(args, stdout),
        Action::Interpret(args) => interpret::run(&args, stdout),
        Action::Convert(args) => convert::run(&args, stdout),
        Action::Replay(args) => replay::run(args, stdout),
    }
}

fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
