#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `statewire` command-line front-end. It parses the
//! command line with a [`clap`](https://docs.rs/clap/) builder definition and
//! dispatches to one of four subcommands:
//!
//! - `segment -P <proto> <seed>` prints the request regions of a seed and can
//!   save them as a report or as a replay file.
//! - `interpret -P <proto> <response>` prints the state sequence and label of
//!   a captured server response.
//! - `convert <replay> <raw>` exports a replay file as unframed messages.
//! - `replay -P <proto> -N <endpoint> <replay>` sends a replay file to a live
//!   server and labels the state sequence it answers with.
//!
//! # Design
//!
//! [`run`] accepts an argument iterator together with handles for standard
//! output and error, so tests drive the whole front-end in-process. Global
//! `-v` and `--debug` options configure [`logging`] before the subcommand
//! runs; diagnostics go through `tracing` to standard error.
//!
//! # Errors
//!
//! Invalid command lines and malformed network descriptors exit with
//! [`USAGE_EXIT_CODE`]; file failures with [`FILE_IO_EXIT_CODE`]; connection
//! and socket failures with [`SOCKET_IO_EXIT_CODE`].
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["statewire", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("statewire "));
//! assert!(stderr.is_empty());
//! ```

mod command;
mod commands;
#[cfg(unix)]
mod connect;
mod error;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

pub use command::PROGRAM_NAME;
pub use commands::ReplayOptions;
#[cfg(unix)]
pub use connect::Connection;
pub use error::{CliError, CliResult, FILE_IO_EXIT_CODE, SOCKET_IO_EXIT_CODE, USAGE_EXIT_CODE};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the front-end and returns the process exit code.
///
/// Help and version requests are written to `stdout` and succeed; every
/// other diagnostic goes to `stderr` prefixed with the program name.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let invocation = match command::parse_args(arguments) {
        Ok(invocation) => invocation,
        Err(error) => {
            let rendered = error.render().to_string();
            if error.use_stderr() {
                let _ = write!(stderr, "{rendered}");
                return USAGE_EXIT_CODE;
            }
            if stdout.write_all(rendered.as_bytes()).is_err() {
                return USAGE_EXIT_CODE;
            }
            return 0;
        }
    };

    let verbosity = match invocation.verbosity() {
        Ok(config) => config,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: invalid --debug value: {error}");
            return USAGE_EXIT_CODE;
        }
    };
    // A subscriber may already be installed when run is called repeatedly.
    let _ = logging::init_tracing(&verbosity);

    match commands::execute(invocation.action, stdout) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.exit_code()
        }
    }
}

/// Converts a [`run`] status into an [`ExitCode`], clamping out-of-range values.
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_args(args: &[&str]) -> (i32, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(args.iter().copied(), &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, stdout, stderr) = run_with_args(&["statewire", "--help"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("segment"));
        assert!(stdout.contains("replay"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn missing_subcommand_shows_help_and_fails() {
        let (code, _, stderr) = run_with_args(&["statewire"]);
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(stderr.contains("Usage"));
    }

    #[test]
    fn unknown_debug_flag_is_a_usage_error() {
        let (code, stdout, stderr) =
            run_with_args(&["statewire", "--debug", "bogus", "convert", "a", "b"]);
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(stdout.is_empty());
        assert!(stderr.contains("--debug"));
    }

    #[test]
    fn command_failures_report_their_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.raw");
        let missing = missing.to_str().unwrap();
        let (code, _, stderr) = run_with_args(&["statewire", "segment", "-P", "ftp", missing]);
        assert_eq!(code, FILE_IO_EXIT_CODE);
        assert!(stderr.starts_with("statewire: unable to read"));
    }

    #[test]
    fn exit_codes_are_clamped() {
        assert_eq!(exit_code_from(-4), ExitCode::from(0));
        assert_eq!(exit_code_from(3), ExitCode::from(3));
        assert_eq!(exit_code_from(999), ExitCode::from(u8::MAX));
    }
}
