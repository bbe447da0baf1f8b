//! crates/cli/src/error.rs
//!
//! Errors surfaced by subcommands and their exit codes.

use std::io;
use std::path::PathBuf;

use protocol::EndpointError;
use sequence::SequenceError;
use thiserror::Error;
use transport::TransportError;

/// Exit code for invalid command lines.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Exit code for file errors.
pub const FILE_IO_EXIT_CODE: i32 = 2;

/// Exit code for connection and socket errors.
pub const SOCKET_IO_EXIT_CODE: i32 = 3;

/// Result type for subcommands.
pub type CliResult<T> = Result<T, CliError>;

/// Failures of a subcommand after its arguments were parsed.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("unable to read '{}': {source}", path.display())]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Writing an output file failed.
    #[error("unable to write '{}': {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Writing to standard output failed.
    #[error("unable to write output: {0}")]
    Output(
        #[from]
        #[source]
        io::Error,
    ),
    /// Building, loading or persisting a message sequence failed.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// The network descriptor is malformed.
    #[error("invalid network descriptor: {0}")]
    Endpoint(#[from] EndpointError),
    /// No address of the endpoint accepted a connection.
    #[error("unable to connect to {endpoint}: {source}")]
    Connect {
        /// Descriptor of the server under test.
        endpoint: String,
        /// Error from the last address tried.
        #[source]
        source: io::Error,
    },
    /// A socket operation failed during replay.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CliError {
    /// Process exit code reported for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Endpoint(_) => USAGE_EXIT_CODE,
            Self::Connect { .. } | Self::Transport(_) => SOCKET_IO_EXIT_CODE,
            Self::Read { .. } | Self::Write { .. } | Self::Output(_) | Self::Sequence(_) => {
                FILE_IO_EXIT_CODE
            }
        }
    }
}
