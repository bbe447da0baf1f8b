//! crates/sequence/src/error.rs
//!
//! Error types for message sequence construction and persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for message sequence operations.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Errors that can occur while building, loading or saving a sequence.
#[derive(Debug, Error)]
pub enum SequenceError {
    /// I/O error while reading message bytes.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
    /// The seed file could not be opened.
    #[error("cannot open seed file '{}': {source}", path.display())]
    SeedOpen {
        /// Path of the seed file.
        path: PathBuf,
        /// Underlying open error.
        #[source]
        source: io::Error,
    },
    /// The output file could not be created or written.
    #[error("unable to write messages to '{}': {source}", path.display())]
    Persist {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying write error.
        #[source]
        source: io::Error,
    },
    /// A replay file is truncated.
    #[error("Invalid replay format: {0}")]
    InvalidFormat(String),
}
