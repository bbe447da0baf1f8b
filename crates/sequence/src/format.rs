//! crates/sequence/src/format.rs
//!
//! On-disk layouts for message sequences.
//!
//! A replay file is a plain concatenation of records, each a native-endian
//! `u32` payload length followed by the payload. A raw file is the payloads
//! concatenated with no framing, the same shape as a seed.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::{SequenceError, SequenceResult};
use crate::message::Message;

/// Width of the length prefix in replay framing.
pub const SIZE_PREFIX_LEN: usize = 4;

/// How messages are laid out when persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Framing {
    /// Each payload is preceded by its size; the file can be replayed.
    #[default]
    Replay,
    /// Payloads are concatenated; the file can be used as a seed.
    Raw,
}

/// What to do when the output file already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WriteMode {
    /// Fail instead of touching an existing file.
    #[default]
    CreateNew,
    /// Create the file, or truncate it if it exists.
    Overwrite,
}

impl WriteMode {
    /// Opens `path` for writing according to this mode, owner-only on unix.
    pub(crate) fn open(self, path: &Path) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true);
        match self {
            Self::CreateNew => options.create_new(true),
            Self::Overwrite => options.create(true).truncate(true),
        };
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        options.open(path)
    }
}

/// Serialises up to `max_count` messages with the given framing.
#[must_use]
pub fn encode<'a, I>(messages: I, framing: Framing, max_count: usize) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut out = Vec::new();
    for message in messages.into_iter().take(max_count) {
        if framing == Framing::Replay {
            out.extend_from_slice(&message.size().to_ne_bytes());
        }
        out.extend_from_slice(message.data());
    }
    out
}

/// Parses replay-framed bytes into messages.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidFormat`] when a size prefix is cut short
/// or a payload runs past the end of `bytes`. Zero-length records are kept
/// as empty messages.
pub fn decode_replay(bytes: &[u8]) -> SequenceResult<Vec<Message>> {
    let mut messages = Vec::new();
    let mut rest = bytes;

    while !rest.is_empty() {
        let index = messages.len();
        let Some((prefix, body)) = rest.split_first_chunk::<SIZE_PREFIX_LEN>() else {
            return Err(SequenceError::InvalidFormat(format!(
                "record {index} has a {}-byte size prefix",
                rest.len()
            )));
        };

        let size = u32::from_ne_bytes(*prefix) as usize;
        if body.len() < size {
            return Err(SequenceError::InvalidFormat(format!(
                "record {index} declares {size} bytes but only {} remain",
                body.len()
            )));
        }

        let (payload, tail) = body.split_at(size);
        messages.push(Message::from(payload));
        rest = tail;
    }

    Ok(messages)
}
