#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `sequence` turns segmented seeds into ordered protocol messages and moves
//! them between memory and disk.
//!
//! A [`MessageSequence`] is built from a seed file and the regions a
//! segmenter found in it, persisted in one of two [`Framing`]s, and loaded
//! back for replay:
//!
//! - [`Framing::Replay`] prefixes each payload with its size as a
//!   native-endian `u32`. Replay drivers read it back with
//!   [`MessageSequence::from_replay_file`].
//! - [`Framing::Raw`] concatenates payloads, producing a file that can be
//!   segmented again like any seed.
//!
//! [`MessageSequence::to_regions`] recovers the region list a raw export
//! corresponds to.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use protocol::Protocol;
//! use sequence::{Framing, MessageSequence};
//!
//! let seed = b"USER anonymous\r\nPASS guest\r\nQUIT\r\n";
//! let regions = Protocol::Ftp.segment(seed);
//! let messages = MessageSequence::from_reader(Cursor::new(seed), &regions).unwrap();
//!
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages.to_regions(usize::MAX), regions);
//!
//! let replay = sequence::encode(&messages, Framing::Replay, usize::MAX);
//! assert_eq!(MessageSequence::from_replay_bytes(&replay).unwrap(), messages);
//! ```

mod container;
mod error;
mod format;
mod message;

pub use container::MessageSequence;
pub use error::{SequenceError, SequenceResult};
pub use format::{Framing, SIZE_PREFIX_LEN, WriteMode, decode_replay, encode};
pub use message::Message;
