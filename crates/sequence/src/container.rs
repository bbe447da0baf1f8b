//! crates/sequence/src/container.rs
//!
//! The ordered message container shared by seed import, replay and export.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use logging::{trace_sequence, warn_subsystem};
use protocol::Region;

use crate::error::{SequenceError, SequenceResult};
use crate::format::{Framing, WriteMode, decode_replay, encode};
use crate::message::Message;

/// Messages in protocol order.
///
/// Insertion order is the order messages are sent during replay. Dropping the
/// sequence releases every message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSequence {
    messages: Vec<Message>,
}

impl MessageSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Builds a sequence by cutting the seed file at `path` along `regions`.
    ///
    /// See [`from_reader`](Self::from_reader) for how region bytes are read.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::SeedOpen`] when the seed cannot be opened and
    /// [`SequenceError::Io`] when reading it fails.
    pub fn from_seed_file(path: &Path, regions: &[Region]) -> SequenceResult<Self> {
        let file = File::open(path).map_err(|source| SequenceError::SeedOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let sequence = Self::from_reader(BufReader::new(file), regions)?;
        trace_sequence!(
            path = %path.display(),
            messages = sequence.len(),
            "built sequence from seed"
        );
        Ok(sequence)
    }

    /// Builds a sequence by reading one message per region from `reader`.
    ///
    /// Each region contributes `end_byte - start_byte + 1` bytes taken from
    /// the reader's current position; regions are read back to back and
    /// their offsets are not used for seeking. When the reader runs dry the
    /// rest of the message is zero-filled, so a seed shorter than its
    /// regions still yields one message per region.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Io`] for read failures other than
    /// interruption.
    pub fn from_reader<R: Read>(mut reader: R, regions: &[Region]) -> SequenceResult<Self> {
        let mut messages = Vec::with_capacity(regions.len());
        for (index, region) in regions.iter().enumerate() {
            let mut data = vec![0u8; region.len()];
            let filled = read_up_to(&mut reader, &mut data)?;
            if filled < data.len() {
                warn_subsystem!(
                    "statewire::sequence",
                    index,
                    filled,
                    len = data.len(),
                    "seed shorter than its regions, zero-filling"
                );
            }
            messages.push(Message::new(data));
        }
        Ok(Self { messages })
    }

    /// Parses a replay-framed buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidFormat`] for malformed input.
    pub fn from_replay_bytes(bytes: &[u8]) -> SequenceResult<Self> {
        decode_replay(bytes).map(|messages| Self { messages })
    }

    /// Loads a replay file written with [`Framing::Replay`].
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Io`] when the file cannot be read and
    /// [`SequenceError::InvalidFormat`] when it is malformed.
    pub fn from_replay_file(path: &Path) -> SequenceResult<Self> {
        let bytes = fs::read(path)?;
        let sequence = Self::from_replay_bytes(&bytes)?;
        trace_sequence!(
            path = %path.display(),
            messages = sequence.len(),
            "loaded replay file"
        );
        Ok(sequence)
    }

    /// Appends a message.
    pub fn push(&mut self, message: impl Into<Message>) {
        self.messages.push(message.into());
    }

    /// Iterates messages in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Message at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// Most recently appended message.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` when the sequence holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Keeps the first `max_count` messages and drops the rest.
    pub fn truncate(&mut self, max_count: usize) {
        self.messages.truncate(max_count);
    }

    /// Drops every message, keeping the allocation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Combined payload size of all messages.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.messages.iter().map(|m| m.len() as u64).sum()
    }

    /// Message slice in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Writes at most `max_count` messages to `path` and returns the number
    /// of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Persist`] when the file cannot be opened in
    /// the requested `mode` or written.
    pub fn persist(
        &self,
        path: &Path,
        framing: Framing,
        max_count: usize,
        mode: WriteMode,
    ) -> SequenceResult<u64> {
        let bytes = encode(&self.messages, framing, max_count);
        let persist_err = |source: io::Error| SequenceError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let mut file = mode.open(path).map_err(persist_err)?;
        file.write_all(&bytes).map_err(persist_err)?;
        file.flush().map_err(persist_err)?;

        trace_sequence!(
            path = %path.display(),
            bytes = bytes.len(),
            messages = self.len().min(max_count),
            ?framing,
            "persisted sequence"
        );
        Ok(bytes.len() as u64)
    }

    /// Computes back-to-back regions matching message boundaries, for at most
    /// `max_count` messages.
    ///
    /// An empty message after the first yields a zero-length region whose
    /// end precedes its start.
    ///
    /// # Panics
    ///
    /// Panics when the first message is empty, which would put the first
    /// region's end before offset zero.
    #[must_use]
    pub fn to_regions(&self, max_count: usize) -> Vec<Region> {
        let mut regions = Vec::with_capacity(self.len().min(max_count));
        let mut start: i64 = 0;

        for message in self.messages.iter().take(max_count) {
            let end = start + i64::from(message.size()) - 1;
            assert!(end >= 0, "region end offset cannot be negative");
            // Offsets are bounded by the summed u32 message sizes.
            regions.push(Region::new(start as u32, end as u32));
            start = end + 1;
        }

        regions
    }

    /// Consumes the sequence and returns its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

/// Fills `buf` from `reader` until it is full or the reader is exhausted.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

impl<'a> IntoIterator for &'a MessageSequence {
    type Item = &'a Message;
    type IntoIter = core::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl IntoIterator for MessageSequence {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl FromIterator<Message> for MessageSequence {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl Extend<Message> for MessageSequence {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn bounds(regions: &[Region]) -> Vec<(u32, u32)> {
        regions
            .iter()
            .map(|region| (region.start_byte(), region.end_byte()))
            .collect()
    }

    #[test]
    fn reader_is_cut_along_regions() {
        let regions = [Region::new(0, 4), Region::new(5, 8)];
        let sequence = MessageSequence::from_reader(Cursor::new(b"PWD\r\nLS\r\n"), &regions).unwrap();
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.get(0).unwrap().data(), b"PWD\r\n");
        assert_eq!(sequence.last().unwrap().data(), b"LS\r\n");
    }

    #[test]
    fn region_offsets_are_not_used_for_seeking() {
        // Only region lengths matter; bytes are taken sequentially.
        let regions = [Region::new(10, 11), Region::new(50, 52)];
        let sequence = MessageSequence::from_reader(Cursor::new(b"abcde"), &regions).unwrap();
        assert_eq!(sequence.get(0).unwrap().data(), b"ab");
        assert_eq!(sequence.get(1).unwrap().data(), b"cde");
    }

    #[test]
    fn short_reader_zero_fills() {
        let regions = [Region::new(0, 2), Region::new(3, 6)];
        let sequence = MessageSequence::from_reader(Cursor::new(b"abcd"), &regions).unwrap();
        assert_eq!(sequence.get(1).unwrap().data(), b"d\0\0\0");
    }

    #[test]
    fn missing_seed_is_seed_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MessageSequence::from_seed_file(&dir.path().join("absent"), &[]).unwrap_err();
        assert!(matches!(err, SequenceError::SeedOpen { .. }));
    }

    #[test]
    fn regions_follow_message_sizes() {
        let sequence: MessageSequence = [&b"USER a\r\n"[..], b"PASS b\r\n", b"QUIT\r\n"]
            .into_iter()
            .map(Message::from)
            .collect();
        assert_eq!(
            bounds(&sequence.to_regions(usize::MAX)),
            vec![(0, 7), (8, 15), (16, 21)]
        );
        assert_eq!(bounds(&sequence.to_regions(2)), vec![(0, 7), (8, 15)]);
        assert!(sequence.to_regions(0).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot be negative")]
    fn empty_first_message_is_an_invariant_violation() {
        let mut sequence = MessageSequence::new();
        sequence.push(Vec::new());
        let _ = sequence.to_regions(1);
    }

    #[test]
    fn accessors_and_mutation() {
        let mut sequence = MessageSequence::new();
        assert!(sequence.is_empty());
        assert!(sequence.last().is_none());

        sequence.push(&b"one"[..]);
        sequence.push(b"three".to_vec());
        assert_eq!(sequence.total_size(), 8);
        assert_eq!(sequence.iter().count(), 2);

        sequence.truncate(1);
        assert_eq!(sequence.len(), 1);
        sequence.clear();
        assert!(sequence.is_empty());
    }

    #[test]
    fn persist_reports_bytes_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.replay");
        let sequence: MessageSequence = [b"abc".to_vec(), b"de".to_vec()]
            .into_iter()
            .map(Message::from)
            .collect();

        let written = sequence
            .persist(&path, Framing::Replay, usize::MAX, WriteMode::CreateNew)
            .unwrap();
        assert_eq!(written, 13);
        assert_eq!(fs::metadata(&path).unwrap().len(), 13);

        let err = sequence
            .persist(&path, Framing::Raw, 1, WriteMode::CreateNew)
            .unwrap_err();
        assert!(matches!(err, SequenceError::Persist { .. }));

        let written = sequence
            .persist(&path, Framing::Raw, 1, WriteMode::Overwrite)
            .unwrap();
        assert_eq!(written, 3);
        assert_eq!(fs::read(&path).unwrap(), b"abc");
    }

    #[test]
    fn replay_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.replay");
        let sequence: MessageSequence = [b"OPTIONS\r\n\r\n".to_vec(), b"PLAY\r\n\r\n".to_vec()]
            .into_iter()
            .map(Message::from)
            .collect();

        sequence
            .persist(&path, Framing::Replay, usize::MAX, WriteMode::Overwrite)
            .unwrap();
        assert_eq!(MessageSequence::from_replay_file(&path).unwrap(), sequence);
    }

    #[cfg(unix)]
    #[test]
    fn persisted_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private.replay");
        MessageSequence::new()
            .persist(&path, Framing::Replay, 0, WriteMode::CreateNew)
            .unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
