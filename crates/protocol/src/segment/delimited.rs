//! crates/protocol/src/segment/delimited.rs
//!
//! Segmentation of text protocols whose requests end with a fixed terminator.

use logging::trace_segment;

use crate::region::Region;

/// Terminator of line-oriented control protocols (FTP).
pub const CRLF: &[u8] = b"\r\n";

/// Terminator of header-block protocols (RTSP).
pub const DOUBLE_CRLF: &[u8] = b"\r\n\r\n";

/// Splits `buf` into regions that each end with `terminator`.
///
/// The scan consumes one byte at a time. A message ends the instant its last
/// `terminator.len()` bytes equal the terminator, provided the final
/// terminator byte sits at least `terminator.len()` bytes into the message,
/// and the next region starts at the following byte. Bytes after the last
/// terminator form one final region, so a buffer without any terminator
/// becomes a single region spanning all of it.
///
/// An empty buffer yields no regions.
#[must_use]
pub fn segment_delimited(buf: &[u8], terminator: &[u8]) -> Vec<Region> {
    debug_assert!(!terminator.is_empty(), "terminator must not be empty");

    let mut regions = Vec::new();
    let width = terminator.len();
    let mut start = 0usize;

    for end in 0..buf.len() {
        if end - start >= width && &buf[end + 1 - width..=end] == terminator {
            regions.push(Region::new(start as u32, end as u32));
            start = end + 1;
        }
    }

    if start < buf.len() {
        regions.push(Region::new(start as u32, (buf.len() - 1) as u32));
    }

    trace_segment!(
        len = buf.len(),
        regions = regions.len(),
        terminator = width,
        "delimited segmentation"
    );
    regions
}
