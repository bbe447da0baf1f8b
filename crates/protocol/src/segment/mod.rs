//! crates/protocol/src/segment/mod.rs
//!
//! Request segmenters that split a seed or captured client stream into
//! protocol messages.
//!
//! Every segmenter is a pure function over a byte slice. For non-empty input
//! the returned regions always tile the buffer exactly (see
//! [`covers_exactly`](crate::covers_exactly)); malformed input degrades to a
//! single region spanning the whole buffer instead of failing.

mod delimited;
mod records;

pub use delimited::{CRLF, DOUBLE_CRLF, segment_delimited};
pub use records::segment_dtls12;

use crate::Protocol;
use crate::region::Region;

/// Segments `buf` with the framing rules of `protocol`.
#[must_use]
pub fn segment(protocol: Protocol, buf: &[u8]) -> Vec<Region> {
    match protocol {
        Protocol::Rtsp => segment_delimited(buf, DOUBLE_CRLF),
        Protocol::Ftp => segment_delimited(buf, CRLF),
        Protocol::Dtls12 => segment_dtls12(buf),
    }
}
