//! crates/protocol/src/segment/records.rs
//!
//! Heuristic segmentation of DTLS 1.2 datagram captures.

use logging::trace_segment;

use crate::record::starts_record;
use crate::region::Region;

/// Offsets up to and including this one never start a new region.
const MIN_BOUNDARY_OFFSET: usize = 3;

/// Splits a DTLS 1.2 capture on recognisable record headers.
///
/// This is a re-synchronisation scan rather than a length-prefixed parse: a
/// new region begins at every offset beyond the first three bytes where a
/// handshake, change-cipher-spec or alert content type is followed by the
/// DTLS 1.2 version. Lost or corrupted records therefore only affect the
/// region they sit in. The final byte always closes the last region.
#[must_use]
pub fn segment_dtls12(buf: &[u8]) -> Vec<Region> {
    let mut regions = Vec::new();
    let Some(last) = buf.len().checked_sub(1) else {
        return regions;
    };

    let mut start = 0usize;
    for pos in 0..buf.len() {
        if pos > MIN_BOUNDARY_OFFSET && starts_record(buf, pos) {
            regions.push(Region::new(start as u32, (pos - 1) as u32));
            start = pos;
        } else if pos == last {
            regions.push(Region::new(start as u32, pos as u32));
        }
    }

    trace_segment!(
        len = buf.len(),
        regions = regions.len(),
        "dtls record segmentation"
    );
    regions
}
