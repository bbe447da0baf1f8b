//! crates/protocol/src/record.rs
//!
//! Constants and helpers shared by the DTLS 1.2 record segmenter and
//! interpreter.
//!
//! A DTLS record header is 13 bytes: content type (1), version (2),
//! epoch (2), sequence number (6) and body length (2). Handshake bodies start
//! with a 12-byte handshake header whose fragment length lives at offset 9.

/// Change-cipher-spec content type.
pub const CHANGE_CIPHER_SPEC: u8 = 20;

/// Alert content type.
pub const ALERT: u8 = 21;

/// Handshake content type.
pub const HANDSHAKE: u8 = 22;

/// Content types that mark a record boundary when followed by [`DTLS12_VERSION`].
pub const BOUNDARY_CONTENT_TYPES: [u8; 3] = [HANDSHAKE, CHANGE_CIPHER_SPEC, ALERT];

/// Wire version of DTLS 1.2.
pub const DTLS12_VERSION: [u8; 2] = [0xFE, 0xFD];

/// Length of the fixed record header.
pub const RECORD_HEADER_LEN: usize = 13;

/// Offset of the big-endian u16 body length inside the record header.
pub const RECORD_LENGTH_OFFSET: usize = 11;

/// Length of the handshake header preceding each handshake fragment.
pub const HANDSHAKE_HEADER_LEN: u32 = 12;

/// Offset (from the record start) of the big-endian u24 fragment length.
pub const FRAGMENT_LENGTH_OFFSET: usize = 22;

/// Remaining-byte threshold above which the fragment length can be read.
pub const FRAGMENT_GUARD: usize = 24;

/// Reads a big-endian unsigned integer of `width` bytes at `offset`.
///
/// `width` must be in `1..=4`; anything else is a programming error and
/// panics. Callers are expected to have bounds-checked `offset + width`.
#[must_use]
pub fn read_be_uint(buf: &[u8], offset: usize, width: usize) -> u32 {
    assert!(
        (1..=4).contains(&width),
        "big-endian reads support 1 to 4 bytes, requested {width}"
    );
    buf[offset..offset + width]
        .iter()
        .fold(0u32, |value, &byte| (value << 8) | u32::from(byte))
}

/// Returns `true` when a record header starts at `pos`: a boundary content
/// type followed by both DTLS 1.2 version bytes.
#[must_use]
pub fn starts_record(buf: &[u8], pos: usize) -> bool {
    buf.get(pos)
        .is_some_and(|content_type| BOUNDARY_CONTENT_TYPES.contains(content_type))
        && has_dtls12_version(buf, pos)
}

/// Returns `true` when the two bytes after `pos` carry the DTLS 1.2 version.
#[must_use]
pub fn has_dtls12_version(buf: &[u8], pos: usize) -> bool {
    buf.get(pos + 1..pos + 3) == Some(&DTLS12_VERSION[..])
}
