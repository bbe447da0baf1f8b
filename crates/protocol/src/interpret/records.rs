//! crates/protocol/src/interpret/records.rs
//!
//! Classification of DTLS 1.2 response records into state codes.

use logging::trace_interpret;

use crate::record::{
    ALERT, CHANGE_CIPHER_SPEC, FRAGMENT_GUARD, FRAGMENT_LENGTH_OFFSET, HANDSHAKE,
    HANDSHAKE_HEADER_LEN, RECORD_HEADER_LEN, RECORD_LENGTH_OFFSET, has_dtls12_version,
    read_be_uint,
};
use crate::state::{
    MALFORMED_SUBTYPE, StateSequence, UNKNOWN_CATEGORY, UNKNOWN_SUBTYPE, state_code,
};

/// Converts a DTLS 1.2 response stream into `(content_type << 8) | subtype`
/// state codes.
///
/// Records whose body is encrypted cannot be classified and carry
/// [`UNKNOWN_SUBTYPE`]; handshake records too short to hold a fragment header
/// carry [`MALFORMED_SUBTYPE`]. Bytes that do not start a record are skipped
/// one at a time.
#[must_use]
pub fn interpret_dtls12(buf: &[u8]) -> StateSequence {
    let mut states = StateSequence::new();
    let mut pos = 0usize;

    while pos < buf.len() {
        let remaining = buf.len() - pos;
        if remaining <= RECORD_HEADER_LEN || !has_dtls12_version(buf, pos) {
            pos += 1;
            continue;
        }

        let record_len = read_be_uint(buf, pos + RECORD_LENGTH_OFFSET, 2);
        let code = classify_record(buf, pos, record_len);
        trace_interpret!(offset = pos, record_len, code, "dtls record");
        states.push(code);

        // A zero declared length would otherwise pin the scan in place.
        pos += (record_len as usize).max(1);
    }

    states
}

/// Classifies the record at `pos`; the caller has checked that the full
/// header and the first body byte are in bounds.
fn classify_record(buf: &[u8], pos: usize, record_len: u32) -> u32 {
    let content_type = buf[pos];
    let body = pos + RECORD_HEADER_LEN;

    match content_type {
        HANDSHAKE => {
            let message_type = buf[body];
            if buf.len() - pos <= FRAGMENT_GUARD {
                return state_code(HANDSHAKE, MALFORMED_SUBTYPE);
            }
            let fragment_len = read_be_uint(buf, pos + FRAGMENT_LENGTH_OFFSET, 3);
            // Plaintext handshakes carry exactly one fragment after the header.
            if fragment_len.checked_add(HANDSHAKE_HEADER_LEN) == Some(record_len) {
                state_code(HANDSHAKE, message_type)
            } else {
                state_code(HANDSHAKE, UNKNOWN_SUBTYPE)
            }
        }
        CHANGE_CIPHER_SPEC => {
            if record_len == 1 {
                state_code(CHANGE_CIPHER_SPEC, buf[body])
            } else {
                state_code(CHANGE_CIPHER_SPEC, UNKNOWN_SUBTYPE)
            }
        }
        ALERT => {
            if record_len != 2 {
                return state_code(ALERT, UNKNOWN_SUBTYPE);
            }
            // Level at body[0], description at body[1].
            buf.get(body + 1).map_or(
                state_code(ALERT, MALFORMED_SUBTYPE),
                |&description| state_code(ALERT, description),
            )
        }
        _ => state_code(UNKNOWN_CATEGORY, UNKNOWN_SUBTYPE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content_type: u8, body: &[u8]) -> Vec<u8> {
        let mut bytes = vec![content_type, 0xFE, 0xFD, 0, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend_from_slice(&(body.len() as u16).to_be_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    fn handshake(message_type: u8, fragment: &[u8]) -> Vec<u8> {
        let len = fragment.len() as u32;
        let mut body = vec![message_type];
        body.extend_from_slice(&len.to_be_bytes()[1..]);
        body.extend_from_slice(&[0, 0, 0, 0, 0]);
        body.extend_from_slice(&len.to_be_bytes()[1..]);
        body.extend_from_slice(fragment);
        record(HANDSHAKE, &body)
    }

    #[test]
    fn single_alert_yields_its_description() {
        let mut buf = record(ALERT, &[2, 40]);
        buf.push(0);
        assert_eq!(interpret_dtls12(&buf).codes(), &[0, (21 << 8) | 40]);
    }

    #[test]
    fn exact_alert_record_is_classified() {
        let buf = record(ALERT, &[1, 0]);
        assert_eq!(buf.len(), 15);
        assert_eq!(interpret_dtls12(&buf).codes()[1], 21 << 8);
    }

    #[test]
    fn encrypted_alert_is_unknown_subtype() {
        let buf = record(ALERT, &[0xAA; 26]);
        assert_eq!(interpret_dtls12(&buf).codes()[1], (21 << 8) | 0xFF);
    }

    #[test]
    fn plaintext_handshake_yields_message_type() {
        let buf = handshake(2, &[0x11; 20]);
        assert_eq!(interpret_dtls12(&buf).codes()[1], (22 << 8) | 2);
    }

    #[test]
    fn encrypted_handshake_is_unknown_subtype() {
        let buf = record(HANDSHAKE, &[0x5A; 40]);
        assert_eq!(interpret_dtls12(&buf).codes()[1], (22 << 8) | 0xFF);
    }

    #[test]
    fn short_handshake_is_malformed() {
        let buf = record(HANDSHAKE, &[1, 2, 3]);
        assert_eq!(interpret_dtls12(&buf).codes(), &[0, (22 << 8) | 0xFE]);
    }

    #[test]
    fn change_cipher_spec_plaintext_and_encrypted() {
        let plain = record(CHANGE_CIPHER_SPEC, &[1]);
        assert_eq!(interpret_dtls12(&plain).codes()[1], (20 << 8) | 1);

        let encrypted = record(CHANGE_CIPHER_SPEC, &[9; 16]);
        assert_eq!(interpret_dtls12(&encrypted).codes()[1], (20 << 8) | 0xFF);
    }

    #[test]
    fn unknown_content_type_is_fully_unknown() {
        let buf = record(0x17, &[0; 8]);
        assert_eq!(interpret_dtls12(&buf).codes()[1], 0xFFFF);
    }

    #[test]
    fn garbage_and_empty_input_yield_only_sentinel() {
        assert_eq!(interpret_dtls12(&[]).codes(), &[0]);
        assert_eq!(interpret_dtls12(&[0x42; 64]).codes(), &[0]);
    }

    #[test]
    fn zero_length_record_does_not_stall() {
        let mut buf = record(0x17, &[]);
        buf.extend_from_slice(&[0; 4]);
        let states = interpret_dtls12(&buf);
        assert_eq!(states.codes()[1], 0xFFFF);
    }

    #[test]
    fn leading_noise_is_skipped_byte_by_byte() {
        let mut buf = vec![0u8; RECORD_HEADER_LEN];
        buf.extend(record(CHANGE_CIPHER_SPEC, &[1]));
        let states = interpret_dtls12(&buf);
        assert_eq!(states.codes(), &[0, (20 << 8) | 1]);
    }
}
