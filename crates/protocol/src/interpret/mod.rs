//! crates/protocol/src/interpret/mod.rs
//!
//! Response interpreters that reduce a server's reply stream to a
//! [`StateSequence`].
//!
//! Interpreters never fail: bytes they cannot make sense of are skipped or
//! classified with the reserved unknown/malformed subtypes, and the result
//! always starts with the [`NO_RESPONSE`](crate::NO_RESPONSE) sentinel.

mod records;
mod status_line;

pub use records::interpret_dtls12;
pub use status_line::{RTSP_SIGNATURE, interpret_ftp, interpret_rtsp, parse_status_code};

use crate::Protocol;
use crate::state::StateSequence;

/// Interprets `buf` as responses of `protocol`.
#[must_use]
pub fn interpret(protocol: Protocol, buf: &[u8]) -> StateSequence {
    match protocol {
        Protocol::Rtsp => interpret_rtsp(buf),
        Protocol::Ftp => interpret_ftp(buf),
        Protocol::Dtls12 => interpret_dtls12(buf),
    }
}
