//! crates/protocol/src/error.rs
//!
//! Error types for descriptor and dialect parsing.

use thiserror::Error;

use crate::endpoint::MAX_DESCRIPTOR_LEN;

/// Errors produced while parsing a `<tcp|udp>:/<host>/<port>` descriptor.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EndpointError {
    /// The descriptor exceeds the accepted length.
    #[error("network descriptor is {0} bytes, limit is {MAX_DESCRIPTOR_LEN}")]
    TooLong(usize),
    /// Splitting on `/` did not yield scheme, host and port.
    #[error("network descriptor has {0} fields, expected 3 (<tcp|udp>:/<host>/<port>)")]
    WrongTokenCount(usize),
    /// The scheme is neither `tcp:` nor `udp:`.
    #[error("unknown transport scheme {0:?}, expected \"tcp:\" or \"udp:\"")]
    UnknownScheme(String),
    /// The port field is zero, non-numeric or out of range.
    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

/// Error returned when a protocol name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unsupported protocol {name:?}, expected one of RTSP, FTP, DTLS12")]
pub struct ParseProtocolError {
    name: String,
}

impl ParseProtocolError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    /// Returns the rejected protocol name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
