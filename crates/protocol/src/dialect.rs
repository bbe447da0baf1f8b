//! crates/protocol/src/dialect.rs
//!
//! The application protocols statewire knows how to segment and interpret.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseProtocolError;
use crate::region::Region;
use crate::state::StateSequence;

/// Application protocol spoken by the server under test.
///
/// Each protocol pairs a request segmenter with a response interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Protocol {
    /// RTSP: requests end with a blank line, responses carry `RTSP/1.0 NNN`.
    Rtsp,
    /// FTP control channel: one CRLF-terminated command or reply per line.
    Ftp,
    /// DTLS 1.2 over UDP: binary records.
    Dtls12,
}

impl Protocol {
    /// Every supported protocol.
    pub const ALL: [Self; 3] = [Self::Rtsp, Self::Ftp, Self::Dtls12];

    /// Canonical upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rtsp => "RTSP",
            Self::Ftp => "FTP",
            Self::Dtls12 => "DTLS12",
        }
    }

    /// Splits a client stream into request regions.
    ///
    /// See [`segment`](crate::segment::segment).
    #[must_use]
    pub fn segment(self, buf: &[u8]) -> Vec<Region> {
        crate::segment::segment(self, buf)
    }

    /// Reduces a server response stream to state codes.
    ///
    /// See [`interpret`](crate::interpret::interpret).
    #[must_use]
    pub fn interpret(self, buf: &[u8]) -> StateSequence {
        crate::interpret::interpret(self, buf)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|protocol| protocol.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseProtocolError::new(s))
    }
}
