//! crates/transport/src/error.rs
//!
//! Error types for socket I/O.
//!
//! Silence within the poll window is not an error: it surfaces as a zero
//! byte count. A peer that closes the connection surfaces as a short count.
//! Only genuine socket failures reach [`TransportError`].

use std::io;

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Socket failures raised while sending or receiving.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Waiting for readiness failed.
    #[error("poll failed: {0}")]
    Poll(#[source] io::Error),
    /// Applying the socket-level send or receive timeout failed.
    #[error("unable to set socket timeout: {0}")]
    SetTimeout(#[source] io::Error),
    /// `send` failed after `sent` bytes were delivered.
    #[error("send failed after {sent} bytes: {source}")]
    Send {
        /// Bytes delivered before the failure.
        sent: usize,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
    /// `recv` failed after `received` bytes were appended.
    #[error("receive failed after {received} bytes: {source}")]
    Recv {
        /// Bytes appended to the caller's buffer before the failure.
        received: usize,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    /// The underlying I/O error.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        match self {
            Self::Poll(source)
            | Self::SetTimeout(source)
            | Self::Send { source, .. }
            | Self::Recv { source, .. } => source,
        }
    }
}

impl From<TransportError> for io::Error {
    fn from(error: TransportError) -> Self {
        let kind = error.io_error().kind();
        Self::new(kind, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn send_error_reports_progress() {
        let err = TransportError::Send {
            sent: 12,
            source: io::Error::from(io::ErrorKind::BrokenPipe),
        };
        assert!(err.to_string().contains("after 12 bytes"));
        assert_eq!(err.io_error().kind(), io::ErrorKind::BrokenPipe);
        assert!(err.source().is_some());
    }

    #[test]
    fn converts_to_io_error_preserving_kind() {
        let err = TransportError::Recv {
            received: 0,
            source: io::Error::from(io::ErrorKind::ConnectionReset),
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
        assert!(io_err.to_string().contains("receive failed"));
    }

    #[test]
    fn poll_error_displays_cause() {
        let err = TransportError::Poll(io::Error::other("bad descriptor"));
        assert!(err.to_string().contains("bad descriptor"));
    }
}
