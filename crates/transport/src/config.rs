//! crates/transport/src/config.rs
//!
//! Timing knobs for socket I/O.

use std::time::Duration;

/// Default socket-level send and receive timeout.
pub const DEFAULT_SOCKET_TIMEOUT: Duration = Duration::from_millis(1);

/// Default wait for incoming data before a receive gives up.
pub const DEFAULT_POLL_WAIT: Duration = Duration::from_millis(1);

/// Timeouts applied by [`net_send`](crate::net_send),
/// [`net_recv`](crate::net_recv) and the replay driver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use transport::TransportConfig;
///
/// let config = TransportConfig::default()
///     .with_poll_wait(Duration::from_millis(50))
///     .with_recv_timeout(Duration::from_millis(5));
///
/// assert_eq!(config.poll_wait(), Duration::from_millis(50));
/// assert_eq!(config.send_timeout(), Duration::from_millis(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportConfig {
    send_timeout: Duration,
    recv_timeout: Duration,
    poll_wait: Duration,
}

impl TransportConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            send_timeout: DEFAULT_SOCKET_TIMEOUT,
            recv_timeout: DEFAULT_SOCKET_TIMEOUT,
            poll_wait: DEFAULT_POLL_WAIT,
        }
    }

    /// Sets the `SO_SNDTIMEO` value applied before sending.
    #[must_use]
    pub const fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Sets the `SO_RCVTIMEO` value applied before receiving.
    #[must_use]
    pub const fn with_recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = timeout;
        self
    }

    /// Sets how long a receive waits for the socket to become readable.
    #[must_use]
    pub const fn with_poll_wait(mut self, wait: Duration) -> Self {
        self.poll_wait = wait;
        self
    }

    /// Socket-level send timeout.
    #[must_use]
    pub const fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    /// Socket-level receive timeout.
    #[must_use]
    pub const fn recv_timeout(&self) -> Duration {
        self.recv_timeout
    }

    /// Readability wait before a receive.
    #[must_use]
    pub const fn poll_wait(&self) -> Duration {
        self.poll_wait
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}
