//! crates/cli/src/commands/replay.rs
//!
//! `statewire replay`: send a replay file to a live server and label the
//! state sequence it answers with.

use std::io::Write;
use std::time::Duration;

use transport::TransportConfig;

use crate::command::ReplayArgs;
use crate::error::CliResult;

/// Default bound on establishing a TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings for one replay session.
///
/// ```
/// use std::time::Duration;
/// use cli::ReplayOptions;
///
/// let options = ReplayOptions::default()
///     .with_poll_wait(Duration::from_millis(50))
///     .with_max_count(10);
/// assert_eq!(options.transport().poll_wait(), Duration::from_millis(50));
/// assert_eq!(options.max_count(), 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayOptions {
    transport: TransportConfig,
    connect_timeout: Duration,
    max_count: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_count: usize::MAX,
        }
    }
}

impl ReplayOptions {
    /// Options with default timeouts and no message limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long each receive waits for the server to respond.
    pub fn with_poll_wait(mut self, wait: Duration) -> Self {
        self.transport = self.transport.with_poll_wait(wait);
        self
    }

    /// Sets both socket send and receive timeouts.
    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self
            .transport
            .with_send_timeout(timeout)
            .with_recv_timeout(timeout);
        self
    }

    /// Sets the TCP connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Limits how many messages are sent.
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    /// Transport settings used for each send and receive.
    #[must_use]
    pub const fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// TCP connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Maximum number of messages sent.
    #[must_use]
    pub const fn max_count(&self) -> usize {
        self.max_count
    }
}

#[cfg(unix)]
pub(crate) fn run<W: Write>(args: ReplayArgs, stdout: &mut W) -> CliResult<()> {
    use logging::{trace_replay, warn_subsystem};
    use protocol::NetEndpoint;
    use sequence::MessageSequence;
    use transport::replay_messages;

    use crate::connect::Connection;
    use crate::error::CliError;

    let endpoint: NetEndpoint = args.endpoint.parse()?;
    let sequence = MessageSequence::from_replay_file(&args.replay)?;
    let connection = Connection::open(&endpoint, args.options.connect_timeout()).map_err(
        |source| CliError::Connect {
            endpoint: endpoint.to_string(),
            source,
        },
    )?;

    let total = sequence.len().min(args.options.max_count());
    trace_replay!(%endpoint, messages = total, "starting replay");
    let outcome = replay_messages(
        &connection,
        sequence.iter().take(total),
        args.options.transport(),
    );
    let (messages_sent, bytes_sent, completed) =
        (outcome.messages_sent, outcome.bytes_sent, outcome.completed);
    let (response, result) = outcome.into_result();

    if let Some(path) = args.response_out {
        std::fs::write(&path, &response).map_err(|source| CliError::Write { path, source })?;
    }

    if !completed && result.is_ok() {
        warn_subsystem!(
            "statewire::replay",
            sent = messages_sent,
            total,
            "server stopped accepting messages"
        );
    }

    // States are reported even when a socket failure cut the replay short.
    let states = args.protocol.interpret(&response);
    writeln!(
        stdout,
        "sent {messages_sent}/{total} messages ({bytes_sent} bytes), received {} bytes",
        response.len()
    )?;
    super::interpret::write_states(&states, stdout)?;
    result.map_err(CliError::from)
}

#[cfg(not(unix))]
pub(crate) fn run<W: Write>(args: ReplayArgs, _stdout: &mut W) -> CliResult<()> {
    Err(crate::error::CliError::Connect {
        endpoint: args.endpoint,
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "replay requires a unix socket layer",
        ),
    })
}
