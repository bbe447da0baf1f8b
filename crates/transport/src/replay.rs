//! crates/transport/src/replay.rs
//!
//! Sends a message sequence to a live server and collects its responses.

use std::os::fd::AsFd;

use logging::{trace_replay, warn_subsystem};

use crate::config::TransportConfig;
use crate::error::{TransportError, TransportResult};
use crate::net::{net_recv, net_send};

/// What happened during one replay.
///
/// The response buffer is always handed back, including when the replay was
/// cut short by a socket failure.
#[derive(Debug, Default)]
pub struct ReplayOutcome {
    /// Every byte the server sent, in arrival order.
    pub response: Vec<u8>,
    /// Messages delivered in full.
    pub messages_sent: usize,
    /// Total payload bytes delivered, including a partial final message.
    pub bytes_sent: usize,
    /// `true` when every message was delivered in full.
    pub completed: bool,
    /// The socket failure that ended the replay early, if any.
    pub error: Option<TransportError>,
}

impl ReplayOutcome {
    /// Splits the outcome into the collected response and the failure, if any.
    pub fn into_result(self) -> (Vec<u8>, TransportResult<()>) {
        let result = self.error.map_or(Ok(()), Err);
        (self.response, result)
    }

    fn failed(mut self, error: TransportError) -> Self {
        warn_subsystem!(
            "statewire::replay",
            messages_sent = self.messages_sent,
            received = self.response.len(),
            %error,
            "replay aborted by socket error"
        );
        self.error = Some(error);
        self
    }
}

/// Replays `messages` over `socket` strictly in order.
///
/// The server's greeting, if any, is received first. Each message is then
/// sent and followed by a receive, so the response buffer interleaves with
/// the requests the same way a live session would. A message that is not
/// delivered in full (socket not writable, peer gone) ends the replay early
/// with [`ReplayOutcome::completed`] unset. A send or receive failure also
/// ends it and is stored in [`ReplayOutcome::error`]; bytes received before
/// the failure stay in [`ReplayOutcome::response`].
pub fn replay_messages<S, I>(socket: &S, messages: I, config: &TransportConfig) -> ReplayOutcome
where
    S: AsFd,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut outcome = ReplayOutcome::default();
    if let Err(error) = receive(socket, config, &mut outcome.response) {
        return outcome.failed(error);
    }

    for (index, message) in messages.into_iter().enumerate() {
        let payload = message.as_ref();
        let sent = match net_send(socket, config.send_timeout(), payload) {
            Ok(sent) => sent,
            Err(error) => {
                if let TransportError::Send { sent, .. } = &error {
                    outcome.bytes_sent += sent;
                }
                return outcome.failed(error);
            }
        };
        outcome.bytes_sent += sent;

        if sent < payload.len() {
            warn_subsystem!(
                "statewire::replay",
                index,
                sent,
                len = payload.len(),
                "message not fully delivered, stopping replay"
            );
            return outcome;
        }
        outcome.messages_sent += 1;

        match receive(socket, config, &mut outcome.response) {
            Ok(received) => trace_replay!(index, sent, received, "message replayed"),
            Err(error) => return outcome.failed(error),
        }
    }

    outcome.completed = true;
    outcome
}

fn receive<S: AsFd>(
    socket: &S,
    config: &TransportConfig,
    response: &mut Vec<u8>,
) -> TransportResult<usize> {
    net_recv(socket, config.recv_timeout(), config.poll_wait(), response)
}
