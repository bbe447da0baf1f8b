//! crates/transport/src/net.rs
//!
//! Blocking send and receive on an already connected socket, bounded by a
//! readiness poll and socket-level timeouts.

use std::io::{self, Read};
use std::os::fd::AsFd;
use std::thread;
use std::time::Duration;

use logging::trace_io;
use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use socket2::{SockRef, Socket};

use crate::error::{TransportError, TransportResult};

/// How long a send waits for the socket to become writable.
pub const SEND_POLL_WAIT: Duration = Duration::from_millis(1);

/// Size of each `recv` call.
pub const RECV_CHUNK_LEN: usize = 1000;

/// Pause taken before each send chunk and after each received chunk.
pub const CHUNK_PAUSE: Duration = Duration::from_micros(10);

/// Smallest socket timeout applied; a zero timeout would mean "block forever".
const MIN_SOCKET_TIMEOUT: Duration = Duration::from_micros(1);

/// Sends all of `buf`, returning the number of bytes the peer accepted.
///
/// Returns `Ok(0)` without sending when the socket is not writable within
/// [`SEND_POLL_WAIT`]. Otherwise `SO_SNDTIMEO` is set to `timeout` and the
/// buffer is sent in as many partial writes as the kernel needs. A send that
/// accepts zero bytes means the peer is gone and ends the loop with a short
/// count.
///
/// # Errors
///
/// Returns [`TransportError`] when polling, setting the timeout or a send
/// fails (a send timeout included).
pub fn net_send<S: AsFd>(socket: &S, timeout: Duration, buf: &[u8]) -> TransportResult<usize> {
    if !wait_ready(socket, PollFlags::POLLOUT, SEND_POLL_WAIT)? {
        trace_io!(len = buf.len(), "socket not writable");
        return Ok(0);
    }

    let sock = SockRef::from(socket);
    sock.set_write_timeout(Some(timeout.max(MIN_SOCKET_TIMEOUT)))
        .map_err(TransportError::SetTimeout)?;

    let mut sent = 0usize;
    while sent < buf.len() {
        thread::sleep(CHUNK_PAUSE);
        match sock.send(&buf[sent..]) {
            Ok(0) => {
                trace_io!(sent, len = buf.len(), "peer stopped accepting data");
                break;
            }
            Ok(n) => sent += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => return Err(TransportError::Send { sent, source }),
        }
    }

    trace_io!(sent, len = buf.len(), "send completed");
    Ok(sent)
}

/// Appends everything the peer sends to `out` and returns the number of
/// bytes appended.
///
/// Returns `Ok(0)` when nothing becomes readable within `poll_wait`.
/// Otherwise `SO_RCVTIMEO` is set to `timeout` and the socket is drained in
/// [`RECV_CHUNK_LEN`] chunks until the peer closes the connection or falls
/// silent for `timeout`; both end the receive successfully. Bytes appended
/// before a failure stay in `out`.
///
/// # Errors
///
/// Returns [`TransportError`] when polling, setting the timeout or a read
/// fails for any reason other than the receive timeout.
pub fn net_recv<S: AsFd>(
    socket: &S,
    timeout: Duration,
    poll_wait: Duration,
    out: &mut Vec<u8>,
) -> TransportResult<usize> {
    if !wait_ready(socket, PollFlags::POLLIN, poll_wait)? {
        return Ok(0);
    }

    let sock = SockRef::from(socket);
    sock.set_read_timeout(Some(timeout.max(MIN_SOCKET_TIMEOUT)))
        .map_err(TransportError::SetTimeout)?;

    let mut reader: &Socket = &sock;
    let mut chunk = [0u8; RECV_CHUNK_LEN];
    let mut received = 0usize;
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                out.extend_from_slice(&chunk[..n]);
                received += n;
                thread::sleep(CHUNK_PAUSE);
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                break;
            }
            Err(source) => return Err(TransportError::Recv { received, source }),
        }
    }

    trace_io!(received, "receive completed");
    Ok(received)
}

/// Waits up to `wait` for `events` on `socket`.
///
/// Sub-millisecond waits round down to a non-blocking check; waits beyond
/// the poll range are capped. An interrupted poll is restarted.
///
/// # Errors
///
/// Returns [`TransportError::Poll`] when `poll` itself fails.
pub fn wait_ready<S: AsFd>(socket: &S, events: PollFlags, wait: Duration) -> TransportResult<bool> {
    let millis = u16::try_from(wait.as_millis()).unwrap_or(u16::MAX);
    let mut fds = [PollFd::new(socket.as_fd(), events)];

    loop {
        match poll(&mut fds, PollTimeout::from(millis)) {
            Ok(0) => return Ok(false),
            Ok(_) => {
                return Ok(fds[0]
                    .revents()
                    .is_some_and(|revents| revents.intersects(events)));
            }
            Err(Errno::EINTR) => {}
            Err(errno) => return Err(TransportError::Poll(io::Error::from(errno))),
        }
    }
}
