#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! # Overview
//!
//! `transport` moves protocol messages over an already connected socket with
//! every blocking step bounded in time. It is the only place in statewire
//! that waits on the network.
//!
//! # Design
//!
//! - [`net_send`] and [`net_recv`] first poll the descriptor for readiness,
//!   then apply `SO_SNDTIMEO`/`SO_RCVTIMEO` and loop over partial writes or
//!   reads. They accept any [`AsFd`](std::os::fd::AsFd) socket, so TCP
//!   streams and connected UDP sockets work alike.
//! - [`replay_messages`] drives a whole message sequence: greeting first,
//!   then one send and one receive per message, strictly in order.
//! - [`TransportConfig`] carries the three timeouts involved.
//!
//! # Errors
//!
//! Silence and peer shutdown are ordinary outcomes reported through byte
//! counts. [`TransportError`] is reserved for failures of the socket itself;
//! callers decide whether such a failure discards the test case or retries
//! it. [`replay_messages`] never loses what it already received: a failure
//! ends the replay and is reported next to the collected response in
//! [`ReplayOutcome`].
//!
//! # Examples
//!
//! ```
//! use std::io::Write;
//! use std::net::{TcpListener, TcpStream};
//! use std::time::Duration;
//!
//! let listener = TcpListener::bind("127.0.0.1:0").unwrap();
//! let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
//! let (mut server, _) = listener.accept().unwrap();
//! server.write_all(b"220 ready\r\n").unwrap();
//!
//! let mut response = Vec::new();
//! let received = transport::net_recv(
//!     &client,
//!     Duration::from_millis(10),
//!     Duration::from_millis(500),
//!     &mut response,
//! )
//! .unwrap();
//! assert_eq!(received, 11);
//! assert_eq!(response, b"220 ready\r\n");
//! ```

mod config;
mod error;
#[cfg(unix)]
mod net;
#[cfg(unix)]
mod replay;

pub use config::{DEFAULT_POLL_WAIT, DEFAULT_SOCKET_TIMEOUT, TransportConfig};
pub use error::{TransportError, TransportResult};
#[cfg(unix)]
pub use net::{CHUNK_PAUSE, RECV_CHUNK_LEN, SEND_POLL_WAIT, net_recv, net_send, wait_ready};
#[cfg(unix)]
pub use nix::poll::PollFlags;
#[cfg(unix)]
pub use replay::{ReplayOutcome, replay_messages};
