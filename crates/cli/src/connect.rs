//! crates/cli/src/connect.rs
//!
//! Opens the socket described by a [`NetEndpoint`].

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::os::fd::{AsFd, BorrowedFd};
use std::time::Duration;

use protocol::{NetEndpoint, NetProtocol};

/// A connected TCP stream or UDP socket.
#[derive(Debug)]
pub enum Connection {
    /// Stream connection.
    Tcp(TcpStream),
    /// Datagram socket connected to a single peer.
    Udp(UdpSocket),
}

impl Connection {
    /// Resolves `endpoint` and connects to the first address that accepts.
    ///
    /// TCP connects are bounded by `timeout`; UDP sockets are bound to an
    /// ephemeral local port and connected, which never blocks.
    ///
    /// # Errors
    ///
    /// Returns the resolution error, or the error of the last address tried.
    pub fn open(endpoint: &NetEndpoint, timeout: Duration) -> io::Result<Self> {
        let addresses: Vec<SocketAddr> = endpoint.socket_address().to_socket_addrs()?.collect();
        let mut last_error = None;

        for address in addresses {
            let attempt = match endpoint.protocol() {
                NetProtocol::Tcp => TcpStream::connect_timeout(&address, timeout).map(Self::Tcp),
                NetProtocol::Udp => connect_udp(address).map(Self::Udp),
            };
            match attempt {
                Ok(connection) => {
                    tracing::debug!(
                        target: "statewire::transport",
                        %address,
                        protocol = %endpoint.protocol(),
                        "connected"
                    );
                    return Ok(connection);
                }
                Err(error) => last_error = Some(error),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{}' did not resolve to any addresses", endpoint.host()),
            )
        }))
    }
}

fn connect_udp(address: SocketAddr) -> io::Result<UdpSocket> {
    let local: SocketAddr = if address.is_ipv4() {
        (std::net::Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(local)?;
    socket.connect(address)?;
    Ok(socket)
}

impl AsFd for Connection {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            Self::Tcp(stream) => stream.as_fd(),
            Self::Udp(socket) => socket.as_fd(),
        }
    }
}
