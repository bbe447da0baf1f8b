//! crates/protocol/src/endpoint.rs
//!
//! Parsing of `<tcp|udp>:/<host>/<port>` network descriptors naming the
//! server under test.

use core::fmt;
use core::str::FromStr;

use crate::error::EndpointError;

/// Longest accepted descriptor, in bytes.
pub const MAX_DESCRIPTOR_LEN: usize = 80;

/// Transport protocol of a [`NetEndpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NetProtocol {
    /// Stream socket.
    Tcp,
    /// Datagram socket.
    Udp,
}

impl NetProtocol {
    /// Lowercase scheme name without the trailing colon.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }

    fn from_scheme(token: &str) -> Option<Self> {
        match token {
            "tcp:" => Some(Self::Tcp),
            "udp:" => Some(Self::Udp),
            _ => None,
        }
    }
}

impl fmt::Display for NetProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server address parsed from a network descriptor.
///
/// The host is kept verbatim; it is only resolved when a socket is opened.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetEndpoint {
    protocol: NetProtocol,
    host: String,
    port: u16,
}

impl NetEndpoint {
    /// Creates an endpoint from its parts.
    #[must_use]
    pub fn new(protocol: NetProtocol, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
        }
    }

    /// Parses a descriptor such as `tcp:/127.0.0.1/8554`.
    ///
    /// The descriptor is cut at the first space, tab or newline. The rest is
    /// split on `/`, ignoring empty fields, and must yield exactly a scheme,
    /// a host and a port. The port's leading digits must form a non-zero
    /// value that fits in 16 bits; trailing characters after the digits are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] describing the first rule the descriptor
    /// breaks.
    ///
    /// # Examples
    ///
    /// ```
    /// use protocol::{NetEndpoint, NetProtocol};
    ///
    /// let endpoint = NetEndpoint::parse("tcp:/127.0.0.1/21").unwrap();
    /// assert_eq!(endpoint.protocol(), NetProtocol::Tcp);
    /// assert_eq!(endpoint.host(), "127.0.0.1");
    /// assert_eq!(endpoint.port(), 21);
    ///
    /// assert!(NetEndpoint::parse("http:/x/1").is_err());
    /// assert!(NetEndpoint::parse("tcp:/x/0").is_err());
    /// ```
    pub fn parse(descriptor: &str) -> Result<Self, EndpointError> {
        if descriptor.len() > MAX_DESCRIPTOR_LEN {
            return Err(EndpointError::TooLong(descriptor.len()));
        }

        let trimmed = descriptor
            .split([' ', '\t', '\n'])
            .next()
            .unwrap_or_default();
        let tokens: Vec<&str> = trimmed.split('/').filter(|t| !t.is_empty()).collect();
        let [scheme, host, port] = tokens.as_slice() else {
            return Err(EndpointError::WrongTokenCount(tokens.len()));
        };

        let protocol = NetProtocol::from_scheme(scheme)
            .ok_or_else(|| EndpointError::UnknownScheme((*scheme).to_owned()))?;
        let port = parse_port(port).ok_or_else(|| EndpointError::InvalidPort((*port).to_owned()))?;

        Ok(Self::new(protocol, *host, port))
    }

    /// Transport protocol.
    #[must_use]
    pub const fn protocol(&self) -> NetProtocol {
        self.protocol
    }

    /// Host name or address, as written in the descriptor.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port number, never zero for parsed endpoints.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` string suitable for address resolution; IPv6 literals are
    /// bracketed.
    #[must_use]
    pub fn socket_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for NetEndpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NetEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:/{}/{}", self.protocol, self.host, self.port)
    }
}

/// Parses the leading decimal digits of `field` as a non-zero port.
fn parse_port(field: &str) -> Option<u16> {
    let digits_end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());
    match field[..digits_end].parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}
