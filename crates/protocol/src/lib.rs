#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `protocol` holds the protocol awareness of statewire: it knows how the
//! supported application protocols frame their requests and how their servers
//! report progress.
//!
//! - [`segment`](segment::segment) splits a seed or captured client stream
//!   into [`Region`]s, one per request message. Regions of a non-empty buffer
//!   always tile it exactly ([`covers_exactly`]).
//! - [`interpret`](interpret::interpret) reduces a response stream to a
//!   [`StateSequence`] of status codes, always led by the
//!   [`NO_RESPONSE`] sentinel.
//! - [`state_sequence_to_label`] renders a state sequence as a compact label
//!   for file names, [`NetEndpoint`] parses `<tcp|udp>:/<host>/<port>` server
//!   descriptors and [`format_region_report`] lists regions for inspection.
//!
//! All parsers are pure functions over borrowed byte slices and never fail:
//! input they cannot make sense of degrades to a single region or to the
//! reserved unknown and malformed state codes.
//!
//! # Examples
//!
//! ```
//! use protocol::Protocol;
//!
//! let requests = Protocol::Ftp.segment(b"USER anonymous\r\nPWD\r\n");
//! assert_eq!(requests.len(), 2);
//! assert_eq!((requests[1].start_byte(), requests[1].end_byte()), (16, 20));
//!
//! let states = Protocol::Ftp.interpret(b"331 Password required\r\n230 Logged in\r\n");
//! assert_eq!(states.codes(), &[0, 331, 230]);
//! assert_eq!(states.label(), "0-331-230");
//! ```
//!
//! # Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Region`],
//!   [`StateSequence`], [`Protocol`] and [`NetEndpoint`].

mod dialect;
mod endpoint;
mod error;
pub mod interpret;
mod label;
pub mod record;
mod region;
mod report;
pub mod segment;
mod state;

pub use dialect::Protocol;
pub use endpoint::{MAX_DESCRIPTOR_LEN, NetEndpoint, NetProtocol};
pub use error::{EndpointError, ParseProtocolError};
pub use label::{LABEL_LIMIT, state_sequence_to_label};
pub use region::{Region, covers_exactly};
pub use report::{format_region_report, write_region_report};
pub use state::{
    MALFORMED_SUBTYPE, NO_RESPONSE, StateSequence, UNKNOWN_CATEGORY, UNKNOWN_SUBTYPE,
    split_state_code, state_code,
};
