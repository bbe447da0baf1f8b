#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the verbosity model shared by the statewire crates.
//! Every subsystem (segmentation, interpretation, message sequences, socket
//! transport and replay) emits [`tracing`] events under its own
//! `statewire::<subsystem>` target; this crate maps `-v` counts and
//! `--debug=FLAG` tokens onto per-subsystem levels and installs a
//! `tracing-subscriber` pipeline that honours them.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_debug_flags("segment2").unwrap();
//!
//! assert_eq!(config.level(Subsystem::Segment), 2);
//! assert!(config.filter_directives().contains("statewire::segment=debug"));
//! ```

mod config;
mod levels;
mod tracing_bridge;
mod tracing_macros;

pub use config::{FlagError, VerbosityConfig};
pub use levels::{Subsystem, SubsystemLevels, level_name};
pub use tracing_bridge::{build_filter, init_tracing};
