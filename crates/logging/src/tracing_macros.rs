//! crates/logging/src/tracing_macros.rs
//! Convenience macros for subsystem-specific tracing.
//!
//! These macros wrap the standard tracing macros with the target of each
//! statewire subsystem. Crates using them must depend on `tracing` directly.

/// Emit a request segmentation trace.
///
/// # Example
/// ```ignore
/// trace_segment!(regions = regions.len(), "segmented seed");
/// ```
#[macro_export]
macro_rules! trace_segment {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "statewire::segment", $($arg)*);
    };
}

/// Emit a response interpretation trace.
///
/// # Example
/// ```ignore
/// trace_interpret!(code, "status line");
/// ```
#[macro_export]
macro_rules! trace_interpret {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "statewire::interpret", $($arg)*);
    };
}

/// Emit a message sequence trace.
///
/// # Example
/// ```ignore
/// trace_sequence!(messages = 3, "built sequence from seed");
/// ```
#[macro_export]
macro_rules! trace_sequence {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "statewire::sequence", $($arg)*);
    };
}

/// Emit a socket I/O trace.
///
/// # Example
/// ```ignore
/// trace_io!(sent, "send completed");
/// ```
#[macro_export]
macro_rules! trace_io {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "statewire::transport", $($arg)*);
    };
}

/// Emit a replay progress trace.
///
/// # Example
/// ```ignore
/// trace_replay!(index, "message sent");
/// ```
#[macro_export]
macro_rules! trace_replay {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "statewire::replay", $($arg)*);
    };
}

/// Emit a warning attributed to a subsystem target.
///
/// # Example
/// ```ignore
/// warn_subsystem!("statewire::sequence", "seed shorter than regions");
/// ```
#[macro_export]
macro_rules! warn_subsystem {
    ($target:literal, $($arg:tt)*) => {
        ::tracing::warn!(target: $target, $($arg)*);
    };
}
