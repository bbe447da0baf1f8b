//! crates/logging/src/levels.rs
//! Subsystem identifiers and their per-subsystem verbosity levels.

use core::fmt;

/// Diagnostic subsystems that emit tracing events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subsystem {
    /// Request segmentation of seeds and captured sessions.
    Segment,
    /// Response interpretation into state sequences.
    Interpret,
    /// Message sequence construction and persistence.
    Sequence,
    /// Socket send/receive primitives.
    Transport,
    /// Replay of message sequences against a live server.
    Replay,
}

impl Subsystem {
    /// Every subsystem in a stable order.
    pub const ALL: [Self; 5] = [
        Self::Segment,
        Self::Interpret,
        Self::Sequence,
        Self::Transport,
        Self::Replay,
    ];

    /// Short flag name accepted by `--debug=NAME[LEVEL]`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::Interpret => "interpret",
            Self::Sequence => "sequence",
            Self::Transport => "transport",
            Self::Replay => "replay",
        }
    }

    /// Tracing target used by events of this subsystem.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Segment => "statewire::segment",
            Self::Interpret => "statewire::interpret",
            Self::Sequence => "statewire::sequence",
            Self::Transport => "statewire::transport",
            Self::Replay => "statewire::replay",
        }
    }

    /// Looks up a subsystem by its flag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subsystem| subsystem.name() == name)
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verbosity level of every subsystem.
///
/// Level 0 only lets warnings through, 1 adds info, 2 adds debug and 3 or
/// above enables trace output.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsystemLevels {
    /// Request segmentation level.
    pub segment: u8,
    /// Response interpretation level.
    pub interpret: u8,
    /// Message sequence level.
    pub sequence: u8,
    /// Transport level.
    pub transport: u8,
    /// Replay level.
    pub replay: u8,
}

impl SubsystemLevels {
    /// Get the level for a specific subsystem.
    pub const fn get(&self, subsystem: Subsystem) -> u8 {
        match subsystem {
            Subsystem::Segment => self.segment,
            Subsystem::Interpret => self.interpret,
            Subsystem::Sequence => self.sequence,
            Subsystem::Transport => self.transport,
            Subsystem::Replay => self.replay,
        }
    }

    /// Set the level for a specific subsystem.
    pub fn set(&mut self, subsystem: Subsystem, level: u8) {
        match subsystem {
            Subsystem::Segment => self.segment = level,
            Subsystem::Interpret => self.interpret = level,
            Subsystem::Sequence => self.sequence = level,
            Subsystem::Transport => self.transport = level,
            Subsystem::Replay => self.replay = level,
        }
    }

    /// Set every subsystem to `level`.
    pub fn set_all(&mut self, level: u8) {
        for subsystem in Subsystem::ALL {
            self.set(subsystem, level);
        }
    }
}

/// Maps a numeric verbosity level onto a tracing level name.
#[must_use]
pub const fn level_name(level: u8) -> &'static str {
    match level {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
