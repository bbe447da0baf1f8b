//! crates/protocol/src/region.rs
//!
//! Byte ranges describing one protocol message inside a captured buffer.

use core::ops::RangeInclusive;

use crate::state::StateSequence;

/// A contiguous, inclusive byte range of a seed or session capture.
///
/// Segmenters produce regions that tile their input exactly: the first starts
/// at 0, each subsequent region starts one byte after its predecessor ends and
/// the last ends at `len - 1`. Segmenters leave the state sequence unset;
/// interpreters work on a separate response buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    start_byte: u32,
    end_byte: u32,
    state_sequence: Option<StateSequence>,
}

impl Region {
    /// Creates a region spanning `start_byte..=end_byte` with no states.
    #[must_use]
    pub const fn new(start_byte: u32, end_byte: u32) -> Self {
        Self {
            start_byte,
            end_byte,
            state_sequence: None,
        }
    }

    /// Attaches the state sequence observed for this region.
    #[must_use]
    pub fn with_state_sequence(mut self, states: StateSequence) -> Self {
        self.state_sequence = Some(states);
        self
    }

    /// First byte offset of the region.
    #[must_use]
    #[inline]
    pub const fn start_byte(&self) -> u32 {
        self.start_byte
    }

    /// Last byte offset of the region (inclusive).
    #[must_use]
    #[inline]
    pub const fn end_byte(&self) -> u32 {
        self.end_byte
    }

    /// Number of bytes covered by the region.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.end_byte as usize + 1).saturating_sub(self.start_byte as usize)
    }

    /// Returns `true` when the region covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The region as a range usable for slicing the source buffer.
    #[must_use]
    pub fn range(&self) -> RangeInclusive<usize> {
        self.start_byte as usize..=self.end_byte as usize
    }

    /// Borrows the bytes of `buf` covered by this region, if in bounds.
    #[must_use]
    pub fn slice<'a>(&self, buf: &'a [u8]) -> Option<&'a [u8]> {
        buf.get(self.range())
    }

    /// The attached state sequence, if any.
    #[must_use]
    pub const fn state_sequence(&self) -> Option<&StateSequence> {
        self.state_sequence.as_ref()
    }

    /// Number of attached states, 0 when no sequence is attached.
    #[must_use]
    pub fn state_count(&self) -> u32 {
        self.state_sequence
            .as_ref()
            .map_or(0, StateSequence::state_count)
    }
}

/// Checks that `regions` tile a buffer of `len` bytes without gaps or overlap.
///
/// An empty buffer is covered only by an empty region list.
#[must_use]
pub fn covers_exactly(regions: &[Region], len: usize) -> bool {
    if len == 0 {
        return regions.is_empty();
    }

    let mut next = 0usize;
    for region in regions {
        if region.start_byte as usize != next || region.end_byte < region.start_byte {
            return false;
        }
        next = region.end_byte as usize + 1;
    }
    next == len
}
