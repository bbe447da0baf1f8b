//! crates/protocol/src/state.rs
//!
//! State codes and the ordered state sequences produced by response
//! interpreters.
//!
//! A state code packs a category (for record protocols, the content type) in
//! the high byte and a subtype (message, alert or handshake type) in the low
//! byte. Text protocols store their decimal status code directly.

use core::fmt;
use core::ops::Deref;

use crate::label::state_sequence_to_label;

/// Sentinel code meaning "no response observed yet"; always the first state.
pub const NO_RESPONSE: u32 = 0;

/// Subtype used when the category is known but the subtype is not (encrypted).
pub const UNKNOWN_SUBTYPE: u8 = 0xFF;

/// Subtype used when the record header is present but its body is malformed.
pub const MALFORMED_SUBTYPE: u8 = 0xFE;

/// Category used when the content type itself is unrecognised.
pub const UNKNOWN_CATEGORY: u8 = 0xFF;

/// Builds a state code from a category and subtype byte.
#[must_use]
#[inline]
pub const fn state_code(category: u8, subtype: u8) -> u32 {
    ((category as u32) << 8) | subtype as u32
}

/// Splits a state code into its `(category, subtype)` bytes.
#[must_use]
#[inline]
pub const fn split_state_code(code: u32) -> (u8, u8) {
    (((code >> 8) & 0xFF) as u8, (code & 0xFF) as u8)
}

/// Ordered sequence of state codes extracted from one response buffer.
///
/// The sequence is never empty: it starts with [`NO_RESPONSE`] and each
/// interpreted response appends one code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSequence {
    codes: Vec<u32>,
}

impl StateSequence {
    /// Creates a sequence holding only the [`NO_RESPONSE`] sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            codes: vec![NO_RESPONSE],
        }
    }

    /// Appends a state code.
    pub fn push(&mut self, code: u32) {
        self.codes.push(code);
    }

    /// Returns the codes, sentinel included.
    #[must_use]
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Number of codes, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of codes as the `u32` count stored alongside regions.
    #[must_use]
    pub fn state_count(&self) -> u32 {
        self.codes.len() as u32
    }

    /// The most recent state.
    #[must_use]
    pub fn last_state(&self) -> u32 {
        self.codes.last().copied().unwrap_or(NO_RESPONSE)
    }

    /// Renders the sequence as a bounded, filesystem-safe label.
    ///
    /// See [`state_sequence_to_label`].
    #[must_use]
    pub fn label(&self) -> String {
        state_sequence_to_label(&self.codes)
    }

    /// Consumes the sequence and returns the raw codes.
    #[must_use]
    pub fn into_codes(self) -> Vec<u32> {
        self.codes
    }
}

impl Default for StateSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for StateSequence {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.codes
    }
}

impl<'a> IntoIterator for &'a StateSequence {
    type Item = &'a u32;
    type IntoIter = core::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

impl Extend<u32> for StateSequence {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.codes.extend(iter);
    }
}

impl fmt::Display for StateSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
