//! crates/sequence/src/message.rs

use core::ops::Deref;

/// One protocol message extracted from a seed or received for replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Message {
    data: Vec<u8>,
}

impl Message {
    /// Wraps `data` as a message.
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Message payload.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload length as stored in replay files.
    ///
    /// # Panics
    ///
    /// Panics if the payload exceeds `u32::MAX` bytes, which replay files
    /// cannot represent.
    #[must_use]
    pub fn size(&self) -> u32 {
        u32::try_from(self.data.len()).unwrap_or_else(|_| {
            panic!("message of {} bytes exceeds the replay size field", self.data.len())
        })
    }

    /// Consumes the message and returns its payload.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for Message {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for Message {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl Deref for Message {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
