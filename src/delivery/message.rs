//! Routed message type

use bytes::Bytes;

/// A message published to an address
///
/// Cheap to clone: the payload is reference counted, so every sink a message
/// fans out to shares one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    address: String,
    payload: Bytes,
}

impl Message {
    /// Create a message for `address`
    pub fn new(address: impl Into<String>, payload: Bytes) -> Self {
        Self {
            address: address.into(),
            payload,
        }
    }

    /// Address the message was published to
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Message body
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}
