//! Message Type for the Staging Queue
//!
//! A message is an immutable byte payload. Identity is positional (queue
//! order); there is no intrinsic message identifier. Ownership transfer at
//! construction guarantees that no caller retains a handle through which the
//! stored bytes could be observed or mutated afterwards.

use std::borrow::Cow;
use std::fmt;

/// Immutable byte-payload value carried through the queue
///
/// Messages are created at enqueue time and deallocated once they have left
/// both the ready queue and the persistence staging buffer. Payloads may be
/// arbitrary binary data, including newline and NUL bytes; the log store's
/// record encoding keeps them line-safe on disk.
///
/// # Example
///
/// ```rust
/// use duraq::queue::Message;
///
/// let message = Message::from_text("hello");
/// assert_eq!(message.payload(), b"hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Vec<u8>,
}

impl Message {
    /// Create a message from raw payload bytes
    ///
    /// Takes ownership of the bytes; callers holding a borrowed slice copy
    /// at this boundary (`Message::new(slice.to_vec())`).
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Create a message from UTF-8 text
    pub fn from_text(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into().into_bytes(),
        }
    }

    /// Borrow the payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the message, returning the payload bytes
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// View the payload as text, replacing invalid UTF-8 sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message{{payload='{}'}}", self.text())
    }
}
