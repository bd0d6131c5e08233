//! crates/logging-sink/src/buffer.rs
//! In-memory sink destination.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable in-memory byte buffer usable as a sink destination.
///
/// Every clone refers to the same storage, so a caller can keep one clone to
/// inspect what a logger wrote through another.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the bytes written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the written bytes decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Reports whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub(crate) fn append(&self, bytes: &[u8]) {
        self.lock().extend_from_slice(bytes);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let buffer = SharedBuffer::new();
        let other = buffer.clone();

        other.append(b"hello");

        assert_eq!(buffer.contents(), b"hello".to_vec());
        assert!(!buffer.is_empty());
    }

    #[test]
    fn clear_discards_contents() {
        let buffer = SharedBuffer::new();
        buffer.append(b"first");
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.to_string_lossy(), "");
    }

    #[test]
    fn lossy_decoding_replaces_invalid_bytes() {
        let buffer = SharedBuffer::new();
        buffer.append(&[b'a', 0xff, b'b']);

        assert_eq!(buffer.to_string_lossy(), "a\u{fffd}b");
    }
}
