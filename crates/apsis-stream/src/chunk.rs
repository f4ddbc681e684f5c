//! The unit of transfer between pipeline threads.

/// An owned byte buffer handed from producer to consumer.
///
/// A chunk is produced once, consumed once, then discarded. Enqueued
/// chunks are owned exclusively by the queue until dequeued; dequeuing
/// transfers ownership to the consumer. The zero-length chunk is the
/// end-of-stream sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    bytes: Vec<u8>,
}

impl Chunk {
    /// Wrap an owned byte buffer.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copy a slice into a new chunk.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// The zero-length end-of-stream marker.
    pub fn sentinel() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether this chunk is the end-of-stream sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the chunk holds no bytes. Equivalent to [`is_sentinel`].
    ///
    /// [`is_sentinel`]: Chunk::is_sentinel
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the payload.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Unwrap the payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}
