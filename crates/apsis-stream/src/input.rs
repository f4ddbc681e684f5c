//! Read-side streaming adapter.
//!
//! [`DelegatingInputStream`] presents "a callback that yields the next
//! chunk when the current one runs out" as the zero-copy pull interface a
//! streaming codec expects: `next` / `back_up` / `skip` / `byte_count`.
//! It also implements [`std::io::Read`] so byte-oriented codecs can be
//! driven through the same pipeline.

use std::io;

use crate::chunk::Chunk;

/// Demand-driven source of chunks for the decode direction.
///
/// `next_chunk` may block until a chunk is available and returns `None`
/// once the end-of-stream sentinel has been received.
pub trait ChunkSource: Send {
    /// Fetch the next chunk, or `None` at end of stream.
    fn next_chunk(&mut self) -> Option<Chunk>;
}

/// An input stream over a sequence of chunks fetched on demand.
///
/// When the current chunk is exhausted the injected [`ChunkSource`] is
/// asked for the next one; a `None` (or zero-length chunk) from the source
/// is end of stream, after which [`next`](DelegatingInputStream::next)
/// returns `None` forever.
pub struct DelegatingInputStream {
    source: Box<dyn ChunkSource>,
    current: Chunk,
    /// Read position within `current`.
    position: usize,
    /// Bytes vended by `next` minus bytes returned via `back_up`.
    byte_count: u64,
    /// Size of the span returned by the most recent `next` call
    /// (used for error checking only).
    last_returned: usize,
    end_of_stream: bool,
}

impl DelegatingInputStream {
    /// Create a stream pulling chunks from `source`.
    pub fn new(source: Box<dyn ChunkSource>) -> Self {
        Self {
            source,
            current: Chunk::sentinel(),
            position: 0,
            byte_count: 0,
            last_returned: 0,
            end_of_stream: false,
        }
    }

    /// Return the next available span of bytes.
    ///
    /// The span is never empty; `None` means true end of stream. The
    /// returned bytes are considered consumed — call
    /// [`back_up`](DelegatingInputStream::back_up) to return a suffix.
    pub fn next(&mut self) -> Option<&[u8]> {
        if self.position == self.current.len() {
            if self.end_of_stream {
                return None;
            }
            match self.source.next_chunk() {
                Some(chunk) if !chunk.is_sentinel() => {
                    self.current = chunk;
                    self.position = 0;
                }
                _ => {
                    self.end_of_stream = true;
                    self.last_returned = 0;
                    return None;
                }
            }
        }
        let span = &self.current.as_slice()[self.position..];
        self.position = self.current.len();
        self.last_returned = span.len();
        self.byte_count += span.len() as u64;
        Some(span)
    }

    /// Return the trailing `count` bytes of the most recent
    /// [`next`](DelegatingInputStream::next) span to the stream.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds the number of bytes that `next` call
    /// returned.
    pub fn back_up(&mut self, count: usize) {
        assert!(
            count <= self.last_returned,
            "back_up({count}) exceeds the {} bytes returned by the last next() call",
            self.last_returned
        );
        self.position -= count;
        self.byte_count -= count as u64;
        self.last_returned -= count;
    }

    /// Advance the stream by `count` bytes, crossing chunk boundaries as
    /// needed. Returns `false` if the stream ended first.
    pub fn skip(&mut self, count: usize) -> bool {
        let mut remaining = count;
        while remaining > 0 {
            let span_len = match self.next() {
                Some(span) => span.len(),
                None => return false,
            };
            if span_len > remaining {
                self.back_up(span_len - remaining);
                return true;
            }
            remaining -= span_len;
        }
        true
    }

    /// Total bytes consumed since construction.
    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }
}

impl io::Read for DelegatingInputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let copied;
        {
            let span = match self.next() {
                Some(span) => span,
                None => return Ok(0),
            };
            copied = span.len().min(buf.len());
            buf[..copied].copy_from_slice(&span[..copied]);
        }
        let excess = self.last_returned - copied;
        if excess > 0 {
            self.back_up(excess);
        }
        Ok(copied)
    }
}
