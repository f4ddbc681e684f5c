//! Write-side streaming adapter.
//!
//! [`DelegatingOutputStream`] is the mirror of the read side: it vends
//! mutable spans of at most `chunk_size` bytes to the codec, parking each
//! completed chunk in the injected [`ChunkSink`]. It also implements
//! [`std::io::Write`] for byte-oriented codecs.

use std::io;
use std::mem;

use crate::chunk::Chunk;

/// Destination for chunks produced in the encode direction.
///
/// `push_chunk` may block (backpressure from a slow consumer). End of
/// stream is communicated by pushing the zero-length sentinel chunk.
pub trait ChunkSink: Send {
    /// Hand ownership of a completed chunk to the consumer.
    fn push_chunk(&mut self, chunk: Chunk);
}

/// An output stream that assembles fixed-size chunks and hands each one
/// to the injected [`ChunkSink`] as it fills.
///
/// Bytes handed out by [`next`](DelegatingOutputStream::next) are
/// considered written unless returned via
/// [`back_up`](DelegatingOutputStream::back_up).
/// [`finish`](DelegatingOutputStream::finish) flushes the trailing partial
/// chunk and emits the sentinel.
pub struct DelegatingOutputStream {
    sink: Box<dyn ChunkSink>,
    chunk_size: usize,
    /// The chunk being assembled; its length is the committed byte count.
    buffer: Vec<u8>,
    byte_count: u64,
    /// Size of the span returned by the most recent `next` call
    /// (used for error checking only).
    last_returned: usize,
}

impl DelegatingOutputStream {
    /// Create a stream producing chunks of at most `chunk_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize, sink: Box<dyn ChunkSink>) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        Self {
            sink,
            chunk_size,
            buffer: Vec::with_capacity(chunk_size),
            byte_count: 0,
            last_returned: 0,
        }
    }

    /// Return the next writable span, flushing the current chunk to the
    /// sink first if it is full.
    ///
    /// The span is never empty and all of it counts as written until
    /// [`back_up`](DelegatingOutputStream::back_up) says otherwise.
    pub fn next(&mut self) -> &mut [u8] {
        if self.buffer.len() == self.chunk_size {
            self.flush_chunk();
        }
        let start = self.buffer.len();
        self.buffer.resize(self.chunk_size, 0);
        self.last_returned = self.chunk_size - start;
        self.byte_count += self.last_returned as u64;
        &mut self.buffer[start..]
    }

    /// Mark the trailing `count` bytes of the most recent
    /// [`next`](DelegatingOutputStream::next) span as not written.
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
        self.buffer.truncate(self.buffer.len() - count);
        self.byte_count -= count as u64;
        self.last_returned -= count;
    }

    /// Total bytes written since construction.
    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    /// Flush the trailing partial chunk, if any, and emit the sentinel.
    pub fn finish(mut self) {
        if !self.buffer.is_empty() {
            self.flush_chunk();
        }
        self.sink.push_chunk(Chunk::sentinel());
    }

    fn flush_chunk(&mut self) {
        let full = mem::replace(&mut self.buffer, Vec::with_capacity(self.chunk_size));
        self.sink.push_chunk(Chunk::new(full));
    }
}

impl io::Write for DelegatingOutputStream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let written;
        {
            let span = self.next();
            written = span.len().min(data.len());
            span[..written].copy_from_slice(&data[..written]);
        }
        let excess = self.last_returned - written;
        if excess > 0 {
            self.back_up(excess);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Chunks flush on size boundaries; the trailing partial chunk is
        // only released by finish(), which also emits the sentinel.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CollectSink(Arc<Mutex<Vec<Chunk>>>);

    impl ChunkSink for CollectSink {
        fn push_chunk(&mut self, chunk: Chunk) {
            self.0.lock().unwrap().push(chunk);
        }
    }

    impl CollectSink {
        fn chunks(&self) -> Vec<Chunk> {
            self.0.lock().unwrap().clone()
        }
    }

    #[test]
    fn write_splits_into_chunk_size_pieces() {
        let sink = CollectSink::default();
        let mut stream = DelegatingOutputStream::new(4, Box::new(sink.clone()));
        stream.write_all(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        stream.finish();

        let chunks = sink.chunks();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].as_slice(), &[0, 1, 2, 3]);
        assert_eq!(chunks[1].as_slice(), &[4, 5, 6, 7]);
        assert_eq!(chunks[2].as_slice(), &[8, 9]);
        assert!(chunks[3].is_sentinel());
    }

    #[test]
    fn finish_without_data_emits_only_sentinel() {
        let sink = CollectSink::default();
        let stream = DelegatingOutputStream::new(4, Box::new(sink.clone()));
        stream.finish();
        let chunks = sink.chunks();
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_sentinel());
    }

    #[test]
    fn next_and_back_up_track_byte_count() {
        let sink = CollectSink::default();
        let mut stream = DelegatingOutputStream::new(8, Box::new(sink.clone()));

        let span = stream.next();
        assert_eq!(span.len(), 8);
        span[..3].copy_from_slice(&[1, 2, 3]);
        stream.back_up(5);
        assert_eq!(stream.byte_count(), 3);

        // The next span continues within the same chunk.
        let span = stream.next();
        assert_eq!(span.len(), 5);
        span[0] = 4;
        stream.back_up(4);
        assert_eq!(stream.byte_count(), 4);

        stream.finish();
        let chunks = sink.chunks();
        assert_eq!(chunks[0].as_slice(), &[1, 2, 3, 4]);
        assert!(chunks[1].is_sentinel());
    }

    #[test]
    #[should_panic(expected = "exceeds the 4 bytes returned")]
    fn back_up_overrun_panics() {
        let sink = CollectSink::default();
        let mut stream = DelegatingOutputStream::new(4, Box::new(sink));
        stream.next();
        stream.back_up(5);
    }

    #[test]
    #[should_panic(expected = "chunk_size must be positive")]
    fn zero_chunk_size_rejected() {
        DelegatingOutputStream::new(0, Box::new(CollectSink::default()));
    }
}
