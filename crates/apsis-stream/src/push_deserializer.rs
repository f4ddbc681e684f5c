//! Push-driven deserialization pipeline.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::chunk::Chunk;
use crate::input::{ChunkSource, DelegatingInputStream};
use crate::message::Message;
use crate::queue::ChunkQueue;

/// Adapts the queue's blocking `get` to the stream's demand-driven pull.
struct QueueSource {
    queue: Arc<ChunkQueue>,
}

impl ChunkSource for QueueSource {
    fn next_chunk(&mut self) -> Option<Chunk> {
        let chunk = self.queue.get();
        if chunk.is_sentinel() {
            None
        } else {
            Some(chunk)
        }
    }
}

/// Decodes a message whose encoded bytes arrive incrementally from the
/// caller, using bounded memory regardless of total message size.
///
/// Lifecycle: construct, call [`start`] exactly once, feed the wire bytes
/// through [`push`] in any piece sizes, signal end of input with
/// `push(&[])`, then collect the decoded message with [`join`]. The decode
/// loop runs on one dedicated background thread; at most
/// `number_of_chunks` chunks of `chunk_size` bytes are buffered between
/// the two threads, so peak memory use is
/// `number_of_chunks * (chunk_size + O(1)) + O(1)` bytes however large the
/// message is.
///
/// Dropping the deserializer before `join` closes the queue, which
/// presents a premature end of stream to the codec and lets the background
/// thread exit — the decode result is discarded.
///
/// [`start`]: PushDeserializer::start
/// [`push`]: PushDeserializer::push
/// [`join`]: PushDeserializer::join
pub struct PushDeserializer<M: Message> {
    chunk_size: usize,
    queue: Arc<ChunkQueue>,
    handle: Option<JoinHandle<Result<M, M::Error>>>,
    started: bool,
    finished: bool,
}

impl<M: Message> PushDeserializer<M> {
    /// Create a pipeline with the given chunk geometry.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` or `number_of_chunks` is zero.
    pub fn new(chunk_size: usize, number_of_chunks: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        Self {
            chunk_size,
            queue: Arc::new(ChunkQueue::new(number_of_chunks)),
            handle: None,
            started: false,
            finished: false,
        }
    }

    /// Spawn the background decode thread.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn start(&mut self) {
        assert!(!self.started, "start called twice on PushDeserializer");
        self.started = true;
        let queue = Arc::clone(&self.queue);
        let handle = thread::Builder::new()
            .name("apsis-decode".into())
            .spawn(move || {
                let source = QueueSource {
                    queue: Arc::clone(&queue),
                };
                let mut stream = DelegatingInputStream::new(Box::new(source));
                let result = M::decode_from(&mut stream);
                // The codec will consume nothing further; close the queue
                // so a producer still pushing cannot block forever.
                queue.close();
                result
            })
            .expect("failed to spawn decode thread");
        self.handle = Some(handle);
    }

    /// Feed encoded bytes to the decoder.
    ///
    /// `bytes` is split into pieces of at most `chunk_size` (order
    /// preserved) and enqueued; this blocks while the queue is full
    /// (backpressure from a slow decode). An empty `bytes` is the
    /// end-of-input signal: it enqueues the sentinel, after which no
    /// further `push` is valid.
    ///
    /// # Panics
    ///
    /// Panics if called before [`start`](PushDeserializer::start) or after
    /// the end-of-input sentinel has been pushed.
    pub fn push(&mut self, bytes: &[u8]) {
        assert!(self.started, "push called before start");
        assert!(
            !self.finished,
            "push called after the end-of-input sentinel"
        );
        if bytes.is_empty() {
            self.finished = true;
            self.queue.put(Chunk::sentinel());
            return;
        }
        for piece in bytes.chunks(self.chunk_size) {
            self.queue.put(Chunk::from_slice(piece));
        }
    }

    /// Wait for the decode thread and return the codec's result.
    ///
    /// # Panics
    ///
    /// Panics if called before [`start`](PushDeserializer::start), or
    /// before the end-of-input sentinel has been pushed, or if the decode
    /// thread panicked.
    pub fn join(mut self) -> Result<M, M::Error> {
        assert!(self.started, "join called before start");
        assert!(
            self.finished,
            "join called before the end-of-input sentinel was pushed"
        );
        let handle = self.handle.take().expect("decode thread already joined");
        handle.join().expect("decode thread panicked")
    }

    /// Highest queue occupancy observed so far (for memory-bound checks).
    pub fn peak_queue_occupancy(&self) -> usize {
        self.queue.peak_occupancy()
    }
}

impl<M: Message> Drop for PushDeserializer<M> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            // Teardown before natural completion: present end of stream to
            // the codec instead of leaking a thread blocked on get().
            self.queue.close();
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};

    /// Length-free blob: decode reads until end of stream.
    #[derive(Debug, PartialEq)]
    struct Blob(Vec<u8>);

    impl Message for Blob {
        type Error = io::Error;

        fn encode_to(
            &self,
            stream: &mut crate::output::DelegatingOutputStream,
        ) -> Result<(), io::Error> {
            use std::io::Write;
            stream.write_all(&self.0)
        }

        fn decode_from(stream: &mut DelegatingInputStream) -> Result<Self, io::Error> {
            let mut bytes = Vec::new();
            stream.read_to_end(&mut bytes)?;
            Ok(Blob(bytes))
        }
    }

    #[test]
    fn decodes_pushed_bytes() {
        let mut deserializer = PushDeserializer::<Blob>::new(4, 2);
        deserializer.start();
        deserializer.push(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        deserializer.push(&[]);
        let blob = deserializer.join().unwrap();
        assert_eq!(blob, Blob(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]));
    }

    #[test]
    fn empty_message_decodes() {
        let mut deserializer = PushDeserializer::<Blob>::new(4, 2);
        deserializer.start();
        deserializer.push(&[]);
        let blob = deserializer.join().unwrap();
        assert_eq!(blob, Blob(vec![]));
    }

    #[test]
    #[should_panic(expected = "start called twice")]
    fn double_start_panics() {
        let mut deserializer = PushDeserializer::<Blob>::new(4, 2);
        deserializer.start();
        deserializer.start();
    }

    #[test]
    #[should_panic(expected = "push called before start")]
    fn push_before_start_panics() {
        let mut deserializer = PushDeserializer::<Blob>::new(4, 2);
        deserializer.push(&[1]);
    }

    #[test]
    #[should_panic(expected = "push called after the end-of-input sentinel")]
    fn push_after_sentinel_panics() {
        let mut deserializer = PushDeserializer::<Blob>::new(4, 2);
        deserializer.start();
        deserializer.push(&[]);
        deserializer.push(&[1]);
    }

    #[test]
    #[should_panic(expected = "before the end-of-input sentinel was pushed")]
    fn join_before_sentinel_panics() {
        let mut deserializer = PushDeserializer::<Blob>::new(4, 2);
        deserializer.start();
        deserializer.push(&[1]);
        let _ = deserializer.join();
    }

    #[test]
    fn drop_without_sentinel_does_not_hang() {
        let mut deserializer = PushDeserializer::<Blob>::new(4, 2);
        deserializer.start();
        deserializer.push(&[1, 2, 3]);
        drop(deserializer);
    }

    #[test]
    fn drop_without_start_is_inert() {
        let deserializer = PushDeserializer::<Blob>::new(4, 2);
        drop(deserializer);
    }
}
