//! Pull-driven serialization pipeline.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::chunk::Chunk;
use crate::message::Message;
use crate::output::{ChunkSink, DelegatingOutputStream};
use crate::queue::ChunkQueue;

/// Adapts the queue's blocking `put` to the stream's chunk hand-off.
struct QueueSink {
    queue: Arc<ChunkQueue>,
}

impl ChunkSink for QueueSink {
    fn push_chunk(&mut self, chunk: Chunk) {
        self.queue.put(chunk);
    }
}

/// Encodes a message on a background thread, handing the wire bytes to
/// the caller one bounded chunk at a time.
///
/// Lifecycle: construct, call [`start`] with the message exactly once,
/// then drain the pipeline with [`pull`] until it returns `None`, and
/// collect the codec's verdict with [`join`]. At most `number_of_chunks`
/// chunks of `chunk_size` bytes are buffered ahead of the caller, so peak
/// memory use is `number_of_chunks * (chunk_size + O(1)) + O(1)` bytes
/// however large the encoded message is; a caller that stops pulling
/// simply blocks the encode thread (backpressure).
///
/// Dropping the serializer before `join` closes the queue so the encode
/// thread can run to completion discarding its output.
///
/// [`start`]: PullSerializer::start
/// [`pull`]: PullSerializer::pull
/// [`join`]: PullSerializer::join
pub struct PullSerializer<M: Message> {
    chunk_size: usize,
    queue: Arc<ChunkQueue>,
    handle: Option<JoinHandle<Result<(), M::Error>>>,
    started: bool,
    done: bool,
}

impl<M: Message> PullSerializer<M> {
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
            done: false,
        }
    }

    /// Spawn the background encode thread, consuming `message`.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn start(&mut self, message: M) {
        assert!(!self.started, "start called twice on PullSerializer");
        self.started = true;
        let queue = Arc::clone(&self.queue);
        let chunk_size = self.chunk_size;
        let handle = thread::Builder::new()
            .name("apsis-encode".into())
            .spawn(move || {
                let sink = QueueSink {
                    queue: Arc::clone(&queue),
                };
                let mut stream = DelegatingOutputStream::new(chunk_size, Box::new(sink));
                match message.encode_to(&mut stream) {
                    Ok(()) => {
                        stream.finish();
                        Ok(())
                    }
                    Err(e) => {
                        // Unblock the consumer even on codec failure; the
                        // partial buffered chunk is discarded.
                        queue.put(Chunk::sentinel());
                        Err(e)
                    }
                }
            })
            .expect("failed to spawn encode thread");
        self.handle = Some(handle);
    }

    /// Dequeue the next ready chunk, blocking while none is available.
    ///
    /// Returns `None` once the sentinel is observed: the encode thread
    /// has finished and the stream is complete.
    ///
    /// # Panics
    ///
    /// Panics if called before [`start`](PullSerializer::start).
    pub fn pull(&mut self) -> Option<Chunk> {
        assert!(self.started, "pull called before start");
        if self.done {
            return None;
        }
        let chunk = self.queue.get();
        if chunk.is_sentinel() {
            self.done = true;
            None
        } else {
            Some(chunk)
        }
    }

    /// Wait for the encode thread and return the codec's result.
    ///
    /// # Panics
    ///
    /// Panics if called before the stream has been pulled to completion,
    /// or if the encode thread panicked.
    pub fn join(mut self) -> Result<(), M::Error> {
        assert!(self.started, "join called before start");
        assert!(
            self.done,
            "join called before the stream was pulled to completion"
        );
        let handle = self.handle.take().expect("encode thread already joined");
        handle.join().expect("encode thread panicked")
    }

    /// Highest queue occupancy observed so far (for memory-bound checks).
    pub fn peak_queue_occupancy(&self) -> usize {
        self.queue.peak_occupancy()
    }
}

impl<M: Message> Drop for PullSerializer<M> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            // Teardown before natural completion: let the encode thread
            // finish into a closed queue that discards its chunks.
            self.queue.close();
            let _ = handle.join();
        }
    }
}
