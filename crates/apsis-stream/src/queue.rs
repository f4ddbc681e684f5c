//! Bounded thread-safe FIFO of chunks.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::chunk::Chunk;

/// A bounded FIFO of [`Chunk`]s shared between exactly one producer and
/// one consumer thread.
///
/// The capacity bound is what caps the pipeline's memory use: [`put`]
/// suspends the producer while the queue is full (backpressure) and
/// [`get`] suspends the consumer while it is empty. Both suspensions are
/// condition-variable waits under the queue's single mutex, never spins,
/// and the lock is held only for the membership test and the mutation —
/// never while blocked.
///
/// [`close`] is the teardown escape hatch: it wakes all waiters, makes
/// further `put`s discard their chunk, and makes `get` yield the sentinel
/// once the backlog is drained. It is used when one side of the pipeline
/// disappears before natural completion; during normal operation the
/// zero-length sentinel chunk flows through the queue like any other.
///
/// [`put`]: ChunkQueue::put
/// [`get`]: ChunkQueue::get
/// [`close`]: ChunkQueue::close
pub struct ChunkQueue {
    state: Mutex<State>,
    has_room: Condvar,
    has_elements: Condvar,
    capacity: usize,
}

struct State {
    chunks: VecDeque<Chunk>,
    /// Highest occupancy ever observed, for memory-bound verification.
    peak: usize,
    closed: bool,
}

// Compile-time assertion: ChunkQueue must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<ChunkQueue>();
};

impl ChunkQueue {
    /// Create a queue holding at most `capacity` chunks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ChunkQueue capacity must be positive");
        Self {
            state: Mutex::new(State {
                chunks: VecDeque::with_capacity(capacity),
                peak: 0,
                closed: false,
            }),
            has_room: Condvar::new(),
            has_elements: Condvar::new(),
            capacity,
        }
    }

    /// Append a chunk, blocking while the queue is full.
    ///
    /// If the queue has been closed the chunk is discarded: the consumer
    /// is gone and will never drain it.
    pub fn put(&self, chunk: Chunk) {
        let mut state = self.state.lock().unwrap();
        while state.chunks.len() == self.capacity && !state.closed {
            state = self.has_room.wait(state).unwrap();
        }
        if state.closed {
            return;
        }
        state.chunks.push_back(chunk);
        state.peak = state.peak.max(state.chunks.len());
        self.has_elements.notify_one();
    }

    /// Remove and return the front chunk, blocking while the queue is empty.
    ///
    /// On a closed queue the backlog is still drained in order; once it is
    /// empty, `get` returns the sentinel instead of blocking.
    pub fn get(&self) -> Chunk {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(chunk) = state.chunks.pop_front() {
                self.has_room.notify_one();
                return chunk;
            }
            if state.closed {
                return Chunk::sentinel();
            }
            state = self.has_elements.wait(state).unwrap();
        }
    }

    /// Close the queue, waking any blocked producer or consumer.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.has_room.notify_all();
        self.has_elements.notify_all();
    }

    /// Number of chunks currently queued.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().chunks.len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().chunks.is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Highest occupancy observed since construction.
    ///
    /// Never exceeds [`capacity`](ChunkQueue::capacity); used to verify the
    /// pipeline's memory bound under load.
    pub fn peak_occupancy(&self) -> usize {
        self.state.lock().unwrap().peak
    }
}
