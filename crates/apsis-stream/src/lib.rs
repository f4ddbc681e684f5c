//! Bounded-memory streaming serialization pipeline.
//!
//! Simulation state (trajectories, fork trees, plugin state) can be
//! arbitrarily large; encoding or decoding it through an in-memory copy of
//! the full wire image is unacceptable inside a game's core loop. This
//! crate decouples a message's total size from the process's peak memory
//! use: a producer/consumer pair streams the encoded bytes through a small
//! bounded queue of fixed-size chunks, so at most
//! `number_of_chunks * (chunk_size + O(1)) + O(1)` bytes are ever in
//! flight, independent of message size.
//!
//! # Architecture
//!
//! ```text
//! Caller Thread                 Queue                 Decode Thread
//!     |                           |                        |
//!     |--push(bytes)------------->|                        |
//!     |   split into chunks,      |<--get() on demand------|
//!     |   put() blocks when full  |   (DelegatingInputStream
//!     |                           |    asks its ChunkSource
//!     |--push(&[]) [sentinel]---->|    when a span runs out)
//!     |                           |                        |
//!     |--join()---------------------------------> decoded message
//! ```
//!
//! [`PullSerializer`] is the mirror image: a background thread drives the
//! codec's encode loop, parking each completed chunk in the queue; the
//! caller's `pull()` drains them one at a time.
//!
//! Exactly two threads participate per pipeline instance: the caller's
//! and one dedicated worker spawned by `start`. The queue is the only
//! shared mutable state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod input;
pub mod message;
pub mod output;
pub mod pull_serializer;
pub mod push_deserializer;
pub mod queue;

pub use chunk::Chunk;
pub use input::{ChunkSource, DelegatingInputStream};
pub use message::Message;
pub use output::{ChunkSink, DelegatingOutputStream};
pub use pull_serializer::PullSerializer;
pub use push_deserializer::PushDeserializer;
pub use queue::ChunkQueue;
