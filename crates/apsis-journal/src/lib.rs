//! Hex-encoded journal recording and playback for Apsis snapshots.
//!
//! Records and replays simulation state for debugging and regression
//! testing. The on-disk format is line-oriented text so journals can
//! be inspected, diffed, and trimmed with ordinary tools while the
//! payload stays bit-exact.
//!
//! # Architecture
//!
//! - [`Recorder`] streams records to any `Write` sink
//! - [`Player`] reads records back from any `BufRead` source
//! - Both sides move data through the bounded pipeline in
//!   `apsis-stream`, so journal size never dictates memory use
//! - All I/O uses a custom binary codec under hexadecimal text
//!   framing (no serde dependency)
//!
//! # Format
//!
//! ```text
//! 4150534A01                  <- hex of MAGIC "APSJ" + version byte
//! <hex line>                  <- one serialized chunk per line
//! <hex line>
//!                             <- blank line terminates the record
//! <hex line>
//! ...
//! ```
//!
//! Floats are stored little-endian and bit-exact: a journal played
//! back produces the same bits that were recorded.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hex;
pub mod player;
pub mod record;
pub mod recorder;

pub use error::JournalError;
pub use player::{Player, RecordIter};
pub use record::Record;
pub use recorder::Recorder;

/// Magic bytes at the start of every journal, hex-encoded on the
/// header line.
pub const MAGIC: [u8; 4] = *b"APSJ";

/// Current journal format version.
pub const FORMAT_VERSION: u8 = 1;

/// Chunk size used by [`Recorder::new`] and [`Player::new`].
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Queue depth used by [`Recorder::new`] and [`Player::new`].
pub const DEFAULT_QUEUE_DEPTH: usize = 4;
