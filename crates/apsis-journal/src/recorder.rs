//! Journal recording writer.
//!
//! [`Recorder`] streams records to any `Write` sink as hexadecimal
//! text. Each record is serialized through a [`PullSerializer`], so
//! only one chunk window of the record is in flight at a time no
//! matter how large the snapshot is. The header line is written
//! immediately on construction.

use std::io::Write;

use apsis_stream::PullSerializer;

use crate::error::JournalError;
use crate::hex;
use crate::record::Record;
use crate::{DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_DEPTH, FORMAT_VERSION, MAGIC};

/// Writes journal data to a text stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use std::io::BufReader;
///
/// use apsis_core::StateSnapshot;
/// use apsis_journal::{Player, Record, Recorder};
///
/// let mut buf = Vec::new();
/// let mut recorder = Recorder::new(&mut buf).unwrap();
/// for tick in 1..=2u64 {
///     let record = Record { tick, snapshot: StateSnapshot::empty() };
///     recorder.write_record(record).unwrap();
/// }
/// assert_eq!(recorder.records_written(), 2);
/// drop(recorder);
///
/// let mut player = Player::new(BufReader::new(buf.as_slice())).unwrap();
/// assert_eq!(player.next_record().unwrap().unwrap().tick, 1);
/// assert_eq!(player.next_record().unwrap().unwrap().tick, 2);
/// assert!(player.next_record().unwrap().is_none());
/// ```
pub struct Recorder<W: Write> {
    writer: W,
    chunk_size: usize,
    queue_depth: usize,
    records_written: u64,
}

impl<W: Write> Recorder<W> {
    /// Create a new recorder with the default pipeline geometry,
    /// immediately writing the header line.
    pub fn new(writer: W) -> Result<Self, JournalError> {
        Self::with_geometry(writer, DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_DEPTH)
    }

    /// Create a new recorder with an explicit chunk size and queue
    /// depth, immediately writing the header line.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` or `queue_depth` is zero.
    pub fn with_geometry(
        mut writer: W,
        chunk_size: usize,
        queue_depth: usize,
    ) -> Result<Self, JournalError> {
        assert!(chunk_size > 0, "chunk_size must be positive");
        assert!(queue_depth > 0, "queue_depth must be positive");
        let mut header = Vec::with_capacity(MAGIC.len() + 1);
        header.extend_from_slice(&MAGIC);
        header.push(FORMAT_VERSION);
        writer.write_all(hex::encode(&header).as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(Self {
            writer,
            chunk_size,
            queue_depth,
            records_written: 0,
        })
    }

    /// Record one snapshot: serialize it chunk by chunk, writing each
    /// chunk as one hexadecimal line, then a blank terminator line.
    pub fn write_record(&mut self, record: Record) -> Result<(), JournalError> {
        let mut serializer = PullSerializer::new(self.chunk_size, self.queue_depth);
        serializer.start(record);
        while let Some(chunk) = serializer.pull() {
            self.writer.write_all(hex::encode(chunk.as_slice()).as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        serializer.join()?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), JournalError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Consume the recorder and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
