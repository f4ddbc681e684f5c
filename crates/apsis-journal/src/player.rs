//! Journal playback reader.
//!
//! [`Player`] reads records from any `BufRead` source, feeding each
//! hexadecimal line into a [`PushDeserializer`] as it is decoded. The
//! header line is validated on construction.

use std::io::BufRead;

use apsis_stream::PushDeserializer;

use crate::error::JournalError;
use crate::hex;
use crate::record::Record;
use crate::{DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_DEPTH, FORMAT_VERSION, MAGIC};

/// Reads journal data from a text stream.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` (via
/// `BufReader`) and production code can use `BufReader<File>`.
pub struct Player<R: BufRead> {
    reader: R,
    chunk_size: usize,
    queue_depth: usize,
    records_read: u64,
    line: String,
}

impl<R: BufRead> Player<R> {
    /// Open a journal stream with the default pipeline geometry,
    /// reading and validating the header line.
    pub fn new(reader: R) -> Result<Self, JournalError> {
        Self::with_geometry(reader, DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_DEPTH)
    }

    /// Open a journal stream with an explicit chunk size and queue
    /// depth, reading and validating the header line.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` or `queue_depth` is zero.
    pub fn with_geometry(
        mut reader: R,
        chunk_size: usize,
        queue_depth: usize,
    ) -> Result<Self, JournalError> {
        assert!(chunk_size > 0, "chunk_size must be positive");
        assert!(queue_depth > 0, "queue_depth must be positive");
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(JournalError::InvalidMagic);
        }
        let header = hex::decode(line.trim_end().as_bytes())?;
        if header.len() != MAGIC.len() + 1 || header[..MAGIC.len()] != MAGIC {
            return Err(JournalError::InvalidMagic);
        }
        let version = header[MAGIC.len()];
        if version != FORMAT_VERSION {
            return Err(JournalError::UnsupportedVersion { found: version });
        }
        Ok(Self {
            reader,
            chunk_size,
            queue_depth,
            records_read: 0,
            line,
        })
    }

    /// Read the next record, or `None` if the journal is exhausted.
    ///
    /// Blank separator lines between records are skipped. A journal
    /// that ends in the middle of a record (content lines with no
    /// blank terminator) is reported as a malformed record.
    pub fn next_record(&mut self) -> Result<Option<Record>, JournalError> {
        // Find the first content line of the next record.
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if !self.line.trim_end().is_empty() {
                break;
            }
        }

        let mut deserializer = PushDeserializer::<Record>::new(self.chunk_size, self.queue_depth);
        deserializer.start();
        loop {
            let bytes = hex::decode(self.line.trim_end().as_bytes())?;
            deserializer.push(&bytes);
            if !self.read_line()? {
                return Err(JournalError::MalformedRecord {
                    detail: "journal ended inside a record (missing blank terminator)".into(),
                });
            }
            if self.line.trim_end().is_empty() {
                break;
            }
        }
        deserializer.push(&[]);
        let record = deserializer.join()?;
        self.records_read += 1;
        Ok(Some(record))
    }

    /// Number of records read so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Convert into a record iterator.
    pub fn records(self) -> RecordIter<R> {
        RecordIter {
            player: self,
            done: false,
        }
    }

    /// Read one line into the buffer, returning false on EOF.
    fn read_line(&mut self) -> Result<bool, JournalError> {
        self.line.clear();
        Ok(self.reader.read_line(&mut self.line)? != 0)
    }
}

/// Iterator adapter over journal records.
pub struct RecordIter<R: BufRead> {
    player: Player<R>,
    done: bool,
}

impl<R: BufRead> Iterator for RecordIter<R> {
    type Item = Result<Record, JournalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.player.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
