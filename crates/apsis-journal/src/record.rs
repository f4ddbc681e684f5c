//! The unit of journal storage: one snapshot tagged with its tick.

use apsis_core::StateSnapshot;
use apsis_stream::{DelegatingInputStream, DelegatingOutputStream, Message};

use crate::codec::{decode_snapshot, encode_snapshot, read_u64_le, write_u64_le};
use crate::error::JournalError;

/// A journal record: a state snapshot captured at a simulation tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The tick at which the snapshot was captured.
    pub tick: u64,
    /// The captured simulation state.
    pub snapshot: StateSnapshot,
}

impl Message for Record {
    type Error = JournalError;

    fn encode_to(&self, stream: &mut DelegatingOutputStream) -> Result<(), JournalError> {
        write_u64_le(stream, self.tick)?;
        encode_snapshot(stream, &self.snapshot)?;
        Ok(())
    }

    fn decode_from(stream: &mut DelegatingInputStream) -> Result<Self, JournalError> {
        let tick = read_u64_le(stream)?;
        let snapshot = decode_snapshot(stream)?;
        // A record owns its stream to the sentinel; any bytes past the
        // snapshot are corruption, not padding.
        if stream.next().is_some() {
            return Err(JournalError::MalformedRecord {
                detail: "trailing bytes after the snapshot".into(),
            });
        }
        Ok(Record { tick, snapshot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apsis_stream::{PullSerializer, PushDeserializer};
    use apsis_test_utils::random_snapshot;

    #[test]
    fn record_roundtrips_through_pipeline() {
        let record = Record {
            tick: 42,
            snapshot: random_snapshot(9, 4, 8),
        };

        let mut serializer = PullSerializer::new(64, 4);
        let mut deserializer = PushDeserializer::<Record>::new(64, 4);
        serializer.start(record.clone());
        deserializer.start();
        while let Some(chunk) = serializer.pull() {
            deserializer.push(chunk.as_slice());
        }
        serializer.join().unwrap();
        deserializer.push(&[]);
        let got = deserializer.join().unwrap();
        assert_eq!(record, got);
    }

    #[test]
    fn trailing_bytes_after_snapshot_rejected() {
        let record = Record {
            tick: 3,
            snapshot: random_snapshot(3, 2, 4),
        };

        let mut serializer = PullSerializer::new(32, 2);
        let mut deserializer = PushDeserializer::<Record>::new(32, 2);
        serializer.start(record);
        deserializer.start();
        while let Some(chunk) = serializer.pull() {
            deserializer.push(chunk.as_slice());
        }
        serializer.join().unwrap();
        deserializer.push(&[0xDE, 0xAD]);
        deserializer.push(&[]);
        assert!(matches!(
            deserializer.join(),
            Err(JournalError::MalformedRecord { .. })
        ));
    }
}
