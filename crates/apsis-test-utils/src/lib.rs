//! Test fixtures shared across the Apsis workspace.
//!
//! Provides a minimal [`Message`] implementation ([`ByteBlob`]) for
//! exercising the streaming pipeline without dragging in the journal
//! codec, plus deterministic generators for payloads and snapshots
//! (seeded ChaCha8, so failures reproduce exactly).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::io::{self, Read, Write};

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use apsis_core::{BodyId, BodyState, StateSnapshot, Trajectory, TrajectoryPoint};
use apsis_stream::{DelegatingInputStream, DelegatingOutputStream, Message};

/// A length-prefixed opaque byte payload.
///
/// The simplest possible pipeline message: a `u32` little-endian length
/// followed by the raw bytes. Round-tripping a `ByteBlob` checks that the
/// pipeline preserves content bit-for-bit without involving any real
/// domain codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteBlob(pub Vec<u8>);

impl Message for ByteBlob {
    type Error = io::Error;

    fn encode_to(&self, stream: &mut DelegatingOutputStream) -> Result<(), io::Error> {
        stream.write_all(&(self.0.len() as u32).to_le_bytes())?;
        stream.write_all(&self.0)
    }

    fn decode_from(stream: &mut DelegatingInputStream) -> Result<Self, io::Error> {
        let mut len_buf = [0u8; 4];
        stream.read_exact(&mut len_buf)?;
        let len = u32::from_le_bytes(len_buf) as usize;
        let mut bytes = vec![0u8; len];
        stream.read_exact(&mut bytes)?;
        Ok(ByteBlob(bytes))
    }
}

/// Deterministic pseudo-random payload of `len` bytes.
pub fn deterministic_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Deterministic pseudo-random f64 in roughly [-1e9, 1e9).
fn random_coord(rng: &mut ChaCha8Rng) -> f64 {
    let unit = (rng.next_u32() as f64) / (u32::MAX as f64);
    (unit - 0.5) * 2.0e9
}

/// Deterministic pseudo-random snapshot with `bodies` bodies, each
/// carrying a trajectory of `points_per_body` samples.
pub fn random_snapshot(seed: u64, bodies: usize, points_per_body: usize) -> StateSnapshot {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut snapshot = StateSnapshot {
        time: random_coord(&mut rng).abs(),
        bodies: Vec::with_capacity(bodies),
        trajectories: Vec::with_capacity(bodies),
    };
    for b in 0..bodies {
        let body = BodyId(b as u32);
        snapshot.bodies.push(BodyState {
            body,
            mass: random_coord(&mut rng).abs() * 1.0e15,
            position: [
                random_coord(&mut rng),
                random_coord(&mut rng),
                random_coord(&mut rng),
            ],
            velocity: [
                random_coord(&mut rng),
                random_coord(&mut rng),
                random_coord(&mut rng),
            ],
        });
        let mut points = Vec::with_capacity(points_per_body);
        for p in 0..points_per_body {
            points.push(TrajectoryPoint {
                time: p as f64 * 10.0,
                position: [
                    random_coord(&mut rng),
                    random_coord(&mut rng),
                    random_coord(&mut rng),
                ],
                velocity: [
                    random_coord(&mut rng),
                    random_coord(&mut rng),
                    random_coord(&mut rng),
                ],
            });
        }
        snapshot.trajectories.push(Trajectory { body, points });
    }
    snapshot
}
