//! Binary encode/decode for journal records.
//!
//! All integers and floats are little-endian. Collections are
//! length-prefixed with a `u32` count. Floats are written bit-exactly,
//! so a recorded snapshot replays to the same bits it was captured
//! with. The format is intentionally simple: no compression, no
//! alignment padding, no self-describing schema.

use std::io::{Read, Write};

use apsis_core::{BodyId, BodyState, StateSnapshot, Trajectory, TrajectoryPoint};

use crate::error::JournalError;

// ── Primitive writers ───────────────────────────────────────────

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), JournalError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), JournalError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f64.
pub fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), JournalError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write three little-endian f64 components.
pub fn write_vec3_le(w: &mut dyn Write, v: &[f64; 3]) -> Result<(), JournalError> {
    for component in v {
        write_f64_le(w, *component)?;
    }
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, JournalError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, JournalError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian f64.
pub fn read_f64_le(r: &mut dyn Read) -> Result<f64, JournalError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

/// Read three little-endian f64 components.
pub fn read_vec3_le(r: &mut dyn Read) -> Result<[f64; 3], JournalError> {
    Ok([read_f64_le(r)?, read_f64_le(r)?, read_f64_le(r)?])
}

// ── Snapshot encode/decode ──────────────────────────────────────

/// Encode a state snapshot.
///
/// Layout: time, body count, bodies (id, mass, position, velocity),
/// trajectory count, trajectories (id, point count, points).
pub fn encode_snapshot(w: &mut dyn Write, snapshot: &StateSnapshot) -> Result<(), JournalError> {
    write_f64_le(w, snapshot.time)?;

    write_u32_le(w, snapshot.bodies.len() as u32)?;
    for body in &snapshot.bodies {
        write_u32_le(w, body.body.0)?;
        write_f64_le(w, body.mass)?;
        write_vec3_le(w, &body.position)?;
        write_vec3_le(w, &body.velocity)?;
    }

    write_u32_le(w, snapshot.trajectories.len() as u32)?;
    for trajectory in &snapshot.trajectories {
        write_u32_le(w, trajectory.body.0)?;
        write_u32_le(w, trajectory.points.len() as u32)?;
        for point in &trajectory.points {
            write_f64_le(w, point.time)?;
            write_vec3_le(w, &point.position)?;
            write_vec3_le(w, &point.velocity)?;
        }
    }

    Ok(())
}

/// Decode a state snapshot.
pub fn decode_snapshot(r: &mut dyn Read) -> Result<StateSnapshot, JournalError> {
    let time = read_f64_le(r)?;

    let body_count = read_u32_le(r)? as usize;
    let mut bodies = Vec::with_capacity(body_count.min(MAX_PREALLOC));
    for _ in 0..body_count {
        bodies.push(BodyState {
            body: BodyId(read_u32_le(r)?),
            mass: read_f64_le(r)?,
            position: read_vec3_le(r)?,
            velocity: read_vec3_le(r)?,
        });
    }

    let trajectory_count = read_u32_le(r)? as usize;
    let mut trajectories = Vec::with_capacity(trajectory_count.min(MAX_PREALLOC));
    for _ in 0..trajectory_count {
        let body = BodyId(read_u32_le(r)?);
        let point_count = read_u32_le(r)? as usize;
        let mut points = Vec::with_capacity(point_count.min(MAX_PREALLOC));
        for _ in 0..point_count {
            points.push(TrajectoryPoint {
                time: read_f64_le(r)?,
                position: read_vec3_le(r)?,
                velocity: read_vec3_le(r)?,
            });
        }
        trajectories.push(Trajectory { body, points });
    }

    Ok(StateSnapshot {
        time,
        bodies,
        trajectories,
    })
}

/// Cap on speculative preallocation from untrusted counts.
const MAX_PREALLOC: usize = 4096;
