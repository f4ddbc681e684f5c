//! Simulation state types persisted by the journal.
//!
//! These are plain data carriers: positions and velocities are barycentric
//! inertial-frame coordinates in SI units. The codec that puts them on the
//! wire lives in `apsis-journal`; this crate knows nothing about encoding.

use crate::id::BodyId;

/// Instantaneous dynamical state of one body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyState {
    /// The body this state belongs to.
    pub body: BodyId,
    /// Gravitational mass in kilograms.
    pub mass: f64,
    /// Barycentric position in metres.
    pub position: [f64; 3],
    /// Barycentric velocity in metres per second.
    pub velocity: [f64; 3],
}

/// One sampled point of a propagated trajectory.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryPoint {
    /// Simulation time of the sample, in seconds since epoch.
    pub time: f64,
    /// Barycentric position in metres.
    pub position: [f64; 3],
    /// Barycentric velocity in metres per second.
    pub velocity: [f64; 3],
}

/// The sampled history of one body's motion.
///
/// Points are ordered by strictly increasing `time`. A trajectory may be
/// arbitrarily long — histories accumulated over a long game session are
/// the reason the journal streams state through a bounded-memory pipeline
/// instead of materialising an encoded copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// The body whose motion this trajectory records.
    pub body: BodyId,
    /// Time-ordered samples.
    pub points: Vec<TrajectoryPoint>,
}

/// A complete snapshot of simulation state at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Simulation time of the snapshot, in seconds since epoch.
    pub time: f64,
    /// Current state of every body in the system.
    pub bodies: Vec<BodyState>,
    /// Accumulated trajectory histories.
    pub trajectories: Vec<Trajectory>,
}

impl StateSnapshot {
    /// An empty snapshot at time zero.
    pub fn empty() -> Self {
        Self {
            time: 0.0,
            bodies: Vec::new(),
            trajectories: Vec::new(),
        }
    }

    /// Total number of trajectory points across all bodies.
    pub fn point_count(&self) -> usize {
        self.trajectories.iter().map(|t| t.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_no_points() {
        let snap = StateSnapshot::empty();
        assert_eq!(snap.time, 0.0);
        assert!(snap.bodies.is_empty());
        assert_eq!(snap.point_count(), 0);
    }

    #[test]
    fn point_count_sums_across_trajectories() {
        let point = TrajectoryPoint {
            time: 0.0,
            position: [0.0; 3],
            velocity: [0.0; 3],
        };
        let snap = StateSnapshot {
            time: 1.0,
            bodies: vec![],
            trajectories: vec![
                Trajectory {
                    body: BodyId(0),
                    points: vec![point.clone(); 3],
                },
                Trajectory {
                    body: BodyId(1),
                    points: vec![point; 2],
                },
            ],
        };
        assert_eq!(snap.point_count(), 5);
    }
}
