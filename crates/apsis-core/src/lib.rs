//! Core types for the Apsis n-body simulation library.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the strongly-typed identifiers and the simulation state types that
//! the journal subsystem persists: per-body dynamical state and the
//! trajectory histories accumulated by the integrator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod state;

pub use id::BodyId;
pub use state::{BodyState, StateSnapshot, Trajectory, TrajectoryPoint};
