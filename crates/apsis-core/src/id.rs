//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a celestial body within a simulation.
///
/// Bodies are registered at simulation creation and assigned sequential
/// IDs. `BodyId(n)` corresponds to the n-th body in the system
/// configuration; the ID is stable across save/load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BodyId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
