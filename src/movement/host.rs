//! Host Services
//!
//! The seams between a mover and whatever world it lives in. A host
//! supplies a segment obstruction test, position storage and capability
//! lookup; `grid::GridWorld` is the reference implementation.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::fixed::Fixed;
use crate::core::vec2::FixedVec2;
use crate::movement::layer::LayerMask;

/// Host-issued entity handle.
///
/// Implements Ord so hosts can break ties deterministically.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// First obstruction found along a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// The obstructing entity.
    pub entity: EntityId,
    /// Where the segment enters it.
    pub point: FixedVec2,
    /// Fraction along the segment, 0 = start, FIXED_ONE = end.
    pub fraction: Fixed,
}

/// Segment obstruction test.
pub trait CollisionQuery {
    /// Cast a segment from `start` to `end` against bodies whose layer is in
    /// `mask`, skipping `ignore` (the caster's own body).
    ///
    /// Returns the nearest hit, or `None` when the path is clear.
    fn linecast(
        &self,
        start: FixedVec2,
        end: FixedVec2,
        mask: LayerMask,
        ignore: Option<EntityId>,
    ) -> Option<Hit>;
}

/// Position read/write for entities.
pub trait Transforms {
    /// Current position, or `None` for an unknown entity.
    fn position(&self, entity: EntityId) -> Option<FixedVec2>;

    /// Overwrite the position. Returns false for an unknown entity.
    fn set_position(&mut self, entity: EntityId, position: FixedVec2) -> bool;
}

/// "Does entity E expose capability C?"
pub trait Capability<C> {
    /// Mutable handle to the capability, if the entity carries it.
    fn capability_mut(&mut self, entity: EntityId) -> Option<&mut C>;
}
