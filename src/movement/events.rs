//! Movement Events
//!
//! Emitted by movers for logging and replay checks.

use serde::{Serialize, Deserialize};

use crate::core::vec2::FixedVec2;
use crate::movement::host::EntityId;

/// Something a mover did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveEvent {
    /// A transition began.
    Started {
        entity: EntityId,
        from: FixedVec2,
        to: FixedVec2,
    },

    /// A step was obstructed.
    Blocked {
        entity: EntityId,
        target: FixedVec2,
        by: EntityId,
    },

    /// A transition reached its target.
    Completed {
        entity: EntityId,
        at: FixedVec2,
    },

    /// A step was dropped because a transition was running.
    Ignored {
        entity: EntityId,
    },

    /// A running transition was cut short and snapped to its target.
    Restarted {
        entity: EntityId,
        snapped_to: FixedVec2,
    },
}

impl MoveEvent {
    /// Entity the event is about.
    pub fn entity(&self) -> EntityId {
        match self {
            MoveEvent::Started { entity, .. }
            | MoveEvent::Blocked { entity, .. }
            | MoveEvent::Completed { entity, .. }
            | MoveEvent::Ignored { entity }
            | MoveEvent::Restarted { entity, .. } => *entity,
        }
    }
}
