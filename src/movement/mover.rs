//! Grid Mover
//!
//! Collision-checked single-cell steps and the per-frame transition that
//! slides an entity onto its target tile.
//!
//! ```text
//!            try_move (clear)             advance (remaining == 0)
//!   Idle ─────────────────────▶ Transitioning ─────────────────────▶ Idle
//!    │                               │
//!    │ try_move (obstructed)         │ try_move: per OverlapPolicy
//!    ▼                               ▼
//!  Blocked (position unchanged)    Busy / Restart / Concurrent
//! ```

use tracing::{debug, trace, warn};

use crate::core::fixed::{Fixed, MOVE_EPSILON_SQ, fixed_mul_saturating, fixed_recip};
use crate::core::vec2::FixedVec2;
use crate::movement::config::{ConfigError, MoverConfig, OverlapPolicy};
use crate::movement::events::MoveEvent;
use crate::movement::host::{CollisionQuery, EntityId, Hit, Transforms};

/// Result of a step attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Path was clear; a transition toward `to` has started.
    Moved {
        /// Position when the step was requested
        from: FixedVec2,
        /// Target tile
        to: FixedVec2,
    },
    /// Something on a blocking layer is in the way.
    Blocked(Hit),
    /// A transition is running and the policy is `OverlapPolicy::Ignore`.
    Busy,
}

impl MoveOutcome {
    /// Did the step start a transition?
    #[inline]
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    /// Obstruction, if the step was blocked.
    #[inline]
    pub fn hit(&self) -> Option<Hit> {
        match self {
            MoveOutcome::Blocked(hit) => Some(*hit),
            _ => None,
        }
    }
}

/// Movement errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The host has no position for this entity.
    #[error("No transform for entity {0}")]
    MissingTransform(EntityId),

    /// The step would leave the Q16.16 coordinate range.
    #[error("Step ({dx}, {dy}) from {entity} is outside the coordinate range")]
    OffsetOutOfRange {
        /// Entity that tried to step
        entity: EntityId,
        /// Requested x offset in cells
        dx: i32,
        /// Requested y offset in cells
        dy: i32,
    },
}

/// An in-flight slide toward a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Tile being moved to.
    pub target: FixedVec2,
}

/// Moves one entity cell by cell.
#[derive(Clone, Debug)]
pub struct Mover {
    entity: EntityId,
    config: MoverConfig,
    /// Cells per second, 1 / move_time
    inverse_move_time: Fixed,
    transitions: Vec<Transition>,
    events: Vec<MoveEvent>,
}

impl Mover {
    /// Create a mover for `entity`.
    ///
    /// Fails if the configured move time is not positive.
    pub fn new(entity: EntityId, config: MoverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let inverse_move_time = fixed_recip(config.move_time);
        Ok(Self {
            entity,
            config,
            inverse_move_time,
            transitions: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Entity this mover drives.
    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &MoverConfig {
        &self.config
    }

    /// Derived rate in cells per second.
    #[inline]
    pub fn inverse_move_time(&self) -> Fixed {
        self.inverse_move_time
    }

    /// Is a transition running?
    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Transitions currently running, oldest first (more than one only
    /// under `OverlapPolicy::Concurrent`).
    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Target of the most recent transition, if any.
    pub fn target(&self) -> Option<FixedVec2> {
        self.transitions.last().map(|t| t.target)
    }

    /// Drain accumulated events.
    pub fn take_events(&mut self) -> Vec<MoveEvent> {
        std::mem::take(&mut self.events)
    }

    /// Try to step by `(dx, dy)` cells.
    ///
    /// Casts a single segment from the current position to the target,
    /// restricted to the blocking layers and ignoring this entity's own
    /// body. On a clear path a transition starts; on a hit the position
    /// is left untouched.
    pub fn try_move<W>(&mut self, world: &mut W, dx: i32, dy: i32) -> Result<MoveOutcome, MoveError>
    where
        W: CollisionQuery + Transforms + ?Sized,
    {
        if self.is_moving() {
            match self.config.overlap {
                OverlapPolicy::Ignore => {
                    warn!(entity = %self.entity, dx, dy, "step ignored, transition in flight");
                    self.events.push(MoveEvent::Ignored { entity: self.entity });
                    return Ok(MoveOutcome::Busy);
                }
                OverlapPolicy::Restart => self.snap_to_target(world)?,
                OverlapPolicy::Concurrent => {}
            }
        }

        let start = world
            .position(self.entity)
            .ok_or(MoveError::MissingTransform(self.entity))?;
        let end = FixedVec2::checked_from_ints(dx, dy)
            .and_then(|offset| start.checked_add(offset))
            .ok_or(MoveError::OffsetOutOfRange { entity: self.entity, dx, dy })?;

        if let Some(hit) = world.linecast(start, end, self.config.blocking_layers, Some(self.entity)) {
            debug!(entity = %self.entity, by = %hit.entity, target = %end, "step blocked");
            self.events.push(MoveEvent::Blocked {
                entity: self.entity,
                target: end,
                by: hit.entity,
            });
            return Ok(MoveOutcome::Blocked(hit));
        }

        debug!(entity = %self.entity, from = %start, to = %end, "transition started");
        self.transitions.push(Transition { target: end });
        self.events.push(MoveEvent::Started {
            entity: self.entity,
            from: start,
            to: end,
        });
        Ok(MoveOutcome::Moved { from: start, to: end })
    }

    /// Advance the running transition by one frame of `dt` seconds.
    ///
    /// The position moves toward the target by `inverse_move_time * dt`
    /// and the transition finishes once nothing remains. With several
    /// transitions in flight the most recent one drives the position and
    /// earlier ones resume after it completes. Returns whether anything is
    /// still moving.
    pub fn advance<W>(&mut self, world: &mut W, dt: Fixed) -> Result<bool, MoveError>
    where
        W: Transforms + ?Sized,
    {
        let Some(active) = self.transitions.last().copied() else {
            return Ok(false);
        };

        let entity = self.entity;
        let position = world
            .position(entity)
            .ok_or(MoveError::MissingTransform(entity))?;
        let step = fixed_mul_saturating(self.inverse_move_time, dt.max(0));

        let position = position.move_towards(active.target, step);
        if !world.set_position(entity, position) {
            return Err(MoveError::MissingTransform(entity));
        }
        trace!(entity = %entity, position = %position, step, "advanced");

        let remaining = position.distance_squared_wide(active.target);
        if remaining <= MOVE_EPSILON_SQ {
            self.transitions.pop();
            debug!(entity = %entity, at = %active.target, "transition completed");
            self.events.push(MoveEvent::Completed {
                entity,
                at: active.target,
            });
        }
        Ok(self.is_moving())
    }

    /// Finish any running transition instantly at its target.
    pub fn snap_to_target<W>(&mut self, world: &mut W) -> Result<(), MoveError>
    where
        W: Transforms + ?Sized,
    {
        let Some(target) = self.target() else {
            return Ok(());
        };
        if !world.set_position(self.entity, target) {
            return Err(MoveError::MissingTransform(self.entity));
        }
        self.transitions.clear();
        debug!(entity = %self.entity, at = %target, "transition cut short");
        self.events.push(MoveEvent::Restarted {
            entity: self.entity,
            snapped_to: target,
        });
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use crate::core::fixed::TICK_DURATION;
    use crate::grid::GridWorld;
    use crate::movement::layer::Layer;

    proptest! {
        #[test]
        fn clear_steps_land_exactly(dx in -1i32..=1, dy in -1i32..=1, x in -50i32..50, y in -50i32..50) {
            let mut world = GridWorld::new();
            let id = world.spawn((x, y), Layer::BLOCKING);
            let mut mover = Mover::new(id, MoverConfig::default()).unwrap();

            prop_assert!(mover.try_move(&mut world, dx, dy).unwrap().moved());
            let mut frames = 0;
            while mover.advance(&mut world, TICK_DURATION).unwrap() {
                frames += 1;
                prop_assert!(frames < 100);
            }
            prop_assert_eq!(world.position(id), Some(FixedVec2::from_ints(x + dx, y + dy)));
        }

        #[test]
        fn blocked_steps_never_move(dx in -1i32..=1, dy in -1i32..=1) {
            prop_assume!(dx != 0 || dy != 0);
            let mut world = GridWorld::new();
            let id = world.spawn((0, 0), Layer::BLOCKING);
            world.spawn((dx, dy), Layer::BLOCKING);
            let mut mover = Mover::new(id, MoverConfig::default()).unwrap();

            prop_assert!(!mover.try_move(&mut world, dx, dy).unwrap().moved());
            for _ in 0..10 {
                mover.advance(&mut world, TICK_DURATION).unwrap();
            }
            prop_assert_eq!(world.position(id), Some(FixedVec2::ZERO));
        }

        #[test]
        fn duration_matches_configured_time(move_time in 3_277i32..196_608) {
            // 0.05 s .. 3 s
            let mut world = GridWorld::new();
            let id = world.spawn((0, 0), Layer::BLOCKING);
            let mut mover = Mover::new(id, MoverConfig::with_move_time(move_time)).unwrap();

            mover.try_move(&mut world, 1, 0).unwrap();
            let mut frames: i64 = 1;
            while mover.advance(&mut world, TICK_DURATION).unwrap() {
                frames += 1;
            }
            let expected = move_time as i64 / TICK_DURATION as i64;
            prop_assert!(frames >= expected && frames <= expected + 2,
                "move_time {} took {} frames, expected ~{}", move_time, frames, expected);
        }

        #[test]
        fn tiny_durations_finish_fast(move_time in 1i32..64) {
            let mut world = GridWorld::new();
            let id = world.spawn((0, 0), Layer::BLOCKING);
            let mut mover = Mover::new(id, MoverConfig::with_move_time(move_time)).unwrap();

            mover.try_move(&mut world, 0, 1).unwrap();
            let mut frames = 1;
            while mover.advance(&mut world, TICK_DURATION).unwrap() {
                frames += 1;
            }
            prop_assert!(frames <= 2);
        }
    }
}
