//! Player
//!
//! Steps on command, spends food per step, and chops at walls it walks into.

use tracing::debug;

use crate::actors::components::{Breakable, FoodSupply};
use crate::movement::config::{ConfigError, MoverConfig};
use crate::movement::entity::{BlockedBy, Movable};
use crate::movement::host::{Capability, CollisionQuery, EntityId, Transforms};
use crate::movement::mover::{MoveError, MoveOutcome, Mover};

/// Player-controlled actor.
#[derive(Clone, Debug)]
pub struct Player {
    mover: Mover,
    /// Damage dealt to a wall per bump
    pub wall_damage: u32,
    /// Food spent on every step attempt that isn't refused as busy
    pub food_per_step: u32,
    /// Walls bumped so far
    pub walls_hit: u32,
}

impl Player {
    /// Player driving `entity`.
    pub fn new(entity: EntityId, config: MoverConfig, wall_damage: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            mover: Mover::new(entity, config)?,
            wall_damage,
            food_per_step: 1,
            walls_hit: 0,
        })
    }

    /// Entity this player drives.
    pub fn entity(&self) -> EntityId {
        self.mover.entity()
    }

    /// Take one turn: try to step by `(dx, dy)`, then pay food unless the
    /// step was refused as busy.
    pub fn step<W>(&mut self, world: &mut W, dx: i32, dy: i32) -> Result<MoveOutcome, MoveError>
    where
        W: CollisionQuery + Transforms + Capability<Breakable> + Capability<FoodSupply> + ?Sized,
    {
        let outcome = self.attempt_move::<Breakable, W>(world, dx, dy)?;
        if outcome != MoveOutcome::Busy {
            let entity = self.entity();
            if let Some(supply) = Capability::<FoodSupply>::capability_mut(world, entity) {
                supply.lose(self.food_per_step);
            }
        }
        Ok(outcome)
    }
}

impl Movable for Player {
    fn mover(&self) -> &Mover {
        &self.mover
    }

    fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }
}

impl BlockedBy<Breakable> for Player {
    fn on_cant_move(&mut self, wall: &mut Breakable) {
        self.walls_hit += 1;
        let broke = wall.damage(self.wall_damage);
        debug!(player = %self.entity(), hit_points = wall.hit_points, broke, "chopped wall");
    }
}
