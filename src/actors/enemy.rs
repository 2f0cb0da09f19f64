//! Enemy
//!
//! Chases a target one axis at a time, moving every other turn, and eats
//! into the target's food when it bumps into it.

use tracing::debug;

use crate::actors::components::FoodSupply;
use crate::movement::config::{ConfigError, MoverConfig};
use crate::movement::entity::{BlockedBy, Movable};
use crate::movement::host::{Capability, CollisionQuery, EntityId, Transforms};
use crate::movement::mover::{MoveError, MoveOutcome, Mover};

/// AI-controlled chaser.
#[derive(Clone, Debug)]
pub struct Enemy {
    mover: Mover,
    /// Food taken from the target per bump
    pub player_damage: u32,
    skip_move: bool,
}

impl Enemy {
    /// Enemy driving `entity`.
    pub fn new(entity: EntityId, config: MoverConfig, player_damage: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            mover: Mover::new(entity, config)?,
            player_damage,
            skip_move: false,
        })
    }

    /// Entity this enemy drives.
    pub fn entity(&self) -> EntityId {
        self.mover.entity()
    }

    /// Unit step toward `target`: vertical when in the same column,
    /// horizontal otherwise. `None` if either position is unknown.
    pub fn direction_towards<W>(&self, world: &W, target: EntityId) -> Option<(i32, i32)>
    where
        W: Transforms + ?Sized,
    {
        let (mx, my) = world.position(self.entity())?.to_tile();
        let (tx, ty) = world.position(target)?.to_tile();
        if mx == tx {
            Some((0, (ty - my).signum()))
        } else {
            Some(((tx - mx).signum(), 0))
        }
    }

    /// Take one turn chasing `target`.
    ///
    /// Returns `None` on a rest turn or when there is nothing to chase.
    pub fn take_turn<W>(&mut self, world: &mut W, target: EntityId) -> Result<Option<MoveOutcome>, MoveError>
    where
        W: CollisionQuery + Transforms + Capability<FoodSupply> + ?Sized,
    {
        if self.skip_move {
            self.skip_move = false;
            return Ok(None);
        }

        let Some((dx, dy)) = self.direction_towards(&*world, target) else {
            return Ok(None);
        };
        let outcome = self.attempt_move::<FoodSupply, W>(world, dx, dy)?;
        self.skip_move = true;
        Ok(Some(outcome))
    }
}

impl Movable for Enemy {
    fn mover(&self) -> &Mover {
        &self.mover
    }

    fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }
}

impl BlockedBy<FoodSupply> for Enemy {
    fn on_cant_move(&mut self, supply: &mut FoodSupply) {
        supply.lose(self.player_damage);
        debug!(enemy = %self.entity(), food = supply.food, "attacked player");
    }
}
