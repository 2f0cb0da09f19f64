//! Grid World State
//!
//! Reference host: tile bodies, their positions, and the capabilities
//! attached to them. Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::fixed::{Fixed, DEFAULT_HALF_EXTENT};
use crate::core::hash::{StateHash, StateHasher};
use crate::core::vec2::FixedVec2;
use crate::actors::components::{Breakable, FoodSupply};
use crate::movement::host::{Capability, EntityId, Transforms};
use crate::movement::layer::Layer;

/// An axis-aligned square collider centred on its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Centre of the body
    pub position: FixedVec2,
    /// Layer the body sits on
    pub layer: Layer,
    /// Half the side length
    pub half_extent: Fixed,
    /// Disabled bodies are invisible to queries
    pub enabled: bool,
}

impl Body {
    /// Enabled body of the default size.
    pub fn new(position: FixedVec2, layer: Layer) -> Self {
        Self {
            position,
            layer,
            half_extent: DEFAULT_HALF_EXTENT,
            enabled: true,
        }
    }
}

/// Tile world holding bodies and their capabilities.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GridWorld {
    pub(crate) bodies: BTreeMap<EntityId, Body>,
    breakables: BTreeMap<EntityId, Breakable>,
    food_supplies: BTreeMap<EntityId, FoodSupply>,
    next_id: u32,
}

impl GridWorld {
    /// Empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a body centred on a tile.
    pub fn spawn(&mut self, tile: (i32, i32), layer: Layer) -> EntityId {
        self.spawn_body(Body::new(FixedVec2::from_ints(tile.0, tile.1), layer))
    }

    /// Spawn an arbitrary body.
    pub fn spawn_body(&mut self, body: Body) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, body);
        id
    }

    /// Spawn a blocking wall that breaks after `hit_points` damage.
    pub fn spawn_wall(&mut self, tile: (i32, i32), hit_points: u32) -> EntityId {
        let id = self.spawn(tile, Layer::BLOCKING);
        self.breakables.insert(id, Breakable::new(hit_points));
        id
    }

    /// Remove a body and everything attached to it.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.breakables.remove(&id);
        self.food_supplies.remove(&id);
        self.bodies.remove(&id).is_some()
    }

    /// Look up a body.
    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Enable or disable a body's collider. Returns false for an unknown id.
    pub fn set_enabled(&mut self, id: EntityId, enabled: bool) -> bool {
        match self.bodies.get_mut(&id) {
            Some(body) => {
                body.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Attach wall hit points to an existing body.
    pub fn attach_breakable(&mut self, id: EntityId, breakable: Breakable) -> bool {
        if !self.bodies.contains_key(&id) {
            return false;
        }
        self.breakables.insert(id, breakable);
        true
    }

    /// Attach a food supply to an existing body.
    pub fn attach_food_supply(&mut self, id: EntityId, supply: FoodSupply) -> bool {
        if !self.bodies.contains_key(&id) {
            return false;
        }
        self.food_supplies.insert(id, supply);
        true
    }

    /// Wall hit points, if the entity has them.
    pub fn breakable(&self, id: EntityId) -> Option<&Breakable> {
        self.breakables.get(&id)
    }

    /// Food supply, if the entity has one.
    pub fn food_supply(&self, id: EntityId) -> Option<&FoodSupply> {
        self.food_supplies.get(&id)
    }

    /// Despawn every broken wall, returning their ids in order.
    pub fn clear_broken(&mut self) -> Vec<EntityId> {
        let broken: Vec<EntityId> = self
            .breakables
            .iter()
            .filter(|(_, b)| b.is_broken())
            .map(|(id, _)| *id)
            .collect();

        for id in &broken {
            debug!(entity = %id, "wall broken");
            self.despawn(*id);
        }
        broken
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// No bodies?
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body ids in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.bodies.keys().copied()
    }

    /// Hash of all bodies and capabilities in id order.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_world_state();

        hasher.update_u32(self.bodies.len() as u32);
        for (id, body) in &self.bodies {
            hasher.update_u32(id.0);
            hasher.update_vec2(body.position);
            hasher.update_u8(body.layer.index());
            hasher.update_fixed(body.half_extent);
            hasher.update_bool(body.enabled);
        }

        hasher.update_u32(self.breakables.len() as u32);
        for (id, breakable) in &self.breakables {
            hasher.update_u32(id.0);
            hasher.update_u32(breakable.hit_points);
        }

        hasher.update_u32(self.food_supplies.len() as u32);
        for (id, supply) in &self.food_supplies {
            hasher.update_u32(id.0);
            hasher.update_u32(supply.food);
        }

        hasher.finalize()
    }
}

impl Transforms for GridWorld {
    fn position(&self, entity: EntityId) -> Option<FixedVec2> {
        self.bodies.get(&entity).map(|body| body.position)
    }

    fn set_position(&mut self, entity: EntityId, position: FixedVec2) -> bool {
        match self.bodies.get_mut(&entity) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }
}

impl Capability<Breakable> for GridWorld {
    fn capability_mut(&mut self, entity: EntityId) -> Option<&mut Breakable> {
        self.breakables.get_mut(&entity)
    }
}

impl Capability<FoodSupply> for GridWorld {
    fn capability_mut(&mut self, entity: EntityId) -> Option<&mut FoodSupply> {
        self.food_supplies.get_mut(&entity)
    }
}
