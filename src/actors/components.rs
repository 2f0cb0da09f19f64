//! Actor Capabilities
//!
//! Data other entities can act on when a step is blocked.

use serde::{Serialize, Deserialize};

/// Wall hit points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakable {
    /// Remaining hit points; 0 = broken
    pub hit_points: u32,
}

impl Breakable {
    /// Wall with `hit_points` left.
    pub const fn new(hit_points: u32) -> Self {
        Self { hit_points }
    }

    /// Apply damage. Returns true if this blow broke it.
    pub fn damage(&mut self, amount: u32) -> bool {
        let was_standing = !self.is_broken();
        self.hit_points = self.hit_points.saturating_sub(amount);
        was_standing && self.is_broken()
    }

    /// No hit points left?
    #[inline]
    pub fn is_broken(&self) -> bool {
        self.hit_points == 0
    }
}

/// A player's food.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSupply {
    /// Food remaining
    pub food: u32,
}

impl FoodSupply {
    /// Supply holding `food`.
    pub const fn new(food: u32) -> Self {
        Self { food }
    }

    /// Lose food, never going below zero.
    pub fn lose(&mut self, amount: u32) {
        self.food = self.food.saturating_sub(amount);
    }

    /// Gain food.
    pub fn gain(&mut self, amount: u32) {
        self.food = self.food.saturating_add(amount);
    }

    /// Out of food?
    #[inline]
    pub fn is_starving(&self) -> bool {
        self.food == 0
    }
}
