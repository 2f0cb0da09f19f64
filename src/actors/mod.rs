//! Actors
//!
//! Concrete movable entities. Each decides what to do with whatever blocks
//! its step by implementing `BlockedBy<C>` for one capability.
//!
//! - `components`: Capabilities actors act on (`Breakable`, `FoodSupply`)
//! - `player`: Breaks walls it walks into
//! - `enemy`: Chases the player and drains its food

pub mod components;
pub mod player;
pub mod enemy;

pub use components::{Breakable, FoodSupply};
pub use player::Player;
pub use enemy::Enemy;
