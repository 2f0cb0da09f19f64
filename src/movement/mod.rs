//! Movement Module
//!
//! Grid stepping and transition logic. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `host`: Traits a world implements (collision, transforms, capabilities)
//! - `layer`: Collision layers and masks
//! - `config`: Per-mover settings and their JSON form
//! - `mover`: Step attempts and per-frame transitions
//! - `entity`: `Movable` game objects and their blocked handlers
//! - `clock`: Frame delta sources
//! - `events`: Movement events for logging and replay

pub mod host;
pub mod layer;
pub mod config;
pub mod mover;
pub mod entity;
pub mod clock;
pub mod events;

// Re-export key types
pub use host::{Capability, CollisionQuery, EntityId, Hit, Transforms};
pub use layer::{Layer, LayerMask};
pub use config::{ConfigError, MoverConfig, OverlapPolicy};
pub use mover::{MoveError, MoveOutcome, Mover, Transition};
pub use entity::{BlockedBy, Movable};
pub use clock::{FixedStepClock, FrameClock, ScriptedClock, run_until_idle};
pub use events::MoveEvent;
