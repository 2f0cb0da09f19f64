//! # Gridstep
//!
//! Deterministic grid-based tile movement: collision-checked single-cell
//! steps and smooth per-frame transitions onto the target tile.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         GRIDSTEP                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── vec2.rs     - 2D vector, move-towards                   │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  movement/       - Stepping and transitions                  │
//! │  ├── host.rs     - Collision / transform / capability traits │
//! │  ├── mover.rs    - Step attempts and per-frame advance       │
//! │  ├── entity.rs   - Movable objects and blocked handlers      │
//! │  └── clock.rs    - Frame delta sources                       │
//! │                                                              │
//! │  grid/           - Reference host world                      │
//! │  actors/         - Player and enemy                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Loop
//!
//! A host calls `Movable::attempt_move` when an actor wants to step and
//! `Mover::advance` once per frame with that frame's elapsed time. All
//! arithmetic is fixed-point, so identical steps and frame deltas produce
//! identical positions on every platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod movement;
pub mod grid;
pub mod actors;

// Re-export commonly used types
pub use core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE, TICK_DURATION};
pub use core::vec2::FixedVec2;
pub use movement::{
    BlockedBy, Capability, CollisionQuery, EntityId, Hit, Layer, LayerMask, Movable,
    MoveError, MoveEvent, MoveOutcome, Mover, MoverConfig, OverlapPolicy, Transforms,
};
pub use grid::GridWorld;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frame rate the default clock and constants assume (Hz)
pub const TICK_RATE: u32 = 60;
