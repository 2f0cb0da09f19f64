//! Core deterministic primitives.
//!
//! Fixed-point scalars and vectors plus state hashing. Everything the
//! movement code computes goes through these types.

pub mod fixed;
pub mod vec2;
pub mod hash;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE, TICK_DURATION};
pub use vec2::FixedVec2;
pub use hash::{StateHash, StateHasher};
