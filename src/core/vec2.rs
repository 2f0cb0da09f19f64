//! Fixed-Point 2D Vector
//!
//! Deterministic 2D vector operations for tile positions and transitions.
//! All operations use fixed-point arithmetic.

use std::fmt;
use std::ops::{Add, Sub, Neg};
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE, isqrt_wide, to_float};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// One cell right (+X)
    pub const RIGHT: Self = Self { x: FIXED_ONE, y: 0 };

    /// One cell up (+Y)
    pub const UP: Self = Self { x: 0, y: FIXED_ONE };

    /// One cell left (-X)
    pub const LEFT: Self = Self { x: -FIXED_ONE, y: 0 };

    /// One cell down (-Y)
    pub const DOWN: Self = Self { x: 0, y: -FIXED_ONE };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a vector from integer tile coordinates.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: x << FIXED_SCALE,
            y: y << FIXED_SCALE,
        }
    }

    /// Tile offset in fixed point, or `None` if it does not fit in Q16.16.
    #[inline]
    pub fn checked_from_ints(x: i32, y: i32) -> Option<Self> {
        Some(Self {
            x: x.checked_mul(FIXED_ONE)?,
            y: y.checked_mul(FIXED_ONE)?,
        })
    }

    /// Add another vector, or `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(other.x)?,
            y: self.y.checked_add(other.y)?,
        })
    }

    /// Nearest tile coordinate (halves round up).
    #[inline]
    pub fn to_tile(self) -> (i32, i32) {
        (
            self.x.wrapping_add(FIXED_HALF) >> FIXED_SCALE,
            self.y.wrapping_add(FIXED_HALF) >> FIXED_SCALE,
        )
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Squared distance in raw units, computed wide so it never
    /// truncates to zero for sub-cell gaps or overflows for far points.
    #[inline]
    pub fn distance_squared_wide(self, other: Self) -> i128 {
        let dx = other.x as i128 - self.x as i128;
        let dy = other.y as i128 - self.y as i128;
        dx * dx + dy * dy
    }

    /// Move toward `target` by at most `max_delta`, never overshooting.
    ///
    /// Lands exactly on `target` once it is within reach. A non-positive
    /// `max_delta` leaves the vector unchanged unless it is already there.
    pub fn move_towards(self, target: Self, max_delta: Fixed) -> Self {
        let dist_sq = self.distance_squared_wide(target);
        if dist_sq == 0 {
            return target;
        }
        if max_delta <= 0 {
            return self;
        }

        let reach = max_delta as i128;
        if dist_sq <= reach * reach {
            return target;
        }

        // dist >= max_delta here, so each offset is bounded by its delta
        let dist = isqrt_wide(dist_sq);
        let dx = target.x as i128 - self.x as i128;
        let dy = target.y as i128 - self.y as i128;
        let mut step_x = dx * reach / dist;
        let mut step_y = dy * reach / dist;

        // Guarantee progress when the step rounds to nothing
        if step_x == 0 && step_y == 0 {
            if dx.abs() >= dy.abs() {
                step_x = dx.signum();
            } else {
                step_y = dy.signum();
            }
        }

        Self {
            x: (self.x as i128 + step_x) as Fixed,
            y: (self.y as i128 + step_y) as Fixed,
        }
    }

    /// Negate both components.
    #[inline]
    pub fn negate(self) -> Self {
        Self {
            x: self.x.wrapping_neg(),
            y: self.y.wrapping_neg(),
        }
    }

    /// Convert to float tuple for logging.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (to_float(self.x), to_float(self.y))
    }
}

// Operator overloads for ergonomics
impl Add for FixedVec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add(rhs)
    }
}

impl Sub for FixedVec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.sub(rhs)
    }
}

impl Neg for FixedVec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "Vec2({:.3}, {:.3})", fx, fy)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "({:.3}, {:.3})", fx, fy)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_vec2_constants() {
        assert_eq!(FixedVec2::ZERO.x, 0);
        assert_eq!(FixedVec2::RIGHT.x, FIXED_ONE);
        assert_eq!(FixedVec2::UP.y, FIXED_ONE);
        assert_eq!(FixedVec2::LEFT, -FixedVec2::RIGHT);
        assert_eq!(FixedVec2::DOWN, -FixedVec2::UP);
    }

    #[test]
    fn test_vec2_add_sub() {
        let a = FixedVec2::from_ints(3, 4);
        let b = FixedVec2::from_ints(1, 2);
        assert_eq!(a + b, FixedVec2::from_ints(4, 6));
        assert_eq!(a - b, FixedVec2::from_ints(2, 2));
    }

    #[test]
    fn test_checked_ops_catch_overflow() {
        assert_eq!(FixedVec2::checked_from_ints(-3, 2), Some(FixedVec2::from_ints(-3, 2)));
        assert_eq!(FixedVec2::checked_from_ints(40_000, 0), None);
        assert_eq!(FixedVec2::checked_from_ints(0, -32_769), None);

        let edge = FixedVec2::from_ints(32_767, 0);
        assert_eq!(edge.checked_add(FixedVec2::RIGHT), None);
        assert_eq!(edge.checked_add(FixedVec2::LEFT), Some(FixedVec2::from_ints(32_766, 0)));
    }

    #[test]
    fn test_vec2_to_tile() {
        assert_eq!(FixedVec2::from_ints(3, -2).to_tile(), (3, -2));
        assert_eq!(FixedVec2::new(to_fixed(2.4), to_fixed(-0.4)).to_tile(), (2, 0));
        assert_eq!(FixedVec2::new(to_fixed(2.6), to_fixed(-0.6)).to_tile(), (3, -1));
    }

    #[test]
    fn test_distance_squared_wide_small_gap() {
        // A Q16.16 multiply would truncate this to zero
        let a = FixedVec2::new(0, 0);
        let b = FixedVec2::new(100, 0);
        assert_eq!(a.distance_squared_wide(b), 10_000);
    }

    #[test]
    fn test_move_towards_axis() {
        let start = FixedVec2::ZERO;
        let end = FixedVec2::RIGHT;
        let step = start.move_towards(end, to_fixed(0.25));
        assert_eq!(step, FixedVec2::new(to_fixed(0.25), 0));
    }

    #[test]
    fn test_move_towards_snaps_when_in_reach() {
        let start = FixedVec2::new(to_fixed(0.9), 0);
        let end = FixedVec2::RIGHT;
        assert_eq!(start.move_towards(end, to_fixed(0.5)), end);
        assert_eq!(end.move_towards(end, 0), end);
    }

    #[test]
    fn test_move_towards_never_overshoots_diagonal() {
        let end = FixedVec2::from_ints(1, 1);
        let mut pos = FixedVec2::ZERO;
        for _ in 0..100 {
            let next = pos.move_towards(end, to_fixed(0.3));
            assert!(next.distance_squared_wide(end) <= pos.distance_squared_wide(end));
            assert!(next.x <= end.x && next.y <= end.y);
            pos = next;
        }
        assert_eq!(pos, end);
    }

    #[test]
    fn test_move_towards_zero_delta_stays() {
        let start = FixedVec2::ZERO;
        assert_eq!(start.move_towards(FixedVec2::UP, 0), start);
        assert_eq!(start.move_towards(FixedVec2::UP, -5), start);
    }

    #[test]
    fn test_move_towards_minimum_progress() {
        let start = FixedVec2::ZERO;
        let end = FixedVec2::new(3, 3);
        let next = start.move_towards(end, 1);
        assert_ne!(next, start);
    }
}
