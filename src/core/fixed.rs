//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for grid movement.
//! Positions, durations and rates are all integers - no floats in the tick loop.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! One grid cell is exactly `FIXED_ONE` wide, so tile coordinates are
//! whole numbers and a completed step lands on an exact integer.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

/// Maximum positive value
pub const FIXED_MAX: Fixed = i32::MAX;

// =============================================================================
// MOVEMENT CONSTANTS (All as integer literals - NO float conversion!)
// =============================================================================

/// Frame duration at 60 Hz: 1/60 second = round(65536/60) = 1092
pub const TICK_DURATION: Fixed = 1092;

/// Default time to cross one cell: 0.1 s = floor(0.1 * 65536) = 6553
pub const DEFAULT_MOVE_TIME: Fixed = 6553;

/// Default half extent of a tile body: 0.45 = floor(0.45 * 65536) = 29491
pub const DEFAULT_HALF_EXTENT: Fixed = 29491;

/// A transition is finished once the squared remaining distance
/// (in raw units) is at or below this value.
pub const MOVE_EPSILON_SQ: i128 = 0;

// =============================================================================
// CORE OPERATIONS (All deterministic)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or initialization. NEVER in tick loop.
///
/// # Example
/// ```
/// use gridstep::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/logging.
///
/// # Warning
/// Only use for visual output. NEVER use result in movement logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Multiply two fixed-point numbers, clamping to the representable range
/// instead of wrapping.
#[inline]
pub fn fixed_mul_saturating(a: Fixed, b: Fixed) -> Fixed {
    let wide = ((a as i64) * (b as i64)) >> FIXED_SCALE;
    wide.clamp(i32::MIN as i64, i32::MAX as i64) as Fixed
}

/// Reciprocal `1 / x`, saturating at `FIXED_MAX`.
///
/// Returns 0 for non-positive inputs. Very small durations produce the
/// largest representable rate rather than wrapping to a tiny one.
#[inline]
pub fn fixed_recip(x: Fixed) -> Fixed {
    if x <= 0 {
        return 0;
    }
    let wide = ((FIXED_ONE as i64) << FIXED_SCALE) / x as i64;
    wide.min(FIXED_MAX as i64) as Fixed
}

/// Integer square root (floor) of a non-negative wide value.
///
/// Newton iteration seeded from the bit length; exact for all inputs.
pub fn isqrt_wide(n: i128) -> i128 {
    if n <= 0 {
        return 0;
    }
    let bits = 128 - n.leading_zeros();
    let mut x: i128 = 1 << bits.div_ceil(2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

// =============================================================================
// TESTS
// =============================================================================
