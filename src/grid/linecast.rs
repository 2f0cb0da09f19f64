//! Segment Queries
//!
//! Deterministic linecast against the grid world's box colliders.

use crate::core::fixed::{Fixed, FIXED_SCALE};
use crate::core::vec2::FixedVec2;
use crate::grid::world::GridWorld;
use crate::movement::host::{CollisionQuery, EntityId, Hit};
use crate::movement::layer::LayerMask;

/// Fraction along `start → end` where the segment enters the box centred
/// on `center`, or `None` if it misses.
///
/// Slab test in Q16.16. A segment that starts inside the box enters at 0;
/// grazing an edge counts as a hit.
pub fn segment_enters_box(
    start: FixedVec2,
    end: FixedVec2,
    center: FixedVec2,
    half_extent: Fixed,
) -> Option<Fixed> {
    let (num, den) = entry_ratio(start, end, center, half_extent)?;
    Some(((num << FIXED_SCALE) / den) as Fixed)
}

/// Entry parameter as an exact ratio `num / den` with `0 <= num <= den`.
///
/// Kept unrounded so the hit point and the nearest-hit comparison do not
/// pick up the truncation of the Q16.16 fraction.
fn entry_ratio(
    start: FixedVec2,
    end: FixedVec2,
    center: FixedVec2,
    half_extent: Fixed,
) -> Option<(i64, i64)> {
    // Clipped to the segment itself: [0, 1]
    let mut enter: (i64, i64) = (0, 1);
    let mut exit: (i64, i64) = (1, 1);

    let axes = [
        (start.x as i64, end.x as i64 - start.x as i64, center.x as i64),
        (start.y as i64, end.y as i64 - start.y as i64, center.y as i64),
    ];

    for (origin, delta, mid) in axes {
        let lo = mid - half_extent as i64;
        let hi = mid + half_extent as i64;

        if delta == 0 {
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let (a, b, den) = if delta > 0 {
            (lo - origin, hi - origin, delta)
        } else {
            (origin - lo, origin - hi, -delta)
        };
        let near = (a.min(b), den);
        let far = (a.max(b), den);
        if ratio_lt(enter, near) {
            enter = near;
        }
        if ratio_lt(far, exit) {
            exit = far;
        }
    }

    if ratio_lt(exit, enter) {
        return None;
    }
    Some(enter)
}

/// `a.0 / a.1 < b.0 / b.1` for positive denominators.
#[inline]
fn ratio_lt(a: (i64, i64), b: (i64, i64)) -> bool {
    (a.0 as i128) * (b.1 as i128) < (b.0 as i128) * (a.1 as i128)
}

impl CollisionQuery for GridWorld {
    fn linecast(
        &self,
        start: FixedVec2,
        end: FixedVec2,
        mask: LayerMask,
        ignore: Option<EntityId>,
    ) -> Option<Hit> {
        let mut best: Option<((i64, i64), EntityId)> = None;

        // BTreeMap iterates in id order, so strict `<` keeps the lowest id on ties
        for (id, body) in &self.bodies {
            if Some(*id) == ignore || !body.enabled || !mask.contains(body.layer) {
                continue;
            }
            if let Some(ratio) = entry_ratio(start, end, body.position, body.half_extent) {
                if best.is_none_or(|(nearest, _)| ratio_lt(ratio, nearest)) {
                    best = Some((ratio, *id));
                }
            }
        }

        best.map(|((num, den), entity)| {
            let along = |from: Fixed, to: Fixed| {
                let delta = to as i128 - from as i128;
                (from as i128 + delta * num as i128 / den as i128) as Fixed
            };
            Hit {
                entity,
                point: FixedVec2::new(along(start.x, end.x), along(start.y, end.y)),
                fraction: ((num << FIXED_SCALE) / den) as Fixed,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, FIXED_ONE, DEFAULT_HALF_EXTENT};
    use crate::movement::layer::Layer;

    const BLOCKING: LayerMask = LayerMask::of(Layer::BLOCKING);

    #[test]
    fn test_segment_hits_box_ahead() {
        let fraction = segment_enters_box(
            FixedVec2::ZERO,
            FixedVec2::RIGHT,
            FixedVec2::RIGHT,
            DEFAULT_HALF_EXTENT,
        );
        // Enters at x = 1 - 0.45
        assert_eq!(fraction, Some(FIXED_ONE - DEFAULT_HALF_EXTENT));
    }

    #[test]
    fn test_segment_misses_side_box() {
        assert_eq!(
            segment_enters_box(FixedVec2::ZERO, FixedVec2::RIGHT, FixedVec2::UP, DEFAULT_HALF_EXTENT),
            None
        );
    }

    #[test]
    fn test_segment_stops_short() {
        // Box two cells away is beyond the segment end
        assert_eq!(
            segment_enters_box(
                FixedVec2::ZERO,
                FixedVec2::RIGHT,
                FixedVec2::from_ints(2, 0),
                DEFAULT_HALF_EXTENT,
            ),
            None
        );
    }

    #[test]
    fn test_segment_starting_inside() {
        let start = FixedVec2::new(to_fixed(0.2), 0);
        assert_eq!(
            segment_enters_box(start, FixedVec2::RIGHT, FixedVec2::ZERO, DEFAULT_HALF_EXTENT),
            Some(0)
        );
    }

    #[test]
    fn test_diagonal_slips_between_corners() {
        // With 0.45 half extents the diagonal clears both orthogonal neighbours
        let end = FixedVec2::from_ints(1, 1);
        for neighbour in [FixedVec2::RIGHT, FixedVec2::UP] {
            assert_eq!(segment_enters_box(FixedVec2::ZERO, end, neighbour, DEFAULT_HALF_EXTENT), None);
        }
        assert!(segment_enters_box(FixedVec2::ZERO, end, end, DEFAULT_HALF_EXTENT).is_some());
    }

    #[test]
    fn test_zero_length_segment() {
        let p = FixedVec2::from_ints(3, 3);
        assert_eq!(segment_enters_box(p, p, p, DEFAULT_HALF_EXTENT), Some(0));
        assert_eq!(segment_enters_box(p, p, FixedVec2::ZERO, DEFAULT_HALF_EXTENT), None);
    }

    #[test]
    fn test_linecast_nearest_wins() {
        let mut world = GridWorld::new();
        let far = world.spawn((2, 0), Layer::BLOCKING);
        let near = world.spawn((1, 0), Layer::BLOCKING);

        let hit = world
            .linecast(FixedVec2::ZERO, FixedVec2::from_ints(2, 0), BLOCKING, None)
            .unwrap();
        assert_eq!(hit.entity, near);
        assert_ne!(hit.entity, far);
        assert_eq!(hit.point, FixedVec2::new(FIXED_ONE - DEFAULT_HALF_EXTENT, 0));
    }

    #[test]
    fn test_linecast_point_exact_moving_left() {
        let mut world = GridWorld::new();
        let wall = world.spawn((-2, 0), Layer::BLOCKING);

        let hit = world
            .linecast(FixedVec2::ZERO, FixedVec2::from_ints(-3, 0), BLOCKING, None)
            .unwrap();
        assert_eq!(hit.entity, wall);
        // Right face of the box at x = -2 + 0.45
        assert_eq!(hit.point, FixedVec2::new(-2 * FIXED_ONE + DEFAULT_HALF_EXTENT, 0));
        assert_eq!(hit.fraction, 33_860); // floor(101581 / 196608 * 65536)
    }

    #[test]
    fn test_linecast_tie_breaks_on_lowest_id() {
        let mut world = GridWorld::new();
        let first = world.spawn((1, 0), Layer::BLOCKING);
        world.spawn((1, 0), Layer::BLOCKING);

        let hit = world.linecast(FixedVec2::ZERO, FixedVec2::RIGHT, BLOCKING, None).unwrap();
        assert_eq!(hit.entity, first);
    }

    #[test]
    fn test_linecast_filters() {
        let mut world = GridWorld::new();
        let caster = world.spawn((0, 0), Layer::BLOCKING);
        let item = world.spawn((1, 0), Layer::ITEMS);
        let ghost = world.spawn((1, 0), Layer::BLOCKING);
        world.set_enabled(ghost, false);

        // Own body, other layers and disabled bodies are all skipped
        assert_eq!(
            world.linecast(FixedVec2::ZERO, FixedVec2::RIGHT, BLOCKING, Some(caster)),
            None
        );

        let items = LayerMask::of(Layer::ITEMS);
        let hit = world.linecast(FixedVec2::ZERO, FixedVec2::RIGHT, items, Some(caster)).unwrap();
        assert_eq!(hit.entity, item);

        // Without the ignore, the caster's own box is hit at the start
        let hit = world.linecast(FixedVec2::ZERO, FixedVec2::RIGHT, BLOCKING, None).unwrap();
        assert_eq!((hit.entity, hit.fraction), (caster, 0));
    }

    #[test]
    fn test_linecast_empty_world() {
        let world = GridWorld::new();
        assert!(world.linecast(FixedVec2::ZERO, FixedVec2::RIGHT, LayerMask::ALL, None).is_none());
    }
}
