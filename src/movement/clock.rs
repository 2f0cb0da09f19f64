//! Frame Clocks
//!
//! Sources of per-frame elapsed time for driving transitions.

use crate::core::fixed::{Fixed, TICK_DURATION};
use crate::movement::host::Transforms;
use crate::movement::mover::{MoveError, Mover};

/// Per-frame elapsed time, in fixed-point seconds.
pub trait FrameClock {
    /// Elapsed time for the next frame.
    fn next_delta(&mut self) -> Fixed;
}

/// Same delta every frame.
#[derive(Clone, Debug)]
pub struct FixedStepClock {
    delta: Fixed,
    frames: u64,
}

impl FixedStepClock {
    /// Clock ticking by `delta` seconds.
    pub const fn new(delta: Fixed) -> Self {
        Self { delta, frames: 0 }
    }

    /// Frames handed out so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FixedStepClock {
    /// 60 Hz.
    fn default() -> Self {
        Self::new(TICK_DURATION)
    }
}

impl FrameClock for FixedStepClock {
    fn next_delta(&mut self) -> Fixed {
        self.frames += 1;
        self.delta
    }
}

/// Replays recorded frame deltas, cycling when exhausted.
///
/// An empty script yields zero forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedClock {
    deltas: Vec<Fixed>,
    cursor: usize,
}

impl ScriptedClock {
    /// Clock replaying `deltas`.
    pub fn new(deltas: Vec<Fixed>) -> Self {
        Self { deltas, cursor: 0 }
    }
}

impl FrameClock for ScriptedClock {
    fn next_delta(&mut self) -> Fixed {
        if self.deltas.is_empty() {
            return 0;
        }
        let delta = self.deltas[self.cursor % self.deltas.len()];
        self.cursor = self.cursor.wrapping_add(1);
        delta
    }
}

/// Advance `mover` frame by frame until it is idle or `max_frames` have run.
///
/// Returns the number of frames consumed. A mover that is still moving
/// afterwards hit the frame cap.
pub fn run_until_idle<W, K>(
    mover: &mut Mover,
    world: &mut W,
    clock: &mut K,
    max_frames: u32,
) -> Result<u32, MoveError>
where
    W: Transforms + ?Sized,
    K: FrameClock + ?Sized,
{
    let mut frames = 0;
    while mover.is_moving() && frames < max_frames {
        mover.advance(world, clock.next_delta())?;
        frames += 1;
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;
    use crate::core::vec2::FixedVec2;
    use crate::grid::GridWorld;
    use crate::movement::config::MoverConfig;
    use crate::movement::layer::Layer;

    const FIXED_SECOND: Fixed = to_fixed(1.0);

    fn mover_at_origin(move_time: Fixed) -> (GridWorld, Mover) {
        let mut world = GridWorld::new();
        let id = world.spawn((0, 0), Layer::BLOCKING);
        (world, Mover::new(id, MoverConfig::with_move_time(move_time)).unwrap())
    }

    #[test]
    fn test_fixed_step_counts_frames() {
        let mut clock = FixedStepClock::default();
        assert_eq!(clock.next_delta(), TICK_DURATION);
        assert_eq!(clock.next_delta(), TICK_DURATION);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_scripted_clock_cycles() {
        let mut clock = ScriptedClock::new(vec![1, 2, 3]);
        let seen: Vec<Fixed> = (0..5).map(|_| clock.next_delta()).collect();
        assert_eq!(seen, vec![1, 2, 3, 1, 2]);

        let mut empty = ScriptedClock::default();
        assert_eq!(empty.next_delta(), 0);
    }

    #[test]
    fn test_run_until_idle_fixed_step() {
        // 0.5 s at 1/4 s per frame
        let (mut world, mut mover) = mover_at_origin(to_fixed(0.5));
        mover.try_move(&mut world, 1, 0).unwrap();

        let mut clock = FixedStepClock::new(to_fixed(0.25));
        let frames = run_until_idle(&mut mover, &mut world, &mut clock, 100).unwrap();
        assert_eq!(frames, 2);
        assert_eq!(world.position(mover.entity()), Some(FixedVec2::RIGHT));
    }

    #[test]
    fn test_run_until_idle_jittery_frames() {
        let (mut world, mut mover) = mover_at_origin(FIXED_SECOND);
        mover.try_move(&mut world, 0, -1).unwrap();

        // Frames alternate 0.1 s and 0.3 s: five frames cover 0.9 s
        let mut clock = ScriptedClock::new(vec![to_fixed(0.1), to_fixed(0.3)]);
        let frames = run_until_idle(&mut mover, &mut world, &mut clock, 100).unwrap();
        assert_eq!(frames, 6);
        assert_eq!(world.position(mover.entity()), Some(FixedVec2::DOWN));
    }

    #[test]
    fn test_run_until_idle_respects_cap() {
        let (mut world, mut mover) = mover_at_origin(FIXED_SECOND);
        mover.try_move(&mut world, 1, 0).unwrap();

        let mut stalled = ScriptedClock::default();
        let frames = run_until_idle(&mut mover, &mut world, &mut stalled, 10).unwrap();
        assert_eq!(frames, 10);
        assert!(mover.is_moving());
    }
}
