//! Movable Entities
//!
//! Game objects own a [`Mover`] and say what happens when a step runs
//! into something carrying capability `C` by implementing [`BlockedBy<C>`].

use crate::movement::host::{Capability, CollisionQuery, Transforms};
use crate::movement::mover::{MoveError, MoveOutcome, Mover};

/// Reaction to a step blocked by an entity exposing capability `C`.
pub trait BlockedBy<C> {
    /// Called once per blocked step, with the obstructing entity's `C`.
    fn on_cant_move(&mut self, component: &mut C);
}

/// A game object that moves on the grid.
pub trait Movable {
    /// The object's mover.
    fn mover(&self) -> &Mover;

    /// The object's mover, mutably.
    fn mover_mut(&mut self) -> &mut Mover;

    /// Step by `(dx, dy)` cells; if blocked by an entity exposing `C`, hand
    /// it to [`BlockedBy::on_cant_move`].
    ///
    /// Obstructions without `C` are reported in the outcome and otherwise
    /// ignored.
    fn attempt_move<C, W>(&mut self, world: &mut W, dx: i32, dy: i32) -> Result<MoveOutcome, MoveError>
    where
        Self: BlockedBy<C>,
        W: CollisionQuery + Transforms + Capability<C> + ?Sized,
    {
        let outcome = self.mover_mut().try_move(world, dx, dy)?;
        if let MoveOutcome::Blocked(hit) = outcome {
            if let Some(component) = world.capability_mut(hit.entity) {
                self.on_cant_move(component);
            }
        }
        Ok(outcome)
    }
}
