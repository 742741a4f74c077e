//! Chain points with Verlet position history.

use crate::float::Float;
use crate::vec::Vec2;

/// A single mass point of a chain. Velocity is implicit: `pos - prev_pos`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub pinned: bool,
}

impl<F: Float> Point<F> {
    /// A free point at rest.
    pub fn new(pos: Vec2<F>) -> Self {
        Point { pos, prev_pos: pos, pinned: false }
    }

    /// A pinned point at rest.
    pub fn pinned(pos: Vec2<F>) -> Self {
        Point { pos, prev_pos: pos, pinned: true }
    }

    /// Per-step displacement, i.e. velocity in units per step.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    /// Verlet step: damped inferred velocity plus an accumulated displacement.
    /// Pinned points are left untouched.
    pub fn integrate(&mut self, displacement: Vec2<F>, damping: F) {
        if self.pinned {
            return;
        }
        let velocity = self.velocity_raw().scale(damping);
        let previous = self.pos;
        self.pos = self.pos + velocity + displacement;
        self.prev_pos = previous;
    }

    /// Move to `pos` and forget any motion.
    pub fn teleport(&mut self, pos: Vec2<F>) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Shift both position and history, keeping the inferred velocity.
    pub fn translate(&mut self, offset: Vec2<F>) {
        self.pos += offset;
        self.prev_pos += offset;
    }
}
