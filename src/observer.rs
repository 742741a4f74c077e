//! Step observer trait for watching a body update.

use crate::float::Float;
use crate::vec::Vec2;

/// Hooks called during [`SoftBody::update_observed`](crate::softbody::SoftBody::update_observed).
///
/// Useful for debug overlays or tests that want the per-point spring
/// displacements. All methods default to no-ops.
pub trait StepObserver<F: Float> {
    /// Called once the spring displacements for every point are known.
    fn on_forces(&mut self, _forces: &[Vec2<F>]) {}

    /// Called after all points have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each positional relaxation pass.
    fn on_relax_iteration(&mut self, _iteration: usize) {}

    /// Called when the update is complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Used by plain `update()`.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
