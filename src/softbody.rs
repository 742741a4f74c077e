//! 2D spring chain soft body.

use crate::config::{check_damping, check_finite, BodyConfig};
use crate::constraint::{relax_indices, spring_force};
use crate::error::{Result, SoftBodyError};
use crate::float::Float;
use crate::joint::Joint;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::point::Point;
use crate::render::{draw_chain, LineTarget};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, trace, warn};

/// Axis used by [`SoftBody::set_direction`]. `Up` is towards negative y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Offset of length `length` along this direction.
    pub fn offset<F: Float>(self, length: F) -> Vec2<F> {
        match self {
            Direction::Right => Vec2::new(length, F::zero()),
            Direction::Left => Vec2::new(-length, F::zero()),
            Direction::Up => Vec2::new(F::zero(), -length),
            Direction::Down => Vec2::new(F::zero(), length),
        }
    }
}

/// A chain of points joined by springs.
///
/// Point `i` is connected to point `i + 1`; there is always at least one point.
/// Edits that take an index ignore out-of-range indices.
#[derive(Clone, Debug)]
pub struct SoftBody<F: Float> {
    points: AllocVec<Point<F>>,
    config: BodyConfig<F>,
    joints: AllocVec<Joint<F>>,
    line_color: Option<u32>,
}

impl<F: Float> SoftBody<F> {
    /// Create a straight horizontal chain of `segments` points starting at
    /// `origin`, spaced by the configured segment length.
    pub fn new(origin: Vec2<F>, segments: usize, config: BodyConfig<F>) -> Result<Self> {
        let step = Direction::Right.offset(config.segment_length);
        let mut pos = origin;
        Self::from_positions(
            (0..segments).map(|_| {
                let current = pos;
                pos += step;
                current
            }),
            config,
        )
    }

    /// Create a chain through the given positions, all at rest and unpinned.
    ///
    /// The spacing of `positions` does not need to match the segment length;
    /// the springs pull the chain towards it once stepping starts.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Vec2<F>>,
        config: BodyConfig<F>,
    ) -> Result<Self> {
        config.validate()?;
        let points: AllocVec<Point<F>> = positions.into_iter().map(Point::new).collect();
        if points.is_empty() {
            return Err(SoftBodyError::NoSegments);
        }
        if let Some(index) = points.iter().position(|p| !p.pos.is_finite()) {
            let bad = points[index].pos;
            let value = if bad.x.is_finite() { bad.y } else { bad.x };
            return Err(SoftBodyError::InvalidParameter { name: "position", value: value.to_f64() });
        }
        debug!(
            points = points.len(),
            segment_length = config.segment_length.to_f64(),
            "Created soft body"
        );
        Ok(SoftBody {
            points,
            config,
            joints: AllocVec::new(),
            line_color: None,
        })
    }

    /// Advance the body by one fixed step of [`TIMESTEP`](crate::config::TIMESTEP).
    pub fn update(&mut self) {
        self.update_observed(&mut NoOpStepObserver);
    }

    /// [`update`](Self::update) with observer hooks.
    pub fn update_observed<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let n = self.points.len();

        // 1. Spring displacement per point
        let mut forces = alloc::vec![Vec2::zero(); n];
        for i in 1..n {
            let a = self.points[i - 1];
            let b = self.points[i];
            let Some(force) =
                spring_force(a.pos, b.pos, self.config.segment_length, self.config.stiffness)
            else {
                continue; // coincident points
            };
            if !a.pinned {
                forces[i - 1] -= force;
            }
            if !b.pinned {
                forces[i] += force;
            }
        }
        observer.on_forces(&forces);

        // 2. Integrate
        let gravity = if self.config.gravity_enabled {
            Vec2::new(F::zero(), self.config.gravity_step())
        } else {
            Vec2::zero()
        };
        for (p, force) in self.points.iter_mut().zip(forces) {
            p.integrate(force + gravity, self.config.damping);
        }
        observer.on_integrate();

        // 3. Optional positional tightening
        for iter in 0..self.config.relaxation_iterations {
            self.relax_segments();
            observer.on_relax_iteration(iter);
        }

        observer.on_step_complete();
        trace!(points = n, "Soft body step");
    }

    fn relax_segments(&mut self) {
        let rest = self.config.segment_length;
        for i in 1..self.points.len() {
            relax_indices(&mut self.points, i - 1, i, rest);
        }
    }

    fn check_index(&self, index: usize, op: &'static str) -> bool {
        let ok = index < self.points.len();
        if !ok {
            warn!(index, count = self.points.len(), op, "Segment index out of range, ignored");
        }
        ok
    }

    /// Pin or release a point. Its position is not changed.
    pub fn set_pinned(&mut self, index: usize, pinned: bool) {
        if self.check_index(index, "set_pinned") {
            self.points[index].pinned = pinned;
        }
    }

    /// Let a point fall freely (`true`) or hold it in place (`false`).
    pub fn set_segment_gravity(&mut self, index: usize, has_gravity: bool) {
        self.set_pinned(index, !has_gravity);
    }

    /// Pin or release every point at once.
    pub fn set_locked(&mut self, locked: bool) {
        for p in self.points.iter_mut() {
            p.pinned = locked;
        }
    }

    /// Teleport a point. Its inferred velocity becomes zero.
    /// Non-finite positions are ignored.
    pub fn set_segment_position(&mut self, index: usize, pos: Vec2<F>) {
        if self.check_index(index, "set_segment_position") && check_position(pos, "set_segment_position") {
            self.points[index].teleport(pos);
        }
    }

    /// Straighten the chain from point 0 along `direction`, one segment length
    /// apart, and zero the velocity of every repositioned point.
    pub fn set_direction(&mut self, direction: Direction) {
        let step = direction.offset(self.config.segment_length);
        let mut last = self.points[0].pos;
        for p in self.points.iter_mut().skip(1) {
            last += step;
            p.teleport(last);
        }
    }

    /// Move the whole body so that point 0 sits at `target`. Shape and
    /// velocities are preserved. Non-finite targets are ignored.
    pub fn place_at(&mut self, target: Vec2<F>) {
        if !check_position(target, "place_at") {
            return;
        }
        let offset = target - self.points[0].pos;
        for p in self.points.iter_mut() {
            p.translate(offset);
        }
    }

    /// Append a point one segment length to the right of the last point,
    /// at rest and unpinned. Returns its index.
    pub fn append_segment(&mut self) -> usize {
        let last = self.points[self.points.len() - 1].pos;
        let pos = last + Direction::Right.offset(self.config.segment_length);
        self.points.push(Point::new(pos));
        debug!(points = self.points.len(), "Appended segment");
        self.points.len() - 1
    }

    /// Remove the point at `index` and return it.
    ///
    /// Removing an interior point makes its two neighbours adjacent, so the
    /// spring between them starts acting on the next step. Indices above
    /// `index` shift down by one; joint records are not re-indexed. The last
    /// remaining point cannot be removed.
    pub fn remove_segment(&mut self, index: usize) -> Option<Point<F>> {
        if !self.check_index(index, "remove_segment") {
            return None;
        }
        if self.points.len() == 1 {
            warn!("Refusing to remove the only point of a soft body");
            return None;
        }
        let removed = self.points.remove(index);
        debug!(index, points = self.points.len(), "Removed segment");
        Some(removed)
    }

    /// Angle in degrees of the segment from `index` to `index + 1`.
    /// Returns 0 for the last point or an out-of-range index.
    pub fn segment_angle(&self, index: usize) -> F {
        if index >= self.points.len() - 1 {
            return F::zero();
        }
        (self.points[index + 1].pos - self.points[index].pos).angle_degrees()
    }

    /// Number of points in the chain.
    pub fn segment_count(&self) -> usize {
        self.points.len()
    }

    pub fn position(&self, index: usize) -> Option<Vec2<F>> {
        self.points.get(index).map(|p| p.pos)
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.points.iter().map(|p| p.pos).collect()
    }

    pub fn point(&self, index: usize) -> Option<&Point<F>> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point<F>] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Point<F>] {
        &mut self.points
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.points.get(index).is_some_and(|p| p.pinned)
    }

    /// Joints this body takes part in, from this body's side.
    pub fn joints(&self) -> &[Joint<F>] {
        &self.joints
    }

    pub(crate) fn push_joint(&mut self, joint: Joint<F>) {
        self.joints.push(joint);
    }

    pub(crate) fn retain_joints(&mut self, keep: impl FnMut(&Joint<F>) -> bool) {
        self.joints.retain(keep);
    }

    pub fn config(&self) -> &BodyConfig<F> {
        &self.config
    }

    /// Values outside [0, 1] or non-finite are ignored.
    pub fn set_damping(&mut self, damping: F) {
        match check_damping(damping) {
            Ok(()) => self.config.damping = damping,
            Err(err) => warn!(%err, "Ignoring damping"),
        }
    }

    /// Non-finite values are ignored.
    pub fn set_stiffness(&mut self, stiffness: F) {
        match check_finite("stiffness", stiffness) {
            Ok(()) => self.config.stiffness = stiffness,
            Err(err) => warn!(%err, "Ignoring stiffness"),
        }
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.config.gravity_enabled = enabled;
    }

    /// Non-finite values are ignored.
    pub fn set_gravity_strength(&mut self, strength: F) {
        match check_finite("gravity_strength", strength) {
            Ok(()) => self.config.gravity_strength = strength,
            Err(err) => warn!(%err, "Ignoring gravity strength"),
        }
    }

    /// Enable line drawing between adjacent points in `color`.
    pub fn set_line_color(&mut self, color: u32) {
        self.line_color = Some(color);
    }

    pub fn line_color(&self) -> Option<u32> {
        self.line_color
    }

    /// Draw the chain's segments onto `target` if a line colour is set.
    /// Returns the number of lines drawn.
    pub fn render_lines<T: LineTarget<F> + ?Sized>(&self, target: &mut T) -> usize {
        match self.line_color {
            Some(color) => draw_chain(self.points.iter().map(|p| p.pos), color, target),
            None => 0,
        }
    }
}

fn check_position<F: Float>(pos: Vec2<F>, op: &'static str) -> bool {
    let ok = pos.is_finite();
    if !ok {
        warn!(op, "Non-finite position, ignored");
    }
    ok
}
