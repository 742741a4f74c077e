//! Owner-managed collection of soft bodies and the joints between them.

use crate::config::WorldConfig;
use crate::constraint::{relax_distance, relax_indices};
use crate::error::{Result, SoftBodyError};
use crate::float::Float;
use crate::joint::{BodyHandle, Joint};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::softbody::SoftBody;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, trace};

/// The set of live bodies, in spawn order.
///
/// Bodies are addressed by [`BodyHandle`]s which are never reused. Destroying a
/// body also drops every joint record its partners hold for it.
pub struct World<F: Float> {
    // Sorted by handle: handles only grow and removal keeps order.
    bodies: AllocVec<(BodyHandle, SoftBody<F>)>,
    next_id: u32,
    config: WorldConfig,
}

/// One joint, taken once from the pair of mirrored records.
struct JointPair<F: Float> {
    a: BodyHandle,
    a_segment: usize,
    b: BodyHandle,
    b_segment: usize,
    rest_length: F,
}

impl<F: Float> World<F> {
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        World {
            bodies: AllocVec::new(),
            next_id: 0,
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Take ownership of `body` and return its handle.
    pub fn spawn(&mut self, body: SoftBody<F>) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        debug!(%handle, points = body.segment_count(), "Spawned soft body");
        self.bodies.push((handle, body));
        handle
    }

    /// Remove a body and return it. Partner bodies lose their joint records
    /// pointing at it. The returned body keeps its own records.
    pub fn destroy(&mut self, handle: BodyHandle) -> Option<SoftBody<F>> {
        let slot = self.slot(handle)?;
        let (_, body) = self.bodies.remove(slot);
        let mut pruned = 0usize;
        for (_, other) in self.bodies.iter_mut() {
            let before = other.joints().len();
            other.retain_joints(|j| j.other != handle);
            pruned += before - other.joints().len();
        }
        debug!(%handle, pruned, "Destroyed soft body");
        Some(body)
    }

    fn slot(&self, handle: BodyHandle) -> Option<usize> {
        self.bodies.binary_search_by_key(&handle, |(h, _)| *h).ok()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.slot(handle).is_some()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&SoftBody<F>> {
        self.slot(handle).map(|i| &self.bodies[i].1)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut SoftBody<F>> {
        let slot = self.slot(handle)?;
        Some(&mut self.bodies[slot].1)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Handles of live bodies in spawn order.
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies.iter().map(|(h, _)| *h)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &SoftBody<F>)> {
        self.bodies.iter().map(|(h, b)| (*h, b))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut SoftBody<F>)> {
        self.bodies.iter_mut().map(|(h, b)| (*h, b))
    }

    fn segment_position(&self, handle: BodyHandle, index: usize) -> Result<Vec2<F>> {
        let body = self.get(handle).ok_or(SoftBodyError::UnknownBody(handle))?;
        body.position(index).ok_or(SoftBodyError::SegmentOutOfBounds {
            index,
            count: body.segment_count(),
        })
    }

    /// Join point `a_segment` of `a` to point `b_segment` of `b`.
    ///
    /// The rest length is the current distance between the two points and is
    /// returned. Both bodies get a record; `a` and `b` may be the same body.
    pub fn connect(
        &mut self,
        a: BodyHandle,
        a_segment: usize,
        b: BodyHandle,
        b_segment: usize,
    ) -> Result<F> {
        let rest_length = self.segment_position(a, a_segment)?
            .distance(self.segment_position(b, b_segment)?);
        let joint = Joint { other: b, this_segment: a_segment, other_segment: b_segment, rest_length };

        if let Some(body) = self.get_mut(a) {
            body.push_joint(joint);
        }
        if let Some(body) = self.get_mut(b) {
            body.push_joint(joint.mirrored(a));
        }
        debug!(
            %a, a_segment, %b, b_segment,
            rest_length = rest_length.to_f64(),
            "Connected soft bodies"
        );
        Ok(rest_length)
    }

    /// Update every body once, in spawn order, then resolve joints if the
    /// config asks for it.
    pub fn step(&mut self) {
        self.step_observed(&mut NoOpStepObserver);
    }

    /// [`step`](Self::step) with observer hooks, called for each body in turn.
    pub fn step_observed<O: StepObserver<F>>(&mut self, observer: &mut O) {
        for (_, body) in self.bodies.iter_mut() {
            body.update_observed(observer);
        }
        if self.config.resolve_joints {
            self.resolve_joints(self.config.joint_iterations);
        }
        trace!(bodies = self.bodies.len(), "World step");
    }

    /// Pull every jointed pair of points towards its rest length, `iterations`
    /// times. Each joint is applied once per pass even though both bodies
    /// store it. Records whose indices no longer exist are skipped.
    pub fn resolve_joints(&mut self, iterations: usize) {
        let pairs = self.joint_pairs();
        if pairs.is_empty() {
            return;
        }
        for _ in 0..iterations {
            for pair in &pairs {
                self.relax_pair(pair);
            }
        }
    }

    fn joint_pairs(&self) -> AllocVec<JointPair<F>> {
        let mut pairs = AllocVec::new();
        for (handle, body) in self.bodies.iter() {
            for joint in body.joints() {
                if (*handle, joint.this_segment) < (joint.other, joint.other_segment) {
                    pairs.push(JointPair {
                        a: *handle,
                        a_segment: joint.this_segment,
                        b: joint.other,
                        b_segment: joint.other_segment,
                        rest_length: joint.rest_length,
                    });
                }
            }
        }
        pairs
    }

    fn relax_pair(&mut self, pair: &JointPair<F>) {
        let (Some(sa), Some(sb)) = (self.slot(pair.a), self.slot(pair.b)) else {
            return;
        };
        if sa == sb {
            let points = self.bodies[sa].1.points_mut();
            if pair.a_segment < points.len() && pair.b_segment < points.len() {
                relax_indices(points, pair.a_segment, pair.b_segment, pair.rest_length);
            }
            return;
        }

        let (body_a, body_b) = pair_mut(&mut self.bodies, sa, sb);
        let (Some(pa), Some(pb)) = (
            body_a.1.points_mut().get_mut(pair.a_segment),
            body_b.1.points_mut().get_mut(pair.b_segment),
        ) else {
            return;
        };
        relax_distance(pa, pb, pair.rest_length);
    }
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two distinct mutable elements of a slice, in the order asked for.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
