//! Joints between points of two (possibly identical) bodies.

use core::fmt;

use crate::float::Float;

/// Stable identifier of a body inside a [`World`](crate::world::World).
///
/// Handles are never reused, so a handle to a destroyed body stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Returns the raw id.
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// One side of a joint, as stored by the body that owns `this_segment`.
///
/// Connecting two points stores a record in each body, mirrored: the partner's
/// record has `this_segment` and `other_segment` swapped and points back here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint<F: Float> {
    /// The partner body.
    pub other: BodyHandle,
    /// Point index in the owning body.
    pub this_segment: usize,
    /// Point index in the partner body.
    pub other_segment: usize,
    /// Distance between the two points when the joint was made.
    pub rest_length: F,
}

impl<F: Float> Joint<F> {
    /// The record the partner body stores for the same joint.
    pub fn mirrored(&self, owner: BodyHandle) -> Joint<F> {
        Joint {
            other: owner,
            this_segment: self.other_segment,
            other_segment: self.this_segment,
            rest_length: self.rest_length,
        }
    }
}
