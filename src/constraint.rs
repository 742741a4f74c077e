//! Stateless pairwise distance solvers.
//!
//! Two flavours act on a pair of points and a rest length:
//!
//! - [`spring_force`] returns the corrective displacement used by the
//!   force-based chain integrator.
//! - [`relax_distance`] moves the points directly, half the error each
//!   (Gauss-Seidel style), and is what joints and relaxation passes use.
//!
//! Both skip pairs closer than [`MIN_DISTANCE`]: coincident points have no
//! direction to push along, and dividing by their distance would poison every
//! later step with NaN.

use crate::float::Float;
use crate::point::Point;
use crate::vec::Vec2;

/// Pairs closer than this are treated as degenerate and left alone.
pub const MIN_DISTANCE: f32 = 1e-6;

/// Spring displacement on the pair `(a, b)`.
///
/// Returns the vector to add to `b` (and subtract from `a`), or `None` when the
/// pair is degenerate. A stretched pair yields a vector pointing from `b`
/// towards `a`.
pub fn spring_force<F: Float>(
    a: Vec2<F>,
    b: Vec2<F>,
    rest_length: F,
    stiffness: F,
) -> Option<Vec2<F>> {
    let delta = b - a;
    let distance = delta.length();
    if distance < F::from_f32(MIN_DISTANCE) {
        return None;
    }
    let magnitude = (rest_length - distance) / distance * stiffness;
    Some(delta.scale(magnitude))
}

/// Positional correction of the pair towards `rest_length`.
///
/// Each unpinned point is moved half the error along the connecting line, so
/// with neither pinned the pair lands exactly on the rest length. With one
/// side pinned only half the error is removed per call.
pub fn relax_distance<F: Float>(
    a: &mut Point<F>,
    b: &mut Point<F>,
    rest_length: F,
) {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance < F::from_f32(MIN_DISTANCE) {
        return; // degenerate
    }
    let percent = (rest_length - distance) / distance * F::half();
    let offset = delta.scale(percent);

    if !b.pinned {
        b.pos += offset;
    }
    if !a.pinned {
        a.pos -= offset;
    }
}

/// Relax the pair `(i, j)` of a point slice. `i == j` is a no-op.
pub fn relax_indices<F: Float>(points: &mut [Point<F>], i: usize, j: usize, rest_length: F) {
    if i == j {
        return;
    }
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let (head, tail) = points.split_at_mut(hi);
    let (first, second) = (&mut head[lo], &mut tail[0]);
    if i < j {
        relax_distance(first, second, rest_length);
    } else {
        relax_distance(second, first, rest_length);
    }
}
