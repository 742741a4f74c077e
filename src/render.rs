//! Host drawing seam.

use crate::float::Float;
use crate::vec::Vec2;

/// A surface the host can draw straight lines on.
///
/// `color` is whatever palette index or packed colour the host uses.
pub trait LineTarget<F: Float> {
    fn draw_line(&mut self, from: Vec2<F>, to: Vec2<F>, color: u32);
}

/// Draw one line per adjacent pair of `positions`. Returns the number drawn.
pub fn draw_chain<F: Float, T: LineTarget<F> + ?Sized>(
    positions: impl IntoIterator<Item = Vec2<F>>,
    color: u32,
    target: &mut T,
) -> usize {
    let mut drawn = 0;
    let mut iter = positions.into_iter();
    let Some(mut prev) = iter.next() else {
        return 0;
    };
    for next in iter {
        target.draw_line(prev, next, color);
        prev = next;
        drawn += 1;
    }
    drawn
}
