//! Error types for body construction and world operations.

use thiserror::Error;

use crate::joint::BodyHandle;

/// Errors returned by fallible soft-body operations.
///
/// Per-body edits with a bad index are ignored rather than reported; these
/// errors cover construction and cross-body operations on a [`World`](crate::world::World).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoftBodyError {
    /// A body needs at least one point.
    #[error("soft body needs at least one point")]
    NoSegments,
    /// A tuning parameter is out of range or not finite.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// Segment index is out of bounds.
    #[error("segment index {index} out of bounds (count: {count})")]
    SegmentOutOfBounds { index: usize, count: usize },
    /// The handle does not refer to a live body.
    #[error("no live body for {0}")]
    UnknownBody(BodyHandle),
}

/// Convenience alias for `Result<T, SoftBodyError>`.
pub type Result<T> = core::result::Result<T, SoftBodyError>;
