//! Error types for map construction and queries.

use pathfinder_core::{Point, Range};
use thiserror::Error;

/// Errors raised by [`GridMap`](crate::GridMap) and [`MapGen`](crate::MapGen).
///
/// Every failing operation leaves the map untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("{point} is outside the map {bounds}")]
    OutOfBounds { point: Point, bounds: Range },

    #[error("obstacle probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("map row {row} has width {found}, expected {expected}")]
    InconsistentRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("map contains invalid cell \u{201c}{ch}\u{201d} at {pos}")]
    InvalidCell { ch: char, pos: Point },
}

pub type Result<T> = std::result::Result<T, MapError>;
