//! **pathfinder-core**: geometry primitives for grid pathfinding.
//!
//! [`Point`] addresses a single cell and [`Range`] a half-open rectangle of
//! cells. Both are plain `Copy` values shared by the map and search crates.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
