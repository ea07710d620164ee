//! Error types for path searches.

use pathfinder_core::Point;
use thiserror::Error;

/// Precondition failures of [`AStarSearch::find_path`](crate::AStarSearch::find_path).
///
/// An unreachable goal is not an error; it is reported as
/// [`PathResult::Exhausted`](crate::PathResult::Exhausted).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("endpoint {0} is outside the graph")]
    OutOfBounds(Point),

    #[error("start {0} is not walkable")]
    BlockedStart(Point),
}

pub type Result<T> = std::result::Result<T, SearchError>;
