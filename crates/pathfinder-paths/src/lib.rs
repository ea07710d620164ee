//! A* pathfinding over grid-like graphs.
//!
//! The search is driven through [`AStarSearch::find_path`], which explores a
//! graph described by an [`AstarPather`] and returns a [`PathResult`]:
//!
//! - [`PathResult::Found`] carries the [`SearchTree`] of every node the search
//!   created. Following parent links from its goal node reconstructs the path.
//! - [`PathResult::Exhausted`] means the frontier drained without reaching
//!   the goal.
//! - [`PathResult::LimitReached`] means a bound from [`SearchConfig`] stopped
//!   the search first.
//!
//! The last two still carry their tree, ending at the last node closed, so a
//! failed search can show how far it got.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration, bounds and passability |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | the heuristic estimate |

mod astar;
mod config;
mod distance;
mod error;
mod neighbors;
mod node;
mod result;
mod traits;

pub use astar::AStarSearch;
pub use config::SearchConfig;
pub use distance::{Heuristic, chebyshev, manhattan};
pub use error::{Result, SearchError};
pub use neighbors::{EIGHT_WAY, eight_way};
pub use node::{NodeId, NodeState, SearchNode};
pub use result::{Ancestors, PathResult, SearchStats, SearchTree};
pub use traits::{AstarPather, Pather, WeightedPather};
