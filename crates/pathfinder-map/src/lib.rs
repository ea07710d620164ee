//! Obstacle grids for the pathfinder search: storage, random generation,
//! goal sampling and a plain-text format.

pub mod error;
pub mod grid;
pub mod mapgen;
pub mod pather;

pub use error::{MapError, Result};
pub use grid::GridMap;
pub use mapgen::{DEFAULT_OBSTACLE_PROBABILITY, DEFAULT_SIZE, MapGen, MapGenConfig};
pub use pather::GridPather;
