//! Random map generation and goal sampling.
//!
//! [`MapGen`] owns the random generator shared by map generation and goal
//! selection, so a single seed reproduces a whole session.

use pathfinder_core::Point;
use rand::Rng;

use crate::error::{MapError, Result};
use crate::grid::GridMap;

/// Default map width and height.
pub const DEFAULT_SIZE: i32 = 100;

/// Default chance of a cell being blocked (one in five).
pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.2;

/// Parameters for [`MapGen`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapGenConfig {
    pub width: i32,
    pub height: i32,
    /// Chance, in `[0, 1]`, that a cell is blocked.
    pub obstacle_probability: f64,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            obstacle_probability: DEFAULT_OBSTACLE_PROBABILITY,
        }
    }
}

impl MapGenConfig {
    /// Check the configuration without drawing anything.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.obstacle_probability) {
            return Err(MapError::InvalidProbability(self.obstacle_probability));
        }
        Ok(())
    }
}

/// Map generator and goal sampler driven by one random generator.
pub struct MapGen<R: Rng> {
    rng: R,
    config: MapGenConfig,
}

impl<R: Rng> MapGen<R> {
    /// Create a generator, rejecting an invalid configuration up front.
    pub fn new(config: MapGenConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { rng, config })
    }

    pub fn config(&self) -> &MapGenConfig {
        &self.config
    }

    /// Draw a fresh map.
    pub fn generate(&mut self) -> Result<GridMap> {
        GridMap::generate(
            self.config.width,
            self.config.height,
            self.config.obstacle_probability,
            &mut self.rng,
        )
    }

    /// Redraw `map` in place with this generator's obstacle probability.
    pub fn regenerate(&mut self, map: &mut GridMap) -> Result<()> {
        map.regenerate(self.config.obstacle_probability, &mut self.rng)
    }

    /// Sample a goal coordinate in `[0, width - 1) × [0, height - 1)`.
    ///
    /// The last row and column are never drawn; a map one cell wide or tall
    /// always yields 0 on that axis.
    pub fn random_goal(&mut self, map: &GridMap) -> Point {
        let x = self.rng.random_range(0..(map.width() - 1).max(1));
        let y = self.rng.random_range(0..(map.height() - 1).max(1));
        Point::new(x, y)
    }

    /// Sample a goal and clear any obstacle on it.
    pub fn place_goal(&mut self, map: &mut GridMap) -> Result<Point> {
        let goal = self.random_goal(map);
        if !map.walkable(goal) {
            log::debug!("mapgen: clearing obstacle under goal {goal}");
        }
        map.force_walkable(goal)?;
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_paths::{AStarSearch, PathResult};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(config: MapGenConfig, seed: u64) -> MapGen<StdRng> {
        MapGen::new(config, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn default_config() {
        let cfg = MapGenConfig::default();
        assert_eq!((cfg.width, cfg.height), (100, 100));
        assert_eq!(cfg.obstacle_probability, 0.2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = MapGenConfig {
            width: 0,
            ..MapGenConfig::default()
        };
        assert!(MapGen::new(cfg, StdRng::seed_from_u64(0)).is_err());
        let cfg = MapGenConfig {
            obstacle_probability: 2.0,
            ..MapGenConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(MapError::InvalidProbability(_))
        ));
    }

    #[test]
    fn same_seed_same_session() {
        let mut a = seeded(MapGenConfig::default(), 5);
        let mut b = seeded(MapGenConfig::default(), 5);
        let mut ma = a.generate().unwrap();
        let mut mb = b.generate().unwrap();
        assert_eq!(ma, mb);
        for _ in 0..5 {
            assert_eq!(a.place_goal(&mut ma).unwrap(), b.place_goal(&mut mb).unwrap());
        }
    }

    #[test]
    fn goals_skip_last_row_and_column() {
        let mut mg = seeded(MapGenConfig::default(), 11);
        let map = GridMap::new(4, 3).unwrap();
        for _ in 0..200 {
            let g = mg.random_goal(&map);
            assert!((0..3).contains(&g.x), "{g}");
            assert!((0..2).contains(&g.y), "{g}");
        }
    }

    #[test]
    fn single_cell_map_goal() {
        let mut mg = seeded(MapGenConfig::default(), 0);
        let map = GridMap::new(1, 1).unwrap();
        assert_eq!(mg.random_goal(&map), Point::ZERO);
    }

    #[test]
    fn regenerate_keeps_size() {
        let cfg = MapGenConfig {
            width: 12,
            height: 7,
            obstacle_probability: 0.5,
        };
        let mut mg = seeded(cfg, 2);
        let mut map = mg.generate().unwrap();
        let before = map.clone();
        mg.regenerate(&mut map).unwrap();
        assert_eq!(map.bounds(), before.bounds());
        assert_ne!(map, before);
    }

    #[test]
    fn placed_goal_is_walkable_and_searchable() {
        let cfg = MapGenConfig {
            width: 40,
            height: 40,
            obstacle_probability: 0.2,
        };
        let mut mg = seeded(cfg, 21);
        let mut map = mg.generate().unwrap();
        map.force_walkable(Point::ZERO).unwrap();
        let astar = AStarSearch::default();
        for _ in 0..10 {
            let goal = mg.place_goal(&mut map).unwrap();
            assert_eq!(map.is_walkable(goal), Ok(true));
            match astar.find_path(&map, Point::ZERO, goal).unwrap() {
                PathResult::Found(tree) => assert_eq!(tree.end().pos(), goal),
                PathResult::Exhausted(_) => {}
                PathResult::LimitReached(_) => panic!("unbounded search hit a limit"),
            }
        }
    }
}
