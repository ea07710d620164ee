//! Search adapters: [`GridMap`] as an 8-connected unit-cost graph.

use pathfinder_core::Point;
use pathfinder_paths::{AstarPather, Heuristic, Pather, WeightedPather, eight_way};

use crate::grid::GridMap;

impl GridMap {
    /// Borrow the map as a pather with the given heuristic.
    ///
    /// Searching the map directly uses [`Heuristic::Manhattan`].
    pub fn pather(&self, heuristic: Heuristic) -> GridPather<'_> {
        GridPather {
            map: self,
            heuristic,
        }
    }
}

impl Pather for GridMap {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        eight_way(p, buf, |n| self.walkable(n));
    }

    fn contains(&self, p: Point) -> bool {
        GridMap::contains(self, p)
    }

    fn passable(&self, p: Point) -> bool {
        self.walkable(p)
    }
}

impl WeightedPather for GridMap {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for GridMap {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        Heuristic::Manhattan.estimate(from, to)
    }
}

/// A [`GridMap`] paired with a chosen [`Heuristic`].
#[derive(Clone, Copy, Debug)]
pub struct GridPather<'a> {
    map: &'a GridMap,
    heuristic: Heuristic,
}

impl GridPather<'_> {
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.map.neighbors(p, buf);
    }

    fn contains(&self, p: Point) -> bool {
        self.map.contains(p)
    }

    fn passable(&self, p: Point) -> bool {
        self.map.walkable(p)
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, from: Point, to: Point) -> i32 {
        self.map.cost(from, to)
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        self.heuristic.estimate(from, to)
    }
}
