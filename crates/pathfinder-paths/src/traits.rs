use pathfinder_core::Point;

/// Minimal pathfinding interface: neighbor enumeration plus endpoint checks.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    ///
    /// Only passable, in-bounds neighbors should be yielded. The order is
    /// significant: it fixes discovery order, which breaks ties between
    /// equally ranked frontier nodes.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` lies inside the graph. Unbounded graphs keep the default.
    fn contains(&self, _p: Point) -> bool {
        true
    }

    /// Whether `p` may be stood on.
    fn passable(&self, _p: Point) -> bool {
        true
    }
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with a heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    ///
    /// Paths are only guaranteed shortest when this never overestimates the
    /// true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}
