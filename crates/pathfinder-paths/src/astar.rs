use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use pathfinder_core::Point;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::node::{NodeId, NodeState, OpenEntry, SearchNode};
use crate::result::{PathResult, SearchStats, SearchTree};
use crate::traits::AstarPather;

/// Best-first A* search.
///
/// Each call to [`find_path`](Self::find_path) owns its open and closed
/// stores, so one `AStarSearch` can serve several searches at once as long as
/// the pathers they read are not mutated meanwhile.
///
/// The frontier yields the node with the smallest `f`; ties go to the most
/// recently discovered node. Neighbor order from the pather decides discovery
/// order, so identical inputs always give the identical path.
#[derive(Clone, Debug, Default)]
pub struct AStarSearch {
    config: SearchConfig,
}

impl AStarSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for a path from `start` to `goal`.
    ///
    /// Fails when either endpoint lies outside the pather or `start` is not
    /// passable. A goal that is not passable is never discovered, so the
    /// search drains and reports [`PathResult::Exhausted`]. Results that miss
    /// the goal end at the last node closed.
    pub fn find_path<P: AstarPather + ?Sized>(
        &self,
        pather: &P,
        start: Point,
        goal: Point,
    ) -> Result<PathResult> {
        if !pather.contains(start) {
            return Err(SearchError::OutOfBounds(start));
        }
        if !pather.contains(goal) {
            return Err(SearchError::OutOfBounds(goal));
        }
        if !pather.passable(start) {
            return Err(SearchError::BlockedStart(start));
        }

        log::debug!("astar: searching {start} -> {goal}");
        let deadline = self.config.time_budget.map(|budget| Instant::now() + budget);

        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut index: HashMap<Point, NodeId> = HashMap::new();
        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut stats = SearchStats::default();

        let start_id = NodeId(0);
        let start_node = SearchNode::new(start, 0, pather.estimate(start, goal), None);
        open.push(OpenEntry {
            f: start_node.f,
            id: start_id,
        });
        nodes.push(start_node);
        index.insert(start, start_id);
        stats.discovered = 1;

        let mut nbuf: Vec<Point> = Vec::with_capacity(8);
        let mut last_closed = start_id;

        while let Some(entry) = open.pop() {
            let current_id = entry.id;
            let current = &mut nodes[current_id.0];

            // Skip entries superseded by a later relaxation.
            if current.state != NodeState::Open || current.f != entry.f {
                continue;
            }

            if current.pos == goal {
                current.state = NodeState::Closed;
                log::debug!(
                    "astar: reached {goal} at cost {} ({} expanded, {} discovered)",
                    current.g,
                    stats.expanded,
                    stats.discovered
                );
                return Ok(PathResult::Found(SearchTree::new(nodes, current_id, stats)));
            }

            if self.limit_hit(&stats, deadline) {
                log::warn!(
                    "astar: search {start} -> {goal} stopped by limit after {} expansions",
                    stats.expanded
                );
                return Ok(PathResult::LimitReached(SearchTree::new(nodes, last_closed, stats)));
            }

            current.state = NodeState::Closed;
            last_closed = current_id;
            stats.expanded += 1;
            let current_pos = current.pos;
            let current_g = current.g;
            log::trace!("astar: expanding {current_pos} g={current_g} f={}", current.f);

            nbuf.clear();
            pather.neighbors(current_pos, &mut nbuf);

            for &np in nbuf.iter() {
                let tentative_g = current_g + pather.cost(current_pos, np);

                let Some(id) = index.get(&np).copied() else {
                    let id = NodeId(nodes.len());
                    let node = SearchNode::new(np, tentative_g, pather.estimate(np, goal), Some(current_id));
                    open.push(OpenEntry { f: node.f, id });
                    nodes.push(node);
                    index.insert(np, id);
                    stats.discovered += 1;
                    continue;
                };

                let n = &mut nodes[id.0];
                match n.state {
                    NodeState::Open => {
                        if tentative_g + n.h < n.f {
                            n.relax(tentative_g, current_id);
                            open.push(OpenEntry { f: n.f, id });
                            stats.updated += 1;
                        }
                    }
                    NodeState::Closed => {
                        if self.config.reopen_closed && tentative_g < n.g {
                            n.relax(tentative_g, current_id);
                            n.state = NodeState::Open;
                            open.push(OpenEntry { f: n.f, id });
                            stats.reopened += 1;
                        }
                    }
                }
            }
        }

        log::debug!(
            "astar: no path {start} -> {goal} ({} expanded, {} discovered)",
            stats.expanded,
            stats.discovered
        );
        Ok(PathResult::Exhausted(SearchTree::new(nodes, last_closed, stats)))
    }

    fn limit_hit(&self, stats: &SearchStats, deadline: Option<Instant>) -> bool {
        self.config
            .max_expansions
            .is_some_and(|max| stats.expanded >= max)
            || deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Heuristic;
    use crate::neighbors::eight_way;
    use crate::traits::{Pather, WeightedPather};
    use pathfinder_core::Range;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Test grid parsed from rows of `.` (open) and `#` (blocked).
    struct TestGrid {
        bounds: Range,
        open: Vec<bool>,
        heuristic: Heuristic,
    }

    impl TestGrid {
        fn parse(rows: &str, heuristic: Heuristic) -> Self {
            let lines: Vec<&str> = rows.lines().collect();
            let bounds = Range::sized(lines[0].len() as i32, lines.len() as i32);
            let open = lines.iter().flat_map(|l| l.chars().map(|c| c == '.')).collect();
            Self {
                bounds,
                open,
                heuristic,
            }
        }

        fn is_open(&self, p: Point) -> bool {
            self.bounds.index_of(p).is_some_and(|i| self.open[i])
        }

        /// Shortest unit-cost 8-connected distance by breadth-first search.
        fn bfs(&self, from: Point, to: Point) -> Option<usize> {
            let mut dist = vec![usize::MAX; self.bounds.len()];
            let mut queue = VecDeque::new();
            dist[self.bounds.index_of(from)?] = 0;
            queue.push_back(from);
            let mut buf = Vec::new();
            while let Some(p) = queue.pop_front() {
                let d = dist[self.bounds.index_of(p)?];
                if p == to {
                    return Some(d);
                }
                buf.clear();
                self.neighbors(p, &mut buf);
                for &n in &buf {
                    let i = self.bounds.index_of(n)?;
                    if dist[i] == usize::MAX {
                        dist[i] = d + 1;
                        queue.push_back(n);
                    }
                }
            }
            None
        }
    }

    impl Pather for TestGrid {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            eight_way(p, buf, |n| self.is_open(n));
        }

        fn contains(&self, p: Point) -> bool {
            self.bounds.contains(p)
        }

        fn passable(&self, p: Point) -> bool {
            self.is_open(p)
        }
    }

    impl WeightedPather for TestGrid {
        fn cost(&self, _from: Point, _to: Point) -> i32 {
            1
        }
    }

    impl AstarPather for TestGrid {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            self.heuristic.estimate(from, to)
        }
    }

    fn search(grid: &TestGrid, start: Point, goal: Point) -> PathResult {
        AStarSearch::default().find_path(grid, start, goal).unwrap()
    }

    /// Deterministic pseudo-random maze without pulling in an rng.
    fn scattered(width: usize, height: usize, seed: u64) -> String {
        let mut state = seed;
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let blocked = (state >> 33) % 4 == 0 && (x, y) != (0, 0);
                out.push(if blocked { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn single_cell_start_is_goal() {
        let grid = TestGrid::parse(".", Heuristic::Manhattan);
        let result = search(&grid, Point::ZERO, Point::ZERO);
        let tree = result.found().unwrap();
        assert_eq!(tree.path(), vec![Point::ZERO]);
        assert_eq!(tree.steps(), 0);
        assert!(tree.end().parent().is_none());
        assert_eq!(tree.stats().expanded, 0);
    }

    #[test]
    fn walled_in_start_is_exhausted() {
        let grid = TestGrid::parse(".#.", Heuristic::Manhattan);
        let result = search(&grid, Point::new(0, 0), Point::new(2, 0));
        assert!(matches!(result, PathResult::Exhausted(_)));
        assert_eq!(result.stats().expanded, 1);
        assert_eq!(result.partial_path(), Some(vec![Point::new(0, 0)]));
        let tree = result.tree();
        assert_eq!(tree.end().pos(), Point::new(0, 0));
        assert!(tree.end().parent().is_none());
        assert_eq!(tree.steps(), 0);
    }

    #[test]
    fn exhausted_search_keeps_partial_route() {
        let grid = TestGrid::parse(
            "\
...#.
...#.
...#.",
            Heuristic::Manhattan,
        );
        let result = search(&grid, Point::new(0, 1), Point::new(4, 1));
        assert!(matches!(result, PathResult::Exhausted(_)));
        let partial = result.partial_path().unwrap();
        assert_eq!(partial.first(), Some(&Point::new(0, 1)));
        for pair in partial.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }
        let tree = result.tree();
        assert!(tree.end().is_closed());
        assert_eq!(tree.nodes().len(), tree.stats().discovered);
    }

    #[test]
    fn blocked_goal_is_exhausted() {
        let grid = TestGrid::parse(".#", Heuristic::Manhattan);
        let result = search(&grid, Point::new(0, 0), Point::new(1, 0));
        assert!(matches!(result, PathResult::Exhausted(_)));
    }

    #[test]
    fn corridor_takes_four_steps() {
        for h in [Heuristic::Manhattan, Heuristic::Chebyshev] {
            let grid = TestGrid::parse(".....", h);
            let result = search(&grid, Point::new(0, 0), Point::new(4, 0));
            assert!(result.is_found());
            let tree = result.into_tree();
            assert_eq!(tree.steps(), 4);
            assert_eq!(tree.cost(), 4);
            assert_eq!(tree.path().last(), Some(&Point::new(4, 0)));
        }
    }

    #[test]
    fn disconnected_region_drains() {
        let grid = TestGrid::parse(
            "\
..#..
..#..
..#..",
            Heuristic::Manhattan,
        );
        let result = search(&grid, Point::new(0, 1), Point::new(4, 1));
        match result {
            PathResult::Exhausted(tree) => assert_eq!(tree.stats().expanded, 6),
            other => panic!("expected exhausted, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_errors() {
        let grid = TestGrid::parse("..\n#.", Heuristic::Manhattan);
        let astar = AStarSearch::default();
        assert_eq!(
            astar.find_path(&grid, Point::new(-1, 0), Point::ZERO).unwrap_err(),
            SearchError::OutOfBounds(Point::new(-1, 0))
        );
        assert_eq!(
            astar.find_path(&grid, Point::ZERO, Point::new(2, 0)).unwrap_err(),
            SearchError::OutOfBounds(Point::new(2, 0))
        );
        assert_eq!(
            astar.find_path(&grid, Point::new(0, 1), Point::ZERO).unwrap_err(),
            SearchError::BlockedStart(Point::new(0, 1))
        );
    }

    #[test]
    fn ties_go_to_most_recent_node() {
        // From (0, 1) the cells (1, 0), (1, 1) and (1, 2) all score f = 2.
        // (1, 2) is discovered last and wins, and the goal is then reached
        // through it.
        let grid = TestGrid::parse("...\n...\n...", Heuristic::Chebyshev);
        let path = search(&grid, Point::new(0, 1), Point::new(2, 1)).path().unwrap();
        assert_eq!(path, vec![Point::new(0, 1), Point::new(1, 2), Point::new(2, 1)]);
    }

    #[test]
    fn repeated_searches_agree() {
        let grid = TestGrid::parse(&scattered(30, 20, 7), Heuristic::Manhattan);
        let goal = Point::new(29, 19);
        let first = search(&grid, Point::ZERO, goal).path();
        for _ in 0..3 {
            assert_eq!(search(&grid, Point::ZERO, goal).path(), first);
        }
    }

    #[test]
    fn path_is_adjacent_and_walkable() {
        for seed in 1..20 {
            let grid = TestGrid::parse(&scattered(25, 25, seed), Heuristic::Manhattan);
            let Some(path) = search(&grid, Point::ZERO, Point::new(24, 24)).path() else {
                continue;
            };
            assert_eq!(path.first(), Some(&Point::ZERO));
            for pair in path.windows(2) {
                assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
            }
            assert!(path.iter().all(|&p| grid.is_open(p)));
        }
    }

    #[test]
    fn closed_nodes_keep_consistent_scores() {
        for seed in 1..20 {
            let grid = TestGrid::parse(&scattered(25, 25, seed), Heuristic::Manhattan);
            let result = search(&grid, Point::ZERO, Point::new(24, 24));
            let Some(tree) = result.found() else {
                continue;
            };
            for (i, node) in tree.nodes().iter().enumerate() {
                assert_eq!(node.f(), node.g() + node.h());
                if !node.is_closed() {
                    continue;
                }
                let edges = tree.ancestors(NodeId(i)).count() - 1;
                assert_eq!(node.g() as usize, edges);
            }
            assert_eq!(tree.steps(), tree.cost() as usize);
        }
    }

    #[test]
    fn chebyshev_matches_bfs_and_manhattan_never_beats_it() {
        for seed in 1..30 {
            let text = scattered(20, 20, seed);
            let goal = Point::new(19, 19);
            let cheb = TestGrid::parse(&text, Heuristic::Chebyshev);
            let manh = TestGrid::parse(&text, Heuristic::Manhattan);
            let optimal = cheb.bfs(Point::ZERO, goal);
            let cheb_steps = search(&cheb, Point::ZERO, goal).found().map(|t| t.steps());
            let manh_steps = search(&manh, Point::ZERO, goal).found().map(|t| t.steps());
            assert_eq!(cheb_steps, optimal);
            assert_eq!(manh_steps.is_some(), optimal.is_some());
            if let (Some(m), Some(o)) = (manh_steps, optimal) {
                assert!(m >= o);
            }
        }
    }

    #[test]
    fn reopening_respects_invariants() {
        let astar = AStarSearch::new(SearchConfig::default().with_reopen_closed(true));
        for seed in 1..20 {
            let grid = TestGrid::parse(&scattered(25, 25, seed), Heuristic::Manhattan);
            let result = astar.find_path(&grid, Point::ZERO, Point::new(24, 24)).unwrap();
            let Some(tree) = result.found() else {
                continue;
            };
            // A reopened ancestor can shorten the chain below the goal's g.
            let path = tree.path();
            assert!(path.len() - 1 <= tree.cost() as usize);
            assert_eq!(path.first(), Some(&Point::ZERO));
            assert_eq!(path.last(), Some(&Point::new(24, 24)));
            for pair in path.windows(2) {
                assert!(pair[0].is_adjacent(pair[1]));
            }
        }
    }

    #[test]
    fn expansion_limit_stops_search() {
        let grid = TestGrid::parse(&".".repeat(50), Heuristic::Manhattan);
        let astar = AStarSearch::new(SearchConfig::default().with_max_expansions(3));
        let result = astar.find_path(&grid, Point::ZERO, Point::new(49, 0)).unwrap();
        match result {
            PathResult::LimitReached(tree) => {
                assert_eq!(tree.stats().expanded, 3);
                assert_eq!(tree.end().pos(), Point::new(2, 0));
                assert_eq!(tree.steps(), 2);
            }
            other => panic!("expected limit, got {other:?}"),
        }

        // The goal check comes before the bound.
        let zero = AStarSearch::new(SearchConfig::default().with_max_expansions(0));
        assert!(zero.find_path(&grid, Point::ZERO, Point::ZERO).unwrap().is_found());
    }

    #[test]
    fn zero_time_budget_stops_search() {
        let grid = TestGrid::parse(&".".repeat(10), Heuristic::Manhattan);
        let astar = AStarSearch::new(SearchConfig::default().with_time_budget(Duration::ZERO));
        let result = astar.find_path(&grid, Point::ZERO, Point::new(9, 0)).unwrap();
        assert!(matches!(result, PathResult::LimitReached(_)));
    }

    #[test]
    fn detour_around_wall() {
        let grid = TestGrid::parse(
            "\
....
.##.
....",
            Heuristic::Manhattan,
        );
        let result = search(&grid, Point::new(0, 1), Point::new(3, 1));
        let tree = result.found().unwrap();
        assert_eq!(
            tree.path(),
            vec![Point::new(0, 1), Point::new(1, 2), Point::new(2, 2), Point::new(3, 1)]
        );
        assert_eq!(tree.stats().discovered, tree.nodes().len());
    }
}
