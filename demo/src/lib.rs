//! Session model for the terminal harness.
//!
//! A [`Session`] owns the map, the random generator and the latest search
//! result. The binary drives it: one path at startup, a new random goal on
//! each recompute, and a fresh map on request.

use anyhow::Context;
use pathfinder_core::Point;
use pathfinder_map::{GridMap, MapGen, MapGenConfig};
use pathfinder_paths::{AStarSearch, Heuristic, PathResult, SearchConfig};
use rand::Rng;

const CH_OPEN: char = '.';
const CH_WALL: char = '#';
const CH_PATH: char = '*';
const CH_START: char = 'S';
const CH_GOAL: char = 'G';

/// Everything a session needs besides its random generator.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub map: MapGenConfig,
    pub search: SearchConfig,
    pub heuristic: Heuristic,
    pub start: Point,
}

pub struct Session<R: Rng> {
    mapgen: MapGen<R>,
    map: GridMap,
    astar: AStarSearch,
    heuristic: Heuristic,
    start: Point,
    goal: Point,
    result: PathResult,
}

impl<R: Rng> Session<R> {
    /// Generate the first map and compute the first path.
    pub fn new(config: SessionConfig, rng: R) -> anyhow::Result<Self> {
        let mut mapgen = MapGen::new(config.map, rng).context("invalid map settings")?;
        let mut map = mapgen.generate()?;
        prepare_start(&mut map, config.start)?;
        let astar = AStarSearch::new(config.search);
        let goal = mapgen.place_goal(&mut map)?;
        let result = astar.find_path(&map.pather(config.heuristic), config.start, goal)?;
        let session = Self {
            mapgen,
            map,
            astar,
            heuristic: config.heuristic,
            start: config.start,
            goal,
            result,
        };
        log::info!("{}", session.status());
        Ok(session)
    }

    /// Pick a new random goal and search for a path to it.
    pub fn recompute(&mut self) -> anyhow::Result<&PathResult> {
        self.goal = self.mapgen.place_goal(&mut self.map)?;
        let pather = self.map.pather(self.heuristic);
        self.result = self.astar.find_path(&pather, self.start, self.goal)?;
        log::info!("{}", self.status());
        Ok(&self.result)
    }

    /// Draw a new map, then recompute.
    pub fn regenerate(&mut self) -> anyhow::Result<&PathResult> {
        self.mapgen.regenerate(&mut self.map)?;
        prepare_start(&mut self.map, self.start)?;
        self.recompute()
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn result(&self) -> &PathResult {
        &self.result
    }

    /// One-line summary of the latest search.
    pub fn status(&self) -> String {
        let stats = self.result.stats();
        match &self.result {
            PathResult::Found(tree) => format!(
                "{} -> {}: {} steps ({} heuristic, {} expanded)",
                self.start,
                self.goal,
                tree.steps(),
                self.heuristic,
                stats.expanded
            ),
            PathResult::Exhausted(tree) => format!(
                "{} -> {}: no path, explored to {} ({} expanded)",
                self.start,
                self.goal,
                tree.end().pos(),
                stats.expanded
            ),
            PathResult::LimitReached(tree) => format!(
                "{} -> {}: gave up at {} after {} expansions",
                self.start,
                self.goal,
                tree.end().pos(),
                stats.expanded
            ),
        }
    }

    /// Text picture of the map with the path overlaid. A search that missed
    /// the goal shows its route to the last node it closed.
    pub fn render(&self) -> String {
        let w = self.map.width() as usize;
        let mut canvas: Vec<char> = self
            .map
            .iter()
            .map(|(_, walkable)| if walkable { CH_OPEN } else { CH_WALL })
            .collect();

        let mut plot = |p: Point, ch: char| {
            if let Some(i) = self.map.bounds().index_of(p) {
                canvas[i] = ch;
            }
        };
        let tree = self.result.tree();
        for node in tree.ancestors(tree.end_id()) {
            plot(node.pos(), CH_PATH);
        }
        plot(self.start, CH_START);
        plot(self.goal, CH_GOAL);

        let mut out = String::with_capacity(canvas.len() + self.map.height() as usize);
        for row in canvas.chunks(w) {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&self.status());
        out
    }
}

// The search rejects a blocked start, so the start cell is cleared the same
// way the goal is.
fn prepare_start(map: &mut GridMap, start: Point) -> anyhow::Result<()> {
    map.force_walkable(start)
        .with_context(|| format!("start {start} is not on the map"))
}
