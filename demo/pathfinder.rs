//! Terminal pathfinding demo.
//!
//! Run: cargo run --bin pathfinder -- --seed 7
//!
//! Press Enter for a new goal, `r` + Enter for a new map, `q` + Enter to quit.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Parser;
use pathfinder_core::Point;
use pathfinder_demo::{Session, SessionConfig};
use pathfinder_map::{DEFAULT_OBSTACLE_PROBABILITY, DEFAULT_SIZE, MapGenConfig};
use pathfinder_paths::{Heuristic, SearchConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "pathfinder", about = "A* over a random obstacle grid")]
struct Args {
    /// Map width in cells
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    width: i32,

    /// Map height in cells
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    height: i32,

    /// Chance of a cell being an obstacle
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_PROBABILITY)]
    obstacles: f64,

    /// Seed for reproducible maps and goals
    #[arg(long)]
    seed: Option<u64>,

    /// Start column
    #[arg(long, default_value_t = 0)]
    start_x: i32,

    /// Start row
    #[arg(long, default_value_t = 0)]
    start_y: i32,

    /// Search estimate: manhattan or chebyshev
    #[arg(long, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Re-open closed nodes when a cheaper route appears
    #[arg(long)]
    reopen: bool,

    /// Give up after expanding this many nodes
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Give up after this many milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,

    /// Print one path and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let mut search = SearchConfig::default().with_reopen_closed(self.reopen);
        if let Some(max) = self.max_expansions {
            search = search.with_max_expansions(max);
        }
        if let Some(ms) = self.time_budget_ms {
            search = search.with_time_budget(Duration::from_millis(ms));
        }
        SessionConfig {
            map: MapGenConfig {
                width: self.width,
                height: self.height,
                obstacle_probability: self.obstacles,
            },
            search,
            heuristic: self.heuristic,
            start: Point::new(self.start_x, self.start_y),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = Session::new(args.session_config(), rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", session.render())?;
    if args.once {
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        match line?.trim() {
            "q" | "quit" => break,
            "r" => {
                session.regenerate()?;
            }
            _ => {
                session.recompute()?;
            }
        }
        writeln!(out, "{}", session.render())?;
        out.flush()?;
    }
    Ok(())
}
