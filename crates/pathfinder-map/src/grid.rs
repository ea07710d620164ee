//! A boolean traversability grid.
//!
//! [`GridMap`] stores one walkable flag per cell in row-major order. It is
//! filled once by a generation step and then only read, apart from
//! [`GridMap::force_walkable`] which clears a single obstacle.
//!
//! The text form uses `.` for walkable and `#` for blocked cells, one row per
//! line.

use std::fmt;
use std::str::FromStr;

use pathfinder_core::{Point, Range};
use rand::Rng;

use crate::error::{MapError, Result};

const WALKABLE: char = '.';
const BLOCKED: char = '#';

/// A fixed-size grid of walkable / blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct GridMap {
    bounds: Range,
    cells: Vec<bool>,
}

impl GridMap {
    /// Create a map of the given size with every cell walkable.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }
        let bounds = Range::sized(width, height);
        Ok(Self {
            bounds,
            cells: vec![true; bounds.len()],
        })
    }

    /// Create a map where each cell is independently blocked with
    /// probability `obstacle_probability`.
    pub fn generate(
        width: i32,
        height: i32,
        obstacle_probability: f64,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        check_probability(obstacle_probability)?;
        let mut map = Self::new(width, height)?;
        map.fill_random(obstacle_probability, rng);
        Ok(map)
    }

    /// Redraw every cell in place, keeping the size.
    pub fn regenerate(&mut self, obstacle_probability: f64, rng: &mut impl Rng) -> Result<()> {
        check_probability(obstacle_probability)?;
        self.fill_random(obstacle_probability, rng);
        Ok(())
    }

    fn fill_random(&mut self, obstacle_probability: f64, rng: &mut impl Rng) {
        for cell in self.cells.iter_mut() {
            *cell = !rng.random_bool(obstacle_probability);
        }
        log::debug!(
            "mapgen: filled {}x{} map, {} obstacles",
            self.width(),
            self.height(),
            self.count_blocked()
        );
    }

    /// Parse the text form: rows of `.` and `#` separated by newlines.
    ///
    /// Trailing blank lines are ignored; a blank row inside the map is an
    /// [`InconsistentRows`](MapError::InconsistentRows) error.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|l| l.is_empty()) {
            rows.pop();
        }
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut map = Self::new(width as i32, rows.len() as i32)?;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::InconsistentRows {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let walkable = match ch {
                    WALKABLE => true,
                    BLOCKED => false,
                    _ => return Err(MapError::InvalidCell { ch, pos }),
                };
                map.cells[y * width + x] = walkable;
            }
        }
        Ok(map)
    }

    /// The range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` addresses a cell of this map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    fn index(&self, p: Point) -> Result<usize> {
        self.bounds.index_of(p).ok_or(MapError::OutOfBounds {
            point: p,
            bounds: self.bounds,
        })
    }

    /// Whether the cell at `p` is walkable.
    ///
    /// Returns [`MapError::OutOfBounds`] outside the map; see
    /// [`walkable`](Self::walkable) for the non-failing variant.
    pub fn is_walkable(&self, p: Point) -> Result<bool> {
        let i = self.index(p)?;
        Ok(self.cells[i])
    }

    /// Whether `p` is inside the map and walkable. Out-of-bounds cells read
    /// as blocked.
    #[inline]
    pub fn walkable(&self, p: Point) -> bool {
        self.bounds.index_of(p).is_some_and(|i| self.cells[i])
    }

    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> Result<()> {
        let i = self.index(p)?;
        self.cells[i] = walkable;
        Ok(())
    }

    /// Clear any obstacle at `p`, making it a valid search target.
    pub fn force_walkable(&mut self, p: Point) -> Result<()> {
        self.set_walkable(p, true)
    }

    pub fn count_walkable(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn count_blocked(&self) -> usize {
        self.cells.len() - self.count_walkable()
    }

    /// Iterate over `(Point, walkable)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

fn check_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(MapError::InvalidProbability(p))
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width() as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &c in row {
                write!(f, "{}", if c { WALKABLE } else { BLOCKED })?;
            }
        }
        Ok(())
    }
}

impl FromStr for GridMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GridMap {
    type Error = MapError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<GridMap> for String {
    fn from(map: GridMap) -> Self {
        map.to_string()
    }
}
