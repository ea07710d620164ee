use std::time::Duration;

/// Tuning knobs for [`AStarSearch`](crate::AStarSearch).
///
/// The default never re-opens closed nodes and runs unbounded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Move a closed node back to the frontier when a strictly cheaper route
    /// to it is found.
    ///
    /// Off by default: a finalized node is never revisited, so with an
    /// inconsistent heuristic (Manhattan on an 8-connected grid) the returned
    /// path can be longer than the shortest one.
    pub reopen_closed: bool,

    /// Stop with [`PathResult::LimitReached`](crate::PathResult::LimitReached)
    /// after expanding this many nodes.
    pub max_expansions: Option<usize>,

    /// Stop with [`PathResult::LimitReached`](crate::PathResult::LimitReached)
    /// once this much wall-clock time has passed.
    pub time_budget: Option<Duration>,
}

impl SearchConfig {
    pub fn with_reopen_closed(mut self, reopen: bool) -> Self {
        self.reopen_closed = reopen;
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Whether any bound is configured.
    pub fn is_bounded(&self) -> bool {
        self.max_expansions.is_some() || self.time_budget.is_some()
    }
}
