use pathfinder_core::Point;

use crate::node::{NodeId, SearchNode};

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes closed and expanded (the goal node is closed but not expanded).
    pub expanded: usize,
    /// Nodes created, including the start node.
    pub discovered: usize,
    /// In-place relaxations of open nodes.
    pub updated: usize,
    /// Closed nodes moved back to the frontier.
    pub reopened: usize,
}

/// Outcome of [`AStarSearch::find_path`](crate::AStarSearch::find_path).
///
/// Every outcome keeps the node arena. When the goal is not reached, the
/// tree ends at the last node closed, so its parent chain is the partial
/// route explored toward the goal.
#[derive(Clone, Debug)]
pub enum PathResult {
    /// The goal was closed; the tree ends at its node.
    Found(SearchTree),
    /// The frontier drained before reaching the goal.
    Exhausted(SearchTree),
    /// A configured expansion or time bound stopped the search.
    LimitReached(SearchTree),
}

impl PathResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The search tree, whatever the outcome.
    pub fn tree(&self) -> &SearchTree {
        match self {
            Self::Found(tree) | Self::Exhausted(tree) | Self::LimitReached(tree) => tree,
        }
    }

    pub fn into_tree(self) -> SearchTree {
        match self {
            Self::Found(tree) | Self::Exhausted(tree) | Self::LimitReached(tree) => tree,
        }
    }

    /// The tree of a successful search.
    pub fn found(&self) -> Option<&SearchTree> {
        match self {
            Self::Found(tree) => Some(tree),
            _ => None,
        }
    }

    /// The start-to-goal path, if one was found.
    pub fn path(&self) -> Option<Vec<Point>> {
        self.found().map(SearchTree::path)
    }

    /// The start to last-closed route of a search that missed the goal.
    pub fn partial_path(&self) -> Option<Vec<Point>> {
        match self {
            Self::Found(_) => None,
            Self::Exhausted(tree) | Self::LimitReached(tree) => Some(tree.path()),
        }
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.tree().stats
    }
}

/// Every node created by a search, with its end node marked.
///
/// The end is the goal after a successful search and the last closed node
/// otherwise. Parent links form a tree rooted at the start node; walking
/// them from [`SearchTree::end`] yields the route in reverse.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    end: NodeId,
    stats: SearchStats,
}

impl SearchTree {
    pub(crate) fn new(nodes: Vec<SearchNode>, end: NodeId, stats: SearchStats) -> Self {
        Self { nodes, end, stats }
    }

    #[inline]
    pub fn end(&self) -> &SearchNode {
        &self.nodes[self.end.0]
    }

    #[inline]
    pub fn end_id(&self) -> NodeId {
        self.end
    }

    /// All nodes in discovery order; the start node is first.
    #[inline]
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Walk parent links from `id` back to the start node.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
            remaining: self.nodes.len(),
        }
    }

    /// Coordinates from the end back to the start, both included.
    pub fn path_from_end(&self) -> Vec<Point> {
        self.ancestors(self.end).map(SearchNode::pos).collect()
    }

    /// Coordinates from the start to the end, both included.
    pub fn path(&self) -> Vec<Point> {
        let mut path = self.path_from_end();
        path.reverse();
        path
    }

    /// Number of edges on the route.
    pub fn steps(&self) -> usize {
        self.ancestors(self.end).count() - 1
    }

    /// Total cost of the route (the end node's `g`).
    #[inline]
    pub fn cost(&self) -> i32 {
        self.end().g
    }
}

/// Iterator over a node and its parents, ending at the start node.
pub struct Ancestors<'a> {
    tree: &'a SearchTree,
    next: Option<NodeId>,
    // Bounds the walk even if a caller-built tree held a cycle.
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SearchNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tree.nodes.get(self.next?.0)?;
        self.remaining -= 1;
        self.next = node.parent;
        Some(node)
    }
}
