use std::cmp::Ordering;
use std::fmt;

use pathfinder_core::Point;

/// Index of a [`SearchNode`] inside the arena of one search.
///
/// Ids are handed out in discovery order, so a larger id always means a more
/// recently discovered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in [`SearchTree::nodes`](crate::SearchTree::nodes).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a node is still on the frontier or has been finalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    Open,
    Closed,
}

/// One discovered coordinate with its A* scores.
///
/// `parent` is a back-reference into the same arena; it never owns the
/// parent node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub(crate) pos: Point,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) state: NodeState,
}

impl SearchNode {
    pub(crate) fn new(pos: Point, g: i32, h: i32, parent: Option<NodeId>) -> Self {
        Self {
            pos,
            g,
            h,
            f: g + h,
            parent,
            state: NodeState::Open,
        }
    }

    /// Route the node through `parent` with the new cost `g`.
    pub(crate) fn relax(&mut self, g: i32, parent: NodeId) {
        self.g = g;
        self.f = g + self.h;
        self.parent = Some(parent);
    }

    /// Grid coordinate of the node.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Cost from the start.
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the goal.
    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    /// `g + h`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.f
    }

    /// The node this one was reached from, `None` for the start node.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn state(&self) -> NodeState {
        self.state
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == NodeState::Closed
    }
}

/// Frontier entry, ordered for `BinaryHeap` so that the smallest `f` pops
/// first and, among equal `f`, the most recently discovered node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: i32,
    pub(crate) id: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse on f so the max-heap yields the minimum.
        other.f.cmp(&self.f).then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
