//! Search nodes.
//!
//! Nodes live in an arena (`Pool<NodeId, SearchNode>`) and refer to each
//! other by index: the parent link is a plain `NodeId`, never an owner, and
//! children are an ordered list of ids.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::candidate::ActionId;
use super::pool::{Handle, Poolable};
use crate::core::PlayerId;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Handle for NodeId {
    #[inline]
    fn from_index(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One ply of the search tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    /// Back link; `None` at the root.
    pub parent: Option<NodeId>,

    /// Explored children, in exploration order.
    pub children: SmallVec<[NodeId; 8]>,

    /// Best child found so far; always one of `children`.
    pub best_child: Option<NodeId>,

    /// Action that produced this node from its parent; `None` at the root.
    pub action: Option<ActionId>,

    /// Player to move at this node.
    pub player: PlayerId,

    /// Turns elapsed since the root.
    pub turn_depth: u32,

    /// Actions taken so far in the current turn.
    pub turn_actions: u32,

    /// Candidates with a positive sort key below this are skipped.
    pub sort_min: i32,

    /// Heuristic value, positive favours the searching player.
    pub value: i32,

    /// Best value the searching player can guarantee.
    pub alpha: i32,

    /// Best value the opponent can guarantee.
    pub beta: i32,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            parent: None,
            children: SmallVec::new(),
            best_child: None,
            action: None,
            player: PlayerId::default(),
            turn_depth: 0,
            turn_actions: 0,
            sort_min: 0,
            value: 0,
            alpha: i32::MIN,
            beta: i32::MAX,
        }
    }
}

impl SearchNode {
    /// Check if further siblings can be skipped.
    #[inline]
    #[must_use]
    pub fn is_cut(&self) -> bool {
        self.alpha >= self.beta
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl Poolable for SearchNode {
    fn reset(&mut self) {
        self.parent = None;
        self.children.clear();
        self.best_child = None;
        self.action = None;
        self.player = PlayerId::default();
        self.turn_depth = 0;
        self.turn_actions = 0;
        self.sort_min = 0;
        self.value = 0;
        self.alpha = i32::MIN;
        self.beta = i32::MAX;
    }
}
