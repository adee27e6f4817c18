//! Candidate actions.
//!
//! A `CandidateAction` wraps an `AiAction` with the metadata the search
//! needs to rank and filter it. Candidates live in the action pool; the one
//! that produced a child node stays referenced by that node until the pools
//! are released.

use serde::{Deserialize, Serialize};

use super::pool::{Handle, Poolable};
use crate::core::AiAction;

/// Index into the action pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl Handle for ActionId {
    #[inline]
    fn from_index(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActionId({})", self.0)
    }
}

/// An action under consideration at a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAction {
    pub action: AiAction,

    /// Pruning score, never negative. Only computed when a node has more
    /// candidates than its cap allows.
    pub score: i32,

    /// Turn ordering key. Keys `<= 0` are always eligible.
    pub sort: i32,

    /// `false` once filtered out of this node's exploration.
    pub valid: bool,

    /// A child node was built from this candidate; it stays referenced by
    /// that node until the pools are released.
    pub explored: bool,
}

impl CandidateAction {
    #[must_use]
    pub fn new(action: AiAction) -> Self {
        Self {
            action,
            score: 0,
            sort: 0,
            valid: true,
            explored: false,
        }
    }
}

impl Default for CandidateAction {
    fn default() -> Self {
        Self::new(AiAction::EndTurn)
    }
}

impl Poolable for CandidateAction {
    fn reset(&mut self) {
        self.action = AiAction::EndTurn;
        self.score = 0;
        self.sort = 0;
        self.valid = true;
        self.explored = false;
    }
}
