//! Breadth control.
//!
//! Two stages per node. First every candidate gets its sort key and those
//! below the node's turn threshold are dropped; this is cheap and removes
//! reordered duplicates of a turn already explored. Only if clearly more
//! than `cap` candidates remain are they scored, ranked, and cut to `cap`.

use super::candidate::{ActionId, CandidateAction};
use super::heuristic::{action_score, sort_key};
use super::pool::Pool;
use crate::core::MatchState;

/// Per-node filter settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterLimits {
    /// Candidates with a positive sort key below this are invalid.
    pub sort_min: i32,
    /// Most candidates explored.
    pub cap: usize,
    /// Slack above `cap` tolerated without scoring.
    pub margin: usize,
}

/// Mark candidates valid or not, reordering `ids` by score when a cut is
/// needed. Returns the number left valid.
pub fn filter_candidates(
    state: &MatchState,
    ids: &mut [ActionId],
    actions: &mut Pool<ActionId, CandidateAction>,
    limits: FilterLimits,
) -> usize {
    let mut valid = 0;
    for &id in ids.iter() {
        let candidate = actions.get_mut(id);
        candidate.sort = sort_key(state, &candidate.action);
        candidate.valid = candidate.sort <= 0 || candidate.sort >= limits.sort_min;
        if candidate.valid {
            valid += 1;
        }
    }

    if valid <= limits.cap + limits.margin {
        return valid;
    }

    for &id in ids.iter() {
        let candidate = actions.get_mut(id);
        if candidate.valid {
            candidate.score = action_score(state, &candidate.action);
        }
    }

    // stable: equal scores keep generation order
    ids.sort_by(|a, b| {
        let a = actions.get(*a);
        let b = actions.get(*b);
        b.valid.cmp(&a.valid).then(b.score.cmp(&a.score))
    });

    for (index, &id) in ids.iter().enumerate() {
        let candidate = actions.get_mut(id);
        candidate.valid = candidate.valid && index < limits.cap;
    }
    valid.min(limits.cap)
}
