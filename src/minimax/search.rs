//! Minimax search with alpha-beta pruning.
//!
//! The tree alternates between the two players turn by turn, but a turn can
//! contain several actions, so consecutive plies often belong to the same
//! player. Each ply:
//!
//! 1. generates the mover's candidates and filters them to the node's cap,
//! 2. applies each surviving candidate to a clone of the state,
//! 3. scores the resulting child (recursing while the game is undecided and
//!    the turn depth is below the limit),
//! 4. keeps the best child for the mover: highest value when the mover is
//!    the searching player, lowest otherwise, tightening alpha or beta.
//!
//! Siblings stop being explored once `alpha >= beta`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::candidate::{ActionId, CandidateAction};
use super::config::AiConfig;
use super::controller::CancelToken;
use super::error::ConfigError;
use super::filter::{filter_candidates, FilterLimits};
use super::generator::CandidateGenerator;
use super::heuristic::{is_decided, Heuristic};
use super::node::{NodeId, SearchNode};
use super::pool::{ListPool, Pool, StatePool};
use super::stats::SearchStats;
use crate::core::{AiAction, MatchState, PlayerId};
use crate::rules::RulesEngine;

/// One step of the predicted best line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedStep {
    /// Player taking the action.
    pub player: PlayerId,
    pub action: AiAction,
    /// Value of the node the action leads to.
    pub value: i32,
}

/// Minimax search context.
///
/// Generic over the rules engine type. Owns the pools, so repeated runs
/// reuse memory; the tree of the last run stays readable until the next
/// run or `clear_memory`.
pub struct MinimaxSearch<E: RulesEngine> {
    /// The game rules engine.
    rules: E,

    config: AiConfig,

    heuristic: Heuristic,

    nodes: Pool<NodeId, SearchNode>,
    actions: Pool<ActionId, CandidateAction>,
    action_lists: ListPool<AiAction>,
    id_lists: ListPool<ActionId>,
    states: StatePool,

    root: Option<NodeId>,

    stats: SearchStats,

    cancel: CancelToken,
}

impl<E: RulesEngine> MinimaxSearch<E> {
    /// Create a search context after validating `config`.
    pub fn new(rules: E, config: AiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rules,
            heuristic: Heuristic::new(&config),
            nodes: Pool::with_capacity(config.pool_retain),
            actions: Pool::with_capacity(config.pool_retain),
            action_lists: ListPool::new(),
            id_lists: ListPool::new(),
            states: StatePool::new(),
            root: None,
            stats: SearchStats::default(),
            cancel: CancelToken::new(),
            config,
        })
    }

    /// Use an externally owned cancel token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &E {
        &self.rules
    }

    /// Token that stops a run in progress.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Statistics of the last run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Root of the last run's tree.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// A node of the last run's tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        self.nodes.get(id)
    }

    /// The candidate that produced a node.
    #[must_use]
    pub fn candidate(&self, id: ActionId) -> &CandidateAction {
        self.actions.get(id)
    }

    /// Search `state` and return the action to play now.
    ///
    /// `None` when the run was cancelled or produced no child. A cancelled
    /// token stays cancelled until reset, so later runs stop immediately.
    pub fn run(&mut self, state: &MatchState) -> Option<AiAction> {
        let start = Instant::now();
        self.release_run(self.config.pool_retain);
        self.stats.reset();
        self.heuristic.reseed(self.config.seed);

        let root = self.nodes.acquire();
        let win = self.heuristic.win_score(state, 0);
        let value = self.heuristic.full_score(state, self.rules.registry(), win);
        {
            let node = self.nodes.get_mut(root);
            node.player = state.acting_player();
            node.value = value;
            node.alpha = i32::MIN;
            node.beta = i32::MAX;
        }
        self.root = Some(root);

        // A finished match has nothing to search.
        if !is_decided(win) {
            let sim = self.states.acquire_clone(state);
            self.calculate_node(&sim, root);
            self.states.release(sim);
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        if self.cancel.is_cancelled() {
            self.stats.cancelled = true;
            warn!(
                nodes = self.stats.nodes_evaluated,
                "minimax search cancelled"
            );
            return None;
        }

        let best = self.best_action();
        debug!(
            elapsed_ms = self.stats.time_us / 1000,
            depth = self.stats.depth_reached,
            nodes = self.stats.nodes_evaluated,
            best = ?best,
            "minimax search complete"
        );
        best
    }

    /// Action chosen by the last completed run.
    #[must_use]
    pub fn best_action(&self) -> Option<AiAction> {
        if self.stats.cancelled {
            return None;
        }
        let best = self.nodes.get(self.root?).best_child?;
        let action = self.nodes.get(best).action?;
        Some(self.actions.get(action).action)
    }

    /// Predicted sequence of play along the best children.
    #[must_use]
    pub fn best_line(&self) -> Vec<PredictedStep> {
        let mut line = Vec::new();
        let Some(mut current) = self.root else {
            return line;
        };
        while let Some(child) = self.nodes.get(current).best_child {
            let node = self.nodes.get(child);
            if let Some(action) = node.action {
                line.push(PredictedStep {
                    player: self.nodes.get(current).player,
                    action: self.actions.get(action).action,
                    value: node.value,
                });
            }
            current = child;
        }
        line
    }

    /// Human-readable prediction of the best line.
    ///
    /// First line is the root value, then one line per action with the
    /// value of the state it leads to.
    #[must_use]
    pub fn node_path(&self) -> String {
        let Some(root) = self.root else {
            return String::new();
        };
        let mut path = format!("Prediction: HValue: {}\n", self.nodes.get(root).value);
        for step in self.best_line() {
            path.push_str(&format!("{}: {} ({})\n", step.player, step.action, step.value));
        }
        path
    }

    /// Forget the last tree and release all pooled memory.
    pub fn clear_memory(&mut self) {
        self.release_run(0);
        self.stats.reset();
    }

    fn release_run(&mut self, retain: usize) {
        self.root = None;
        self.nodes.reclaim(retain);
        self.actions.reclaim(retain);
        self.action_lists.reclaim(retain);
        self.id_lists.reclaim(retain);
        self.states.reclaim(retain);
    }

    /// Expand `node`: generate, filter and explore its candidates.
    fn calculate_node(&mut self, state: &MatchState, node: NodeId) {
        if self.cancel.is_cancelled() {
            return;
        }
        let (turn_depth, turn_actions, sort_min) = {
            let n = self.nodes.get(node);
            (n.turn_depth, n.turn_actions, n.sort_min)
        };

        let mut generated = self.action_lists.take();
        let within_turn_cap = turn_actions < self.config.turn_cap(turn_depth);
        CandidateGenerator::new(&self.rules)
            .with_moves(self.config.consider_moves)
            .generate(state, within_turn_cap, &mut generated);

        let mut ids = self.id_lists.take();
        for action in generated.drain(..) {
            let id = self.actions.acquire();
            self.actions.get_mut(id).action = action;
            ids.push(id);
        }
        self.action_lists.give(generated);

        let limits = FilterLimits {
            sort_min,
            cap: self.config.node_cap(turn_depth),
            margin: self.config.filter_margin,
        };
        let valid = filter_candidates(state, &mut ids, &mut self.actions, limits);
        if valid == 0 {
            let id = self.actions.acquire();
            ids.push(id);
        }
        self.stats.candidates += ids.len() as u32;
        self.stats.filtered += (ids.len() - valid.max(1)) as u32;
        trace!(
            node = %node,
            turn_depth,
            turn_actions,
            candidates = ids.len(),
            valid,
            "expand node"
        );

        for &id in ids.iter() {
            if !self.actions.get(id).valid {
                continue;
            }
            if self.config.alpha_beta && self.nodes.get(node).is_cut() {
                self.stats.cutoffs += 1;
                break;
            }
            if self.cancel.is_cancelled() {
                break;
            }
            self.calculate_child(state, node, id);
        }

        for &id in ids.iter() {
            if !self.actions.get(id).explored {
                self.actions.release(id);
            }
        }
        self.id_lists.give(ids);
    }

    /// Build, score and propagate the child reached by `action_id`.
    fn calculate_child(&mut self, state: &MatchState, parent: NodeId, action_id: ActionId) {
        let (action, sort) = {
            let candidate = self.actions.get_mut(action_id);
            candidate.explored = true;
            (candidate.action, candidate.sort)
        };
        let (mover, parent_depth, parent_actions, parent_sort_min, alpha, beta) = {
            let p = self.nodes.get(parent);
            (p.player, p.turn_depth, p.turn_actions, p.sort_min, p.alpha, p.beta)
        };

        let mut child_state = self.states.acquire_clone(state);
        self.rules.apply_action(&mut child_state, mover, &action);

        let new_turn = action.is_end_turn();
        let (turn_depth, turn_actions) = if new_turn {
            (parent_depth + 1, 0)
        } else {
            (parent_depth, parent_actions + 1)
        };
        let win = self.heuristic.win_score(&child_state, turn_depth);

        let child = self.nodes.acquire();
        {
            let n = self.nodes.get_mut(child);
            n.parent = Some(parent);
            n.action = Some(action_id);
            n.player = child_state.acting_player();
            n.turn_depth = turn_depth;
            n.turn_actions = turn_actions;
            n.sort_min = if new_turn { 0 } else { parent_sort_min.max(sort) };
            n.value = win;
            n.alpha = alpha;
            n.beta = beta;
        }
        self.nodes.get_mut(parent).children.push(child);

        if !is_decided(win) && turn_depth < self.config.depth {
            self.calculate_node(&child_state, child);
        } else {
            let value = self
                .heuristic
                .full_score(&child_state, self.rules.registry(), win);
            self.nodes.get_mut(child).value = value;
        }

        let value = self.nodes.get(child).value;
        let maximizing = mover == self.config.player;
        let p = self.nodes.get_mut(parent);
        if maximizing {
            if p.best_child.is_none() || value > p.value {
                p.best_child = Some(child);
                p.value = value;
                p.alpha = p.alpha.max(value);
            }
        } else if p.best_child.is_none() || value < p.value {
            p.best_child = Some(child);
            p.value = value;
            p.beta = p.beta.min(value);
        }

        self.stats.record_node(turn_depth);
        self.states.release(child_state);
    }
}

impl<E: RulesEngine> std::fmt::Debug for MinimaxSearch<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinimaxSearch")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
