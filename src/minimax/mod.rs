//! Minimax search with alpha-beta pruning for the card-game AI.
//!
//! ## Overview
//!
//! - **Turn-aware tree**: a turn spans several plies; the mover of each ply
//!   is whoever acts in the parent state, so the same player may move many
//!   times in a row
//! - **Breadth control**: per-node candidate caps, a per-turn action cap and
//!   a sort key that keeps a single ordering of each turn's actions
//! - **Wide phase**: the first turns of the tree get larger caps
//! - **Pooled memory**: nodes, candidates, scratch lists and simulated
//!   states are recycled between runs
//! - **Background runs**: `SearchController` searches on a worker thread
//!   and can be cancelled cooperatively
//!
//! ## Usage
//!
//! ```rust
//! use ccg_ai::core::PlayerId;
//! use ccg_ai::games::duel::DuelBuilder;
//! use ccg_ai::minimax::{AiConfig, MinimaxSearch};
//!
//! let (rules, state) = DuelBuilder::new().build(42);
//! let config = AiConfig::for_player(PlayerId::new(0)).with_depth(2);
//! let mut search = MinimaxSearch::new(rules, config).unwrap();
//!
//! if let Some(action) = search.run(&state) {
//!     println!("Best action: {action}");
//! }
//! println!("{}", search.node_path());
//! ```

pub mod candidate;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod generator;
pub mod heuristic;
pub mod node;
pub mod player;
pub mod pool;
pub mod search;
pub mod stats;

// Re-export main types
pub use candidate::{ActionId, CandidateAction};
pub use config::{AiConfig, Difficulty, HeuristicWeights};
pub use controller::{CancelToken, SearchController};
pub use error::{ConfigError, ControllerError};
pub use filter::{filter_candidates, FilterLimits};
pub use generator::CandidateGenerator;
pub use heuristic::{action_score, is_decided, sort_key, Heuristic, WIN_SCORE, WIN_THRESHOLD};
pub use node::{NodeId, SearchNode};
pub use player::{AiKind, AiPlayer, RandomPlayer};
pub use pool::{Handle, ListPool, Pool, Poolable, StatePool};
pub use search::{MinimaxSearch, PredictedStep};
pub use stats::SearchStats;
