//! # rust-ccg-ai
//!
//! Game-tree search AI for two-player card games.
//!
//! ## Design Principles
//!
//! 1. **Rules as a black box**: The search never interprets game rules. It
//!    asks a `RulesEngine` what is legal and lets it advance cloned states.
//!
//! 2. **Turns, not plies**: A turn is a sequence of actions by one player
//!    ended by an explicit end-turn. Depth is counted in turns.
//!
//! 3. **Bounded breadth**: Every node explores at most a configured number
//!    of candidates, chosen by a cheap action score.
//!
//! ## Architecture
//!
//! - **Arena tree**: Nodes and candidates live in pools addressed by typed
//!   handles; parents are handles, never references.
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`.
//!
//! - **Cooperative cancellation**: Background runs check a shared token
//!   between node expansions and are joined before results are read.
//!
//! ## Modules
//!
//! - `core`: Card and player IDs, slots, match state, actions, RNG
//! - `cards`: Card, ability and status definitions; card instances
//! - `rules`: RulesEngine trait for game implementations
//! - `minimax`: Evaluator, generator, filter, search, controller, AI player
//! - `games`: Reference game used by tests and benches

pub mod cards;
pub mod core;
pub mod games;
pub mod minimax;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    AiAction, AiRng, CardUid, MatchState, PendingSelection, Placement, PlayerId, PlayerMap,
    PlayerState, Slot, Target,
};

pub use crate::cards::{
    AbilityDefinition, AbilityId, AbilityTarget, Card, CardDefinition, CardId, CardKind,
    CardRegistry, CardStatus, Effect, StatusType,
};

pub use crate::rules::RulesEngine;

pub use crate::minimax::{
    AiConfig, AiKind, AiPlayer, CancelToken, ConfigError, ControllerError, Difficulty,
    MinimaxSearch, SearchController, SearchStats,
};
