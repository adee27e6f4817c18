//! Core types: card and player identifiers, board slots, match state,
//! actions and the seedable RNG.
//!
//! Everything the search touches on every node lives here, so these types
//! are small, `Copy` where possible, and cheap to clone otherwise.

pub mod action;
pub mod entity;
pub mod player;
pub mod rng;
pub mod slot;
pub mod state;

pub use action::{ActionKind, AiAction, Placement, Target};
pub use entity::CardUid;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::AiRng;
pub use slot::{Slot, SLOTS_PER_SIDE, X_MAX, X_MIN};
pub use state::{MatchState, PendingSelection, PlayerState, DEFAULT_PLAYER_HP, MANA_CAP};
