//! Duel: a compact two-player board game for driving the AI.
//!
//! - Each player starts with 20 hp, a shuffled deck and a hero
//! - Five board slots per side; creatures are summoned exhausted
//! - Mana grows by one per turn up to ten
//! - Spells may need a target chosen when played
//! - Activated abilities can open selection prompts (target, card from
//!   discard, or a choice between chained abilities)
//! - Statuses: taunt, armor, stealth, paralysis and poison
//!
//! First player to 0 hp loses.

pub mod cards;
mod game;

pub use cards::{abilities, default_deck, duel_registry, ids};
pub use game::{DuelBuilder, DuelRules, HAND_LIMIT};
