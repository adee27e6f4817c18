//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Which actions are legal in a state
//! - How actions and turn ends modify state
//!
//! The search calls into `RulesEngine` but never interprets game-specific
//! concepts directly.

pub mod engine;

pub use engine::RulesEngine;
