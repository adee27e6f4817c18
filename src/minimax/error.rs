//! Errors at the outer surfaces of the AI.
//!
//! The search itself cannot fail: illegal actions are never generated and
//! an empty action set degrades to end-turn.

use thiserror::Error;

/// Invalid search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search depth must be at least one turn")]
    ZeroDepth,

    #[error("per-turn action caps must be non-zero")]
    ZeroTurnCap,

    #[error("per-node action caps must be non-zero")]
    ZeroNodeCap,

    #[error("wide per-turn cap {wide} is below the normal cap {normal}")]
    NarrowWideTurnCap { normal: u32, wide: u32 },

    #[error("wide per-node cap {wide} is below the normal cap {normal}")]
    NarrowWideNodeCap { normal: usize, wide: usize },
}

/// Failure to start or finish a background search.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("a search is already running")]
    AlreadyRunning,

    #[error("the search worker panicked")]
    WorkerPanicked,

    #[error("failed to spawn the search worker: {0}")]
    Spawn(#[from] std::io::Error),
}
