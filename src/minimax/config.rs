//! Minimax search configuration parameters.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::core::PlayerId;

/// AI strength, 1 (weakest) to 10 (exact evaluation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);
    pub const MAX: Difficulty = Difficulty(10);

    /// Create a difficulty, clamped to `1..=10`.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Magnitude of the random noise added to leaf evaluations.
    ///
    /// ```
    /// use ccg_ai::minimax::Difficulty;
    ///
    /// assert_eq!(Difficulty::MAX.jitter(), 0);
    /// assert_eq!(Difficulty::new(7).jitter(), 20);
    /// assert_eq!(Difficulty::MIN.jitter(), 200);
    /// ```
    #[must_use]
    pub const fn jitter(self) -> i32 {
        match self.0 {
            10.. => 0,
            9 => 5,
            8 => 10,
            7 => 20,
            6 => 30,
            5 => 40,
            4 => 50,
            3 => 75,
            2 => 100,
            _ => 200,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Difficulty {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

/// Weights of the full heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Per card on board.
    pub board_card: i32,
    /// Per card in hand.
    pub hand_card: i32,
    /// Per enemy card destroyed.
    pub kill: i32,
    /// Per player hit point.
    pub player_hp: i32,
    /// Per attack point of a board card.
    pub card_attack: i32,
    /// Per hit point of a board card.
    pub card_hp: i32,
    /// Multiplier of a status's configured value.
    pub card_status: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            board_card: 10,
            hand_card: 5,
            kill: 5,
            player_hp: 4,
            card_attack: 3,
            card_hp: 2,
            card_status: 5,
        }
    }
}

/// Minimax search configuration.
///
/// Breadth caps come in two sets: the wide set applies while the node's
/// turn depth is below `depth_wide`, the normal set afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Seat the search plays for.
    pub player: PlayerId,

    /// Turns to look ahead. Nodes at this turn depth are evaluated, not
    /// expanded.
    pub depth: u32,

    /// Turn depth below which the wide caps apply.
    pub depth_wide: u32,

    /// Actions per turn before only end-turn is offered.
    pub actions_per_turn: u32,
    pub actions_per_turn_wide: u32,

    /// Actions explored per node after filtering.
    pub actions_per_node: usize,
    pub actions_per_node_wide: usize,

    /// Candidates within this many of the node cap skip score filtering.
    pub filter_margin: usize,

    pub difficulty: Difficulty,

    /// Seed for the jitter RNG. Reapplied at the start of every run.
    pub seed: u64,

    /// Stop exploring siblings once alpha >= beta. Disabling gives a plain
    /// full-width minimax over the same filtered tree.
    pub alpha_beta: bool,

    /// Generate board moves. Off by default to limit branching.
    pub consider_moves: bool,

    /// Pooled objects kept allocated between runs.
    pub pool_retain: usize,

    pub weights: HeuristicWeights,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            player: PlayerId::new(1),
            depth: 3,
            depth_wide: 1,
            actions_per_turn: 2,
            actions_per_turn_wide: 3,
            actions_per_node: 4,
            actions_per_node_wide: 7,
            filter_margin: 2,
            difficulty: Difficulty::MAX,
            seed: 42,
            alpha_beta: true,
            consider_moves: false,
            pool_retain: 4096,
            weights: HeuristicWeights::default(),
        }
    }
}

impl AiConfig {
    /// Default config playing for `player`.
    #[must_use]
    pub fn for_player(player: PlayerId) -> Self {
        Self {
            player,
            ..Self::default()
        }
    }

    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = player;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_depth_wide(mut self, depth_wide: u32) -> Self {
        self.depth_wide = depth_wide;
        self
    }

    /// Set per-turn caps (normal, wide).
    pub fn with_actions_per_turn(mut self, normal: u32, wide: u32) -> Self {
        self.actions_per_turn = normal;
        self.actions_per_turn_wide = wide;
        self
    }

    /// Set per-node caps (normal, wide).
    pub fn with_actions_per_node(mut self, normal: usize, wide: usize) -> Self {
        self.actions_per_node = normal;
        self.actions_per_node_wide = wide;
        self
    }

    pub fn with_filter_margin(mut self, margin: usize) -> Self {
        self.filter_margin = margin;
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<Difficulty>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    pub fn with_moves(mut self, enabled: bool) -> Self {
        self.consider_moves = enabled;
        self
    }

    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Is a node at this turn depth in the wide phase?
    #[inline]
    #[must_use]
    pub fn is_wide(&self, turn_depth: u32) -> bool {
        turn_depth < self.depth_wide
    }

    #[inline]
    #[must_use]
    pub fn turn_cap(&self, turn_depth: u32) -> u32 {
        if self.is_wide(turn_depth) {
            self.actions_per_turn_wide
        } else {
            self.actions_per_turn
        }
    }

    #[inline]
    #[must_use]
    pub fn node_cap(&self, turn_depth: u32) -> usize {
        if self.is_wide(turn_depth) {
            self.actions_per_node_wide
        } else {
            self.actions_per_node
        }
    }

    /// Check the breadth and depth settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.actions_per_turn == 0 || self.actions_per_turn_wide == 0 {
            return Err(ConfigError::ZeroTurnCap);
        }
        if self.actions_per_node == 0 || self.actions_per_node_wide == 0 {
            return Err(ConfigError::ZeroNodeCap);
        }
        if self.actions_per_turn_wide < self.actions_per_turn {
            return Err(ConfigError::NarrowWideTurnCap {
                normal: self.actions_per_turn,
                wide: self.actions_per_turn_wide,
            });
        }
        if self.actions_per_node_wide < self.actions_per_node {
            return Err(ConfigError::NarrowWideNodeCap {
                normal: self.actions_per_node,
                wide: self.actions_per_node_wide,
            });
        }
        Ok(())
    }
}
