//! Board positions.
//!
//! Each side of the board is a single row of `SLOTS_PER_SIDE` slots, numbered
//! from `X_MIN` to `X_MAX`. A slot belongs to exactly one player.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// First slot column.
pub const X_MIN: u8 = 1;
/// Last slot column.
pub const X_MAX: u8 = 5;
/// Number of slots on each side.
pub const SLOTS_PER_SIDE: usize = (X_MAX - X_MIN + 1) as usize;

/// A position on one player's side of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Column, `X_MIN..=X_MAX`.
    pub x: u8,
    /// Side of the board.
    pub player: PlayerId,
}

impl Slot {
    /// Create a slot.
    #[must_use]
    pub const fn new(x: u8, player: PlayerId) -> Self {
        Self { x, player }
    }

    /// Check if the column is on the board.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.x >= X_MIN && self.x <= X_MAX
    }

    /// All slots on one player's side, in column order.
    pub fn all_for(player: PlayerId) -> impl Iterator<Item = Slot> {
        (X_MIN..=X_MAX).map(move |x| Slot::new(x, player))
    }

    /// All slots on the board, seat 0 first.
    pub fn all() -> impl Iterator<Item = Slot> {
        PlayerId::all().flat_map(Slot::all_for)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.x, self.player.0)
    }
}
