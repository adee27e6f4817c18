//! Card instance identification.
//!
//! Every card that exists in a match (in a hand, on the board, in a pile or
//! attached to a player as a hero) carries a `CardUid` that is unique for the
//! lifetime of that match. Definitions are identified separately by
//! `CardId`; many instances can share one definition.

use std::hash::Hasher;

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// Unique identifier of a card instance within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardUid(pub u32);

impl CardUid {
    /// Create a new card UID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Stable hash of this UID.
    ///
    /// Uses `FxHasher`, which has no per-process random state, so the value
    /// is identical across runs and threads. Action ordering is derived
    /// from it.
    #[must_use]
    pub fn stable_hash(self) -> u32 {
        let mut hasher = FxHasher::default();
        hasher.write_u32(self.0);
        (hasher.finish() >> 32) as u32
    }
}

impl From<u32> for CardUid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
