//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type: cost,
//! base stats and the abilities it carries. Instance-specific data (damage
//! taken, statuses, board slot) lives in `Card`.

use serde::{Deserialize, Serialize};

use super::ability::AbilityId;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Knight"), not a specific
/// instance in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Occupies a board slot and fights.
    #[default]
    Creature,
    /// Resolves and goes to the discard pile.
    Spell,
    /// Starts attached to its player; only its activated abilities are used.
    Hero,
}

impl CardKind {
    /// Check if cards of this kind are placed in a board slot when played.
    #[must_use]
    pub const fn is_board_card(self) -> bool {
        matches!(self, CardKind::Creature)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use ccg_ai::cards::{CardDefinition, CardId, CardKind};
///
/// let knight = CardDefinition::new(CardId::new(1), "Knight", CardKind::Creature)
///     .with_mana(3)
///     .with_stats(3, 3);
///
/// assert_eq!(knight.attack, 3);
/// assert!(knight.kind.is_board_card());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    pub kind: CardKind,

    /// Mana cost to play.
    pub mana: i32,

    /// Base attack.
    pub attack: i32,

    /// Base hit points.
    pub hp: i32,

    /// Abilities, in resolution order.
    pub abilities: Vec<AbilityId>,
}

impl CardDefinition {
    /// Create a new card definition with zero cost and stats.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            mana: 0,
            attack: 0,
            hp: 0,
            abilities: Vec::new(),
        }
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_mana(mut self, mana: i32) -> Self {
        self.mana = mana;
        self
    }

    /// Set attack and hit points.
    #[must_use]
    pub fn with_stats(mut self, attack: i32, hp: i32) -> Self {
        self.attack = attack;
        self.hp = hp;
        self
    }

    /// Add an ability.
    #[must_use]
    pub fn with_ability(mut self, ability: AbilityId) -> Self {
        self.abilities.push(ability);
        self
    }
}
