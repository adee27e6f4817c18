//! Card instances - runtime card state.
//!
//! `Card` is a specific copy of a definition inside a match. Base stats are
//! copied from the definition when the instance is created, so buffs and
//! damage can be tracked without consulting the registry on every query.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ability::AbilityId;
use super::definition::{CardDefinition, CardId, CardKind};
use super::status::{CardStatus, StatusType};
use crate::core::entity::CardUid;
use crate::core::player::PlayerId;
use crate::core::slot::Slot;

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this instance.
    pub uid: CardUid,

    /// Reference to the card definition.
    pub card_id: CardId,

    pub owner: PlayerId,
    pub kind: CardKind,
    pub mana: i32,
    pub attack: i32,

    /// Maximum hit points.
    pub hp: i32,

    /// Damage taken; current hp is `hp - damage`.
    pub damage: i32,

    /// Board position, set while the card is on the board.
    pub slot: Option<Slot>,

    /// Has already attacked or cast this turn.
    pub exhausted: bool,

    pub statuses: SmallVec<[CardStatus; 2]>,
    pub abilities: SmallVec<[AbilityId; 2]>,
}

impl Card {
    /// Instantiate a definition for an owner.
    #[must_use]
    pub fn new(uid: CardUid, def: &CardDefinition, owner: PlayerId) -> Self {
        Self {
            uid,
            card_id: def.id,
            owner,
            kind: def.kind,
            mana: def.mana,
            attack: def.attack,
            hp: def.hp,
            damage: 0,
            slot: None,
            exhausted: false,
            statuses: SmallVec::new(),
            abilities: def.abilities.iter().copied().collect(),
        }
    }

    /// Remaining hit points.
    #[must_use]
    pub fn current_hp(&self) -> i32 {
        self.hp - self.damage
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_hp() <= 0
    }

    #[must_use]
    pub fn has_status(&self, status: StatusType) -> bool {
        self.statuses.iter().any(|s| s.status == status)
    }

    /// Value of a status, 0 if absent.
    #[must_use]
    pub fn status_value(&self, status: StatusType) -> i32 {
        self.statuses
            .iter()
            .filter(|s| s.status == status)
            .map(|s| i32::from(s.value))
            .max()
            .unwrap_or(0)
    }

    /// Attach a status, replacing an existing one of the same type.
    pub fn add_status(&mut self, status: CardStatus) {
        self.remove_status(status.status);
        self.statuses.push(status);
    }

    pub fn remove_status(&mut self, status: StatusType) {
        self.statuses.retain(|s| s.status != status);
    }

    /// Count statuses down one turn, dropping expired ones.
    pub fn tick_statuses(&mut self) {
        self.statuses.retain(|s| !s.tick());
    }

    /// Check if the card may attack right now.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !self.exhausted && self.attack > 0 && !self.has_status(StatusType::Paralysed)
    }

    #[must_use]
    pub fn has_ability(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> Card {
        let def = CardDefinition::new(CardId::new(2), "Knight", CardKind::Creature)
            .with_mana(3)
            .with_stats(3, 4)
            .with_ability(AbilityId::new(1));
        Card::new(CardUid(10), &def, PlayerId::new(0))
    }

    #[test]
    fn test_new_copies_definition() {
        let card = knight();
        assert_eq!(card.attack, 3);
        assert_eq!(card.current_hp(), 4);
        assert!(card.has_ability(AbilityId::new(1)));
        assert!(card.slot.is_none());
    }

    #[test]
    fn test_damage_and_death() {
        let mut card = knight();
        card.damage = 3;
        assert_eq!(card.current_hp(), 1);
        assert!(!card.is_dead());
        card.damage = 4;
        assert!(card.is_dead());
    }

    #[test]
    fn test_status_replace_and_tick() {
        let mut card = knight();
        card.add_status(CardStatus::new(StatusType::Armor, 1, 0));
        card.add_status(CardStatus::new(StatusType::Armor, 2, 0));
        assert_eq!(card.statuses.len(), 1);
        assert_eq!(card.status_value(StatusType::Armor), 2);

        card.add_status(CardStatus::new(StatusType::Paralysed, 0, 1));
        assert!(!card.can_attack());
        card.tick_statuses();
        assert!(!card.has_status(StatusType::Paralysed));
        assert!(card.has_status(StatusType::Armor));
        assert!(card.can_attack());
    }

    #[test]
    fn test_exhausted_cannot_attack() {
        let mut card = knight();
        card.exhausted = true;
        assert!(!card.can_attack());
    }
}
