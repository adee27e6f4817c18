//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card, ability and status definition a
//! match can refer to. Lookups by unknown ID return `None`; callers skip
//! whatever they cannot resolve.

use rustc_hash::FxHashMap;

use super::ability::{AbilityDefinition, AbilityId, AbilityTarget, AbilityTrigger, Effect};
use super::definition::{CardDefinition, CardId};
use super::status::{StatusDefinition, StatusType};

/// Chained abilities deeper than this are ignored when valuing an ability.
const MAX_CHAIN_DEPTH: usize = 4;

/// Registry of card, ability and status definitions.
///
/// ## Example
///
/// ```
/// use ccg_ai::cards::{CardDefinition, CardId, CardKind, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Squire", CardKind::Creature));
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Squire");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    abilities: FxHashMap<AbilityId, AbilityDefinition>,
    statuses: FxHashMap<StatusType, StatusDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Register an ability definition.
    ///
    /// Panics if an ability with the same ID already exists.
    pub fn register_ability(&mut self, ability: AbilityDefinition) {
        if self.abilities.contains_key(&ability.id) {
            panic!("Ability with ID {:?} already registered", ability.id);
        }
        self.abilities.insert(ability.id, ability);
    }

    /// Register or replace a status definition.
    pub fn register_status(&mut self, status: StatusDefinition) {
        self.statuses.insert(status.status, status);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn ability(&self, id: AbilityId) -> Option<&AbilityDefinition> {
        self.abilities.get(&id)
    }

    #[must_use]
    pub fn status(&self, status: StatusType) -> Option<&StatusDefinition> {
        self.statuses.get(&status)
    }

    /// Evaluation weight of a status; 0 when it has no definition.
    #[must_use]
    pub fn status_ai_value(&self, status: StatusType) -> i32 {
        self.statuses.get(&status).map_or(0, |s| s.ai_value)
    }

    /// Signed value of an ability for its target: positive helps, negative
    /// hurts. Sums effects, applied statuses and chained abilities.
    #[must_use]
    pub fn ability_ai_value(&self, ability: &AbilityDefinition) -> i32 {
        self.ability_ai_value_at(ability, 0)
    }

    fn ability_ai_value_at(&self, ability: &AbilityDefinition, depth: usize) -> i32 {
        let own: i32 = ability
            .effects
            .iter()
            .map(|effect| match effect {
                Effect::AddStatus(status) => self.status_ai_value(status.status),
                other => other.ai_value(),
            })
            .sum();
        if depth >= MAX_CHAIN_DEPTH {
            return own;
        }
        own + ability
            .chain
            .iter()
            .filter_map(|id| self.ability(*id))
            .map(|chained| self.ability_ai_value_at(chained, depth + 1))
            .sum::<i32>()
    }

    /// The on-play ability of a card that needs a target chosen at play time.
    #[must_use]
    pub fn play_target_ability(&self, id: CardId) -> Option<&AbilityDefinition> {
        self.get(id)?
            .abilities
            .iter()
            .filter_map(|a| self.ability(*a))
            .find(|a| a.trigger == AbilityTrigger::OnPlay && a.target == AbilityTarget::PlayTarget)
    }

    /// Check if playing this card requires a target.
    #[must_use]
    pub fn requires_target(&self, id: CardId) -> bool {
        self.play_target_ability(id).is_some()
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, CardStatus};

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register_status(StatusDefinition::new(StatusType::Paralysed, "Paralysed", -8));
        registry.register_ability(
            AbilityDefinition::new(AbilityId::new(1), "Bolt")
                .with_trigger(AbilityTrigger::OnPlay)
                .with_target(AbilityTarget::PlayTarget)
                .with_effect(Effect::Damage(3)),
        );
        registry.register_ability(
            AbilityDefinition::new(AbilityId::new(2), "Stun")
                .with_effect(Effect::AddStatus(CardStatus::new(StatusType::Paralysed, 0, 1))),
        );
        registry.register_ability(
            AbilityDefinition::new(AbilityId::new(3), "Mend").with_effect(Effect::Heal(2)),
        );
        registry.register_ability(
            AbilityDefinition::new(AbilityId::new(4), "Choice")
                .with_target(AbilityTarget::ChoiceSelector)
                .with_chain(AbilityId::new(2))
                .with_chain(AbilityId::new(3)),
        );
        registry.register(
            CardDefinition::new(CardId::new(1), "Firebolt", CardKind::Spell)
                .with_ability(AbilityId::new(1)),
        );
        registry.register(CardDefinition::new(CardId::new(2), "Squire", CardKind::Creature));
        registry
    }

    #[test]
    fn test_register_and_get() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(CardId::new(2)).unwrap().name, "Squire");
        assert!(registry.get(CardId::new(99)).is_none());
        assert!(registry.ability(AbilityId::new(99)).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = registry();
        registry.register(CardDefinition::new(CardId::new(1), "Again", CardKind::Spell));
    }

    #[test]
    fn test_requires_target() {
        let registry = registry();
        assert!(registry.requires_target(CardId::new(1)));
        assert!(!registry.requires_target(CardId::new(2)));
        assert!(!registry.requires_target(CardId::new(99)));
    }

    #[test]
    fn test_ability_ai_value() {
        let registry = registry();
        let bolt = registry.ability(AbilityId::new(1)).unwrap();
        let stun = registry.ability(AbilityId::new(2)).unwrap();
        let choice = registry.ability(AbilityId::new(4)).unwrap();

        assert_eq!(registry.ability_ai_value(bolt), -1);
        assert_eq!(registry.ability_ai_value(stun), -8);
        assert_eq!(registry.ability_ai_value(choice), -8 + 1);
        assert_eq!(registry.status_ai_value(StatusType::Taunt), 0);
    }
}
