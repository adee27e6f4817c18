//! The duel card set.

use crate::cards::{
    AbilityDefinition, AbilityTarget, AbilityTrigger, CardDefinition, CardId, CardKind, CardRegistry,
    CardStatus, Effect, StatusDefinition, StatusType, TargetFilter,
};

/// Card definition IDs.
pub mod ids {
    use crate::cards::CardId;

    pub const SQUIRE: CardId = CardId::new(1);
    pub const KNIGHT: CardId = CardId::new(2);
    pub const OGRE: CardId = CardId::new(3);
    pub const FIREBOLT: CardId = CardId::new(4);
    pub const HEALING_LIGHT: CardId = CardId::new(5);
    pub const INSIGHT: CardId = CardId::new(6);
    pub const SHAMAN: CardId = CardId::new(7);
    pub const MYSTIC: CardId = CardId::new(8);
    pub const GRAVEDIGGER: CardId = CardId::new(9);
    pub const STUNNER: CardId = CardId::new(10);
    pub const GUARDIAN: CardId = CardId::new(11);
    pub const VIPER: CardId = CardId::new(12);
    pub const WARLORD: CardId = CardId::new(20);
}

/// Ability definition IDs.
pub mod abilities {
    use crate::cards::AbilityId;

    pub const BOLT: AbilityId = AbilityId::new(1);
    pub const MEND: AbilityId = AbilityId::new(2);
    pub const STUDY: AbilityId = AbilityId::new(3);
    pub const ZAP: AbilityId = AbilityId::new(4);
    pub const ATTUNE: AbilityId = AbilityId::new(5);
    pub const EMPOWER: AbilityId = AbilityId::new(6);
    pub const WARD: AbilityId = AbilityId::new(7);
    pub const EXHUME: AbilityId = AbilityId::new(8);
    pub const STUN: AbilityId = AbilityId::new(9);
    pub const GUARD: AbilityId = AbilityId::new(10);
    pub const VENOM: AbilityId = AbilityId::new(11);
    pub const COMMAND: AbilityId = AbilityId::new(12);
}

/// Status weights used by the evaluator.
fn statuses() -> [StatusDefinition; 5] {
    [
        StatusDefinition::new(StatusType::Taunt, "Taunt", 3),
        StatusDefinition::new(StatusType::Armor, "Armor", 2),
        StatusDefinition::new(StatusType::Stealth, "Stealth", 2),
        StatusDefinition::new(StatusType::Paralysed, "Paralysed", -8),
        StatusDefinition::new(StatusType::Poisoned, "Poisoned", -4),
    ]
}

fn ability_set() -> Vec<AbilityDefinition> {
    use abilities::*;

    vec![
        AbilityDefinition::new(BOLT, "Bolt")
            .with_trigger(AbilityTrigger::OnPlay)
            .with_target(AbilityTarget::PlayTarget)
            .with_effect(Effect::Damage(3)),
        AbilityDefinition::new(MEND, "Mend")
            .with_trigger(AbilityTrigger::OnPlay)
            .with_target(AbilityTarget::OwnerPlayer)
            .with_effect(Effect::Heal(3)),
        AbilityDefinition::new(STUDY, "Study")
            .with_trigger(AbilityTrigger::OnPlay)
            .with_target(AbilityTarget::OwnerPlayer)
            .with_effect(Effect::Draw(2)),
        AbilityDefinition::new(ZAP, "Zap")
            .with_target(AbilityTarget::SelectTarget)
            .with_mana_cost(1)
            .with_effect(Effect::Damage(1)),
        AbilityDefinition::new(ATTUNE, "Attune")
            .with_target(AbilityTarget::ChoiceSelector)
            .with_chain(EMPOWER)
            .with_chain(WARD),
        AbilityDefinition::new(EMPOWER, "Empower")
            .with_target(AbilityTarget::Caster)
            .with_effect(Effect::AddAttack(2)),
        AbilityDefinition::new(WARD, "Ward")
            .with_target(AbilityTarget::Caster)
            .with_mana_cost(1)
            .with_effect(Effect::AddStatus(CardStatus::new(StatusType::Armor, 1, 0))),
        AbilityDefinition::new(EXHUME, "Exhume")
            .with_target(AbilityTarget::CardSelector)
            .with_filter(TargetFilter::Cards)
            .with_mana_cost(2)
            .with_effect(Effect::ReturnToHand),
        AbilityDefinition::new(STUN, "Stun")
            .with_trigger(AbilityTrigger::OnPlay)
            .with_target(AbilityTarget::EnemyBoard)
            .with_effect(Effect::AddStatus(CardStatus::new(StatusType::Paralysed, 0, 1))),
        AbilityDefinition::new(GUARD, "Guard")
            .with_trigger(AbilityTrigger::OnPlay)
            .with_target(AbilityTarget::Caster)
            .with_effect(Effect::AddStatus(CardStatus::permanent(StatusType::Taunt))),
        AbilityDefinition::new(VENOM, "Venom")
            .with_target(AbilityTarget::SelectTarget)
            .with_filter(TargetFilter::Cards)
            .with_mana_cost(1)
            .with_effect(Effect::AddStatus(CardStatus::new(StatusType::Poisoned, 1, 2))),
        AbilityDefinition::new(COMMAND, "Command")
            .with_target(AbilityTarget::OpponentPlayer)
            .with_mana_cost(2)
            .with_effect(Effect::Damage(1)),
    ]
}

fn card_set() -> Vec<CardDefinition> {
    use ids::*;

    vec![
        CardDefinition::new(SQUIRE, "Squire", CardKind::Creature)
            .with_mana(1)
            .with_stats(1, 2),
        CardDefinition::new(KNIGHT, "Knight", CardKind::Creature)
            .with_mana(3)
            .with_stats(3, 3),
        CardDefinition::new(OGRE, "Ogre", CardKind::Creature)
            .with_mana(5)
            .with_stats(5, 5),
        CardDefinition::new(FIREBOLT, "Firebolt", CardKind::Spell)
            .with_mana(2)
            .with_ability(abilities::BOLT),
        CardDefinition::new(HEALING_LIGHT, "Healing Light", CardKind::Spell)
            .with_mana(1)
            .with_ability(abilities::MEND),
        CardDefinition::new(INSIGHT, "Insight", CardKind::Spell)
            .with_mana(2)
            .with_ability(abilities::STUDY),
        CardDefinition::new(SHAMAN, "Shaman", CardKind::Creature)
            .with_mana(2)
            .with_stats(1, 3)
            .with_ability(abilities::ZAP),
        CardDefinition::new(MYSTIC, "Mystic", CardKind::Creature)
            .with_mana(3)
            .with_stats(2, 3)
            .with_ability(abilities::ATTUNE),
        CardDefinition::new(GRAVEDIGGER, "Gravedigger", CardKind::Creature)
            .with_mana(3)
            .with_stats(2, 2)
            .with_ability(abilities::EXHUME),
        CardDefinition::new(STUNNER, "Stunner", CardKind::Creature)
            .with_mana(4)
            .with_stats(3, 3)
            .with_ability(abilities::STUN),
        CardDefinition::new(GUARDIAN, "Guardian", CardKind::Creature)
            .with_mana(3)
            .with_stats(1, 5)
            .with_ability(abilities::GUARD),
        CardDefinition::new(VIPER, "Viper", CardKind::Creature)
            .with_mana(2)
            .with_stats(2, 1)
            .with_ability(abilities::VENOM),
        CardDefinition::new(WARLORD, "Warlord", CardKind::Hero)
            .with_ability(abilities::COMMAND),
    ]
}

/// Registry holding the whole duel set.
#[must_use]
pub fn duel_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for status in statuses() {
        registry.register_status(status);
    }
    for ability in ability_set() {
        registry.register_ability(ability);
    }
    for card in card_set() {
        registry.register(card);
    }
    registry
}

/// Default twenty-card deck, in list order before shuffling.
#[must_use]
pub fn default_deck() -> Vec<CardId> {
    use ids::*;

    vec![
        SQUIRE, SQUIRE, SQUIRE, KNIGHT, KNIGHT, KNIGHT, OGRE, OGRE, FIREBOLT, FIREBOLT,
        HEALING_LIGHT, INSIGHT, SHAMAN, SHAMAN, MYSTIC, GRAVEDIGGER, STUNNER, GUARDIAN, GUARDIAN,
        VIPER,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::AbilityId;

    #[test]
    fn test_registry_is_complete() {
        let registry = duel_registry();
        for id in default_deck() {
            let def = registry.get(id).unwrap();
            for ability in &def.abilities {
                assert!(registry.ability(*ability).is_some(), "{} misses {}", def.name, ability);
            }
        }
        assert!(registry.get(ids::WARLORD).is_some());
    }

    #[test]
    fn test_only_firebolt_needs_a_target() {
        let registry = duel_registry();
        let targeted: Vec<_> = registry
            .iter()
            .filter(|def| registry.requires_target(def.id))
            .map(|def| def.id)
            .collect();
        assert_eq!(targeted, vec![ids::FIREBOLT]);
    }

    #[test]
    fn test_ability_polarity() {
        let registry = duel_registry();
        let value = |id: AbilityId| registry.ability_ai_value(registry.ability(id).unwrap());
        assert!(value(abilities::ZAP) < 0);
        assert!(value(abilities::VENOM) < 0);
        assert!(value(abilities::MEND) > 0);
        assert!(value(abilities::ATTUNE) > 0);
    }
}
