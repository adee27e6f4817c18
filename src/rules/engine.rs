//! Rules engine trait for game implementations.
//!
//! The search never interprets game rules itself. It asks a `RulesEngine`
//! which moves are legal and lets it mutate cloned states:
//! - Legality predicates for every kind of action
//! - Target validity for play-time targets and selection prompts
//! - `apply_action` and `end_turn` to advance a simulated state

use crate::cards::{AbilityDefinition, Card, CardRegistry};
use crate::core::action::{AiAction, Placement, Target};
use crate::core::player::PlayerId;
use crate::core::slot::Slot;
use crate::core::state::MatchState;

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - Predicates must be pure: they are called many times per node.
/// - `apply_action` must be deterministic; the search relies on replaying
///   the same action on the same state giving the same result.
/// - Unknown cards or abilities make predicates return `false` and
///   `apply_action` a no-op.
pub trait RulesEngine {
    /// Card, ability and status definitions.
    fn registry(&self) -> &CardRegistry;

    /// Can `card` (in its owner's hand) be played with this placement?
    fn can_play_card(&self, state: &MatchState, card: &Card, placement: Placement) -> bool;

    /// Can a board card move to `slot`?
    fn can_move_card(&self, state: &MatchState, card: &Card, slot: Slot) -> bool;

    /// Can `attacker` attack the board card `target`?
    fn can_attack_card(&self, state: &MatchState, attacker: &Card, target: &Card) -> bool;

    /// Can `attacker` attack `target` directly?
    fn can_attack_player(&self, state: &MatchState, attacker: &Card, target: PlayerId) -> bool;

    /// Can `card` activate `ability` now (trigger, cost, exhaustion)?
    fn can_cast_ability(&self, state: &MatchState, card: &Card, ability: &AbilityDefinition)
        -> bool;

    /// Is `target` a legal play-time target for a targeted spell?
    fn is_play_target_valid(&self, state: &MatchState, card: &Card, target: Target) -> bool;

    /// Is `target` legal for the open selection of `ability`?
    fn can_select_target(
        &self,
        state: &MatchState,
        caster: &Card,
        ability: &AbilityDefinition,
        target: Target,
    ) -> bool;

    /// Cards offered by a card-selector prompt.
    fn card_selector_targets<'a>(
        &self,
        state: &'a MatchState,
        caster: &Card,
        ability: &AbilityDefinition,
    ) -> Vec<&'a Card>;

    /// Can a chained ability be chosen (its own conditions met)?
    fn are_trigger_conditions_met(
        &self,
        state: &MatchState,
        caster: &Card,
        ability: &AbilityDefinition,
    ) -> bool;

    /// Apply an action for `player`, mutating `state` in place.
    fn apply_action(&mut self, state: &mut MatchState, player: PlayerId, action: &AiAction);

    /// Finish the current turn and start the opponent's.
    fn end_turn(&mut self, state: &mut MatchState);

    // === Convenience Methods ===

    /// Selection check for the AI.
    ///
    /// On top of `can_select_target`, beneficial abilities may not pick the
    /// caster's opponent and harmful ones may not pick the caster's side.
    /// Slots have no polarity.
    fn can_ai_target(
        &self,
        state: &MatchState,
        caster: &Card,
        ability: &AbilityDefinition,
        target: Target,
    ) -> bool {
        if !self.can_select_target(state, caster, ability, target) {
            return false;
        }
        let target_side = match target {
            Target::Slot(_) => return true,
            Target::Player(p) => p,
            Target::Card(uid) => match state.owner_of(uid) {
                Some(owner) => owner,
                None => return false,
            },
        };
        let value = self.registry().ability_ai_value(ability);
        if value > 0 && target_side != caster.owner {
            return false;
        }
        if value < 0 && target_side == caster.owner {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AbilityId, AbilityTarget, CardDefinition, CardId, CardKind, Effect};

    /// Engine that allows any selection; only the polarity filter applies.
    struct OpenRules {
        registry: CardRegistry,
    }

    impl RulesEngine for OpenRules {
        fn registry(&self) -> &CardRegistry {
            &self.registry
        }
        fn can_play_card(&self, _: &MatchState, _: &Card, _: Placement) -> bool {
            true
        }
        fn can_move_card(&self, _: &MatchState, _: &Card, _: Slot) -> bool {
            true
        }
        fn can_attack_card(&self, _: &MatchState, _: &Card, _: &Card) -> bool {
            true
        }
        fn can_attack_player(&self, _: &MatchState, _: &Card, _: PlayerId) -> bool {
            true
        }
        fn can_cast_ability(&self, _: &MatchState, _: &Card, _: &AbilityDefinition) -> bool {
            true
        }
        fn is_play_target_valid(&self, _: &MatchState, _: &Card, _: Target) -> bool {
            true
        }
        fn can_select_target(&self, _: &MatchState, _: &Card, _: &AbilityDefinition, _: Target) -> bool {
            true
        }
        fn card_selector_targets<'a>(
            &self,
            _: &'a MatchState,
            _: &Card,
            _: &AbilityDefinition,
        ) -> Vec<&'a Card> {
            Vec::new()
        }
        fn are_trigger_conditions_met(&self, _: &MatchState, _: &Card, _: &AbilityDefinition) -> bool {
            true
        }
        fn apply_action(&mut self, _: &mut MatchState, _: PlayerId, _: &AiAction) {}
        fn end_turn(&mut self, _: &mut MatchState) {}
    }

    #[test]
    fn test_ai_target_polarity() {
        let rules = OpenRules {
            registry: CardRegistry::new(),
        };
        let state = MatchState::default();
        let def = CardDefinition::new(CardId::new(1), "Caster", CardKind::Creature);
        let caster = Card::new(crate::core::CardUid(1), &def, PlayerId::new(0));

        let harm = AbilityDefinition::new(AbilityId::new(1), "Zap")
            .with_target(AbilityTarget::SelectTarget)
            .with_effect(Effect::Damage(1));
        let help = AbilityDefinition::new(AbilityId::new(2), "Mend")
            .with_target(AbilityTarget::SelectTarget)
            .with_effect(Effect::Heal(1));

        let me = Target::Player(PlayerId::new(0));
        let them = Target::Player(PlayerId::new(1));

        assert!(!rules.can_ai_target(&state, &caster, &harm, me));
        assert!(rules.can_ai_target(&state, &caster, &harm, them));
        assert!(rules.can_ai_target(&state, &caster, &help, me));
        assert!(!rules.can_ai_target(&state, &caster, &help, them));

        let slot = Target::Slot(Slot::new(1, PlayerId::new(1)));
        assert!(rules.can_ai_target(&state, &caster, &help, slot));
    }
}
