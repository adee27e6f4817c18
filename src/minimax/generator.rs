//! Candidate action generation.
//!
//! Enumerates every legal action of the player to move, asking the rules
//! engine about each one. Anything that refers to a card, ability or player
//! the state does not know is silently skipped.

use crate::cards::{AbilityDefinition, AbilityTarget, AbilityTrigger, Card, StatusType};
use crate::core::{ActionKind, AiAction, MatchState, Placement, PlayerId, Slot, Target};
use crate::rules::RulesEngine;

/// Enumerates candidate actions through a rules engine.
#[derive(Debug)]
pub struct CandidateGenerator<'a, E> {
    rules: &'a E,
    consider_moves: bool,
}

impl<'a, E: RulesEngine> CandidateGenerator<'a, E> {
    #[must_use]
    pub fn new(rules: &'a E) -> Self {
        Self {
            rules,
            consider_moves: false,
        }
    }

    /// Also generate board moves.
    #[must_use]
    pub fn with_moves(mut self, enabled: bool) -> Self {
        self.consider_moves = enabled;
        self
    }

    /// Candidates for the player to move, end-turn included when allowed.
    ///
    /// With `within_turn_cap` false only end-turn is produced.
    pub fn generate(&self, state: &MatchState, within_turn_cap: bool, out: &mut Vec<AiAction>) {
        let start = out.len();
        if within_turn_cap {
            if state.has_selection() {
                self.add_select_actions(state, out);
            } else {
                self.add_turn_actions(state, out);
            }
        }
        if Self::should_end_turn(state, &out[start..]) {
            out.push(AiAction::EndTurn);
        }
    }

    /// Every legal action, with no turn cap applied.
    #[must_use]
    pub fn legal_actions(&self, state: &MatchState) -> Vec<AiAction> {
        let mut out = Vec::new();
        self.generate(state, true, &mut out);
        out
    }

    /// End-turn is left out while it is dominated: the player can still hit
    /// the opponent directly, or has not spent any mana yet with a card to
    /// play. It is always offered when nothing else is, and never while a
    /// selection is open.
    fn should_end_turn(state: &MatchState, actions: &[AiAction]) -> bool {
        if actions.is_empty() {
            return true;
        }
        let has = |kind: ActionKind| actions.iter().any(|a| a.kind() == kind);
        let player = state.player(state.current_player);
        let full_mana = has(ActionKind::PlayCard) && player.mana >= player.mana_max;
        let can_attack_player = has(ActionKind::AttackPlayer);
        !can_attack_player && !full_mana && !state.has_selection()
    }

    fn add_turn_actions(&self, state: &MatchState, out: &mut Vec<AiAction>) {
        let player = state.player(state.current_player);

        for card in player.hand.iter() {
            self.add_play_actions(state, card, out);
        }
        for card in player.board.iter() {
            self.add_attack_actions(state, card, out);
            self.add_cast_actions(state, card, out);
            if self.consider_moves {
                self.add_move_actions(state, card, out);
            }
        }
        if let Some(hero) = &player.hero {
            self.add_cast_actions(state, hero, out);
        }
    }

    fn add_play_actions(&self, state: &MatchState, card: &Card, out: &mut Vec<AiAction>) {
        if is_paralysed(card) {
            return;
        }
        let rules = self.rules;

        if card.kind.is_board_card() {
            // any free slot will do
            let Some(slot) = state.player(card.owner).empty_slots().next() else {
                return;
            };
            let placement = Placement::Slot(slot);
            if rules.can_play_card(state, card, placement) {
                out.push(AiAction::PlayCard {
                    card: card.uid,
                    placement,
                });
            }
            return;
        }

        if !rules.registry().requires_target(card.card_id) {
            if rules.can_play_card(state, card, Placement::Free) {
                out.push(AiAction::PlayCard {
                    card: card.uid,
                    placement: Placement::Free,
                });
            }
            return;
        }

        let players = PlayerId::all().map(Target::Player);
        let slots = Slot::all().map(|slot| match state.slot_card(slot) {
            Some(occupant) => Target::Card(occupant.uid),
            None => Target::Slot(slot),
        });
        for target in players.chain(slots) {
            let placement = Placement::Target(target);
            if rules.can_play_card(state, card, placement)
                && rules.is_play_target_valid(state, card, target)
            {
                out.push(AiAction::PlayCard {
                    card: card.uid,
                    placement,
                });
            }
        }
    }

    fn add_attack_actions(&self, state: &MatchState, card: &Card, out: &mut Vec<AiAction>) {
        if is_paralysed(card) || !card.can_attack() {
            return;
        }
        let enemy = card.owner.opponent();
        for target in state.player(enemy).board.iter() {
            if self.rules.can_attack_card(state, card, target) {
                out.push(AiAction::AttackCard {
                    attacker: card.uid,
                    target: target.uid,
                });
            }
        }
        if self.rules.can_attack_player(state, card, enemy) {
            out.push(AiAction::AttackPlayer {
                attacker: card.uid,
                target: enemy,
            });
        }
    }

    fn add_cast_actions(&self, state: &MatchState, card: &Card, out: &mut Vec<AiAction>) {
        if is_paralysed(card) {
            return;
        }
        let registry = self.rules.registry();
        for ability in card.abilities.iter().filter_map(|id| registry.ability(*id)) {
            if ability.trigger == AbilityTrigger::Activate
                && self.rules.can_cast_ability(state, card, ability)
            {
                out.push(AiAction::CastAbility {
                    card: card.uid,
                    ability: ability.id,
                });
            }
        }
    }

    fn add_move_actions(&self, state: &MatchState, card: &Card, out: &mut Vec<AiAction>) {
        if is_paralysed(card) {
            return;
        }
        for slot in Slot::all_for(card.owner) {
            if self.rules.can_move_card(state, card, slot) {
                out.push(AiAction::MoveCard {
                    card: card.uid,
                    slot,
                });
            }
        }
    }

    fn add_select_actions(&self, state: &MatchState, out: &mut Vec<AiAction>) {
        let start = out.len();
        let Some(selection) = state.selection else {
            return;
        };
        let Some(caster) = state.card(selection.caster) else {
            return;
        };
        let Some(ability) = self.rules.registry().ability(selection.ability) else {
            return;
        };

        match ability.target {
            AbilityTarget::SelectTarget => self.add_select_targets(state, caster, ability, out),
            AbilityTarget::CardSelector => {
                for target in self.rules.card_selector_targets(state, caster, ability) {
                    out.push(AiAction::SelectCard {
                        caster: caster.uid,
                        target: target.uid,
                    });
                }
            }
            AbilityTarget::ChoiceSelector => {
                let registry = self.rules.registry();
                for (index, id) in ability.chain.iter().enumerate() {
                    let Ok(choice) = u8::try_from(index) else {
                        break;
                    };
                    let enabled = registry
                        .ability(*id)
                        .is_some_and(|c| self.rules.are_trigger_conditions_met(state, caster, c));
                    if enabled {
                        out.push(AiAction::SelectChoice {
                            caster: caster.uid,
                            choice,
                        });
                    }
                }
            }
            _ => {}
        }

        if out.len() == start {
            out.push(AiAction::CancelSelection);
        }
    }

    fn add_select_targets(
        &self,
        state: &MatchState,
        caster: &Card,
        ability: &AbilityDefinition,
        out: &mut Vec<AiAction>,
    ) {
        let rules = self.rules;
        for player in PlayerId::all() {
            if rules.can_ai_target(state, caster, ability, Target::Player(player)) {
                out.push(AiAction::SelectPlayer {
                    caster: caster.uid,
                    target: player,
                });
            }
        }
        for slot in Slot::all() {
            match state.slot_card(slot) {
                Some(card) => {
                    if rules.can_ai_target(state, caster, ability, Target::Card(card.uid)) {
                        out.push(AiAction::SelectCard {
                            caster: caster.uid,
                            target: card.uid,
                        });
                    }
                }
                None => {
                    if rules.can_ai_target(state, caster, ability, Target::Slot(slot)) {
                        out.push(AiAction::SelectSlot {
                            caster: caster.uid,
                            slot,
                        });
                    }
                }
            }
        }
    }
}

fn is_paralysed(card: &Card) -> bool {
    card.has_status(StatusType::Paralysed)
}
