//! Duel rules and match setup.

use smallvec::SmallVec;

use super::cards::{default_deck, duel_registry, ids};
use crate::cards::{
    AbilityDefinition, AbilityId, AbilityTarget, AbilityTrigger, Card, CardId, CardKind,
    CardRegistry, Effect, StatusType, TargetFilter,
};
use crate::core::{
    AiAction, AiRng, CardUid, MatchState, PendingSelection, Placement, PlayerId, Slot, Target,
    DEFAULT_PLAYER_HP, MANA_CAP,
};
use crate::rules::RulesEngine;

/// Cards drawn past this are burned.
pub const HAND_LIMIT: usize = 10;

/// Rules of the duel.
#[derive(Clone, Debug)]
pub struct DuelRules {
    registry: CardRegistry,
}

impl Default for DuelRules {
    fn default() -> Self {
        Self::new()
    }
}

impl DuelRules {
    /// Rules over the standard duel card set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(duel_registry())
    }

    /// Rules over a custom card set.
    #[must_use]
    pub fn with_registry(registry: CardRegistry) -> Self {
        Self { registry }
    }

    fn instantiate(&self, state: &mut MatchState, id: CardId, owner: PlayerId) -> Option<Card> {
        let def = self.registry.get(id)?;
        Some(state.create_card(def, owner))
    }

    /// Add a card to a player's hand.
    pub fn put_in_hand(&self, state: &mut MatchState, id: CardId, owner: PlayerId) -> Option<CardUid> {
        let card = self.instantiate(state, id, owner)?;
        let uid = card.uid;
        state.player_mut(owner).hand.push_back(card);
        Some(uid)
    }

    /// Add a card to the bottom of a player's deck.
    pub fn put_in_deck(&self, state: &mut MatchState, id: CardId, owner: PlayerId) -> Option<CardUid> {
        let card = self.instantiate(state, id, owner)?;
        let uid = card.uid;
        state.player_mut(owner).deck.push_back(card);
        Some(uid)
    }

    pub fn put_in_discard(
        &self,
        state: &mut MatchState,
        id: CardId,
        owner: PlayerId,
    ) -> Option<CardUid> {
        let card = self.instantiate(state, id, owner)?;
        let uid = card.uid;
        state.player_mut(owner).discard.push_back(card);
        Some(uid)
    }

    /// Put a ready creature straight onto the board at column `x`.
    ///
    /// `None` if the slot is taken or off the board, or the card is unknown.
    pub fn put_on_board(
        &self,
        state: &mut MatchState,
        id: CardId,
        owner: PlayerId,
        x: u8,
    ) -> Option<CardUid> {
        let slot = Slot::new(x, owner);
        if !slot.is_valid() || state.slot_card(slot).is_some() {
            return None;
        }
        let mut card = self.instantiate(state, id, owner)?;
        card.slot = Some(slot);
        let uid = card.uid;
        state.player_mut(owner).board.push_back(card.clone());
        self.fire_on_play(state, &card, None);
        Some(uid)
    }

    /// Give a player a hero card.
    pub fn set_hero(&self, state: &mut MatchState, id: CardId, owner: PlayerId) -> Option<CardUid> {
        let card = self.instantiate(state, id, owner)?;
        let uid = card.uid;
        state.player_mut(owner).hero = Some(card);
        Some(uid)
    }

    // === Effects ===

    /// Resolve an ability's effects on whatever its target category names.
    fn resolve_ability(
        &self,
        state: &mut MatchState,
        caster: CardUid,
        owner: PlayerId,
        ability: &AbilityDefinition,
        chosen: Option<Target>,
    ) {
        let targets: SmallVec<[Target; 5]> = match ability.target {
            AbilityTarget::None | AbilityTarget::ChoiceSelector => SmallVec::new(),
            AbilityTarget::Caster => SmallVec::from_elem(Target::Card(caster), 1),
            AbilityTarget::OwnerPlayer => SmallVec::from_elem(Target::Player(owner), 1),
            AbilityTarget::OpponentPlayer => {
                SmallVec::from_elem(Target::Player(owner.opponent()), 1)
            }
            AbilityTarget::EnemyBoard => state
                .player(owner.opponent())
                .board
                .iter()
                .map(|c| Target::Card(c.uid))
                .collect(),
            AbilityTarget::PlayTarget | AbilityTarget::SelectTarget | AbilityTarget::CardSelector => {
                chosen.into_iter().collect()
            }
        };
        for target in targets {
            for effect in &ability.effects {
                self.apply_effect(state, target, effect);
            }
        }
    }

    fn apply_effect(&self, state: &mut MatchState, target: Target, effect: &Effect) {
        match (*effect, target) {
            (Effect::Damage(n), Target::Player(p)) => state.player_mut(p).hp -= n,
            (Effect::Damage(n), Target::Card(uid)) => {
                if let Some(card) = state.active_card_mut(uid) {
                    damage_card(card, n);
                }
            }
            (Effect::Heal(n), Target::Player(p)) => {
                let player = state.player_mut(p);
                player.hp = (player.hp + n).min(player.hp_max);
            }
            (Effect::Heal(n), Target::Card(uid)) => {
                if let Some(card) = state.active_card_mut(uid) {
                    card.damage = (card.damage - n).max(0);
                }
            }
            (Effect::AddAttack(n), Target::Card(uid)) => {
                if let Some(card) = state.active_card_mut(uid) {
                    card.attack = (card.attack + n).max(0);
                }
            }
            (Effect::AddHp(n), Target::Card(uid)) => {
                if let Some(card) = state.active_card_mut(uid) {
                    card.hp += n;
                }
            }
            (Effect::AddStatus(status), Target::Card(uid)) => {
                if let Some(card) = state.active_card_mut(uid) {
                    card.add_status(status);
                }
            }
            (Effect::Draw(n), Target::Player(p)) => draw(state, p, usize::from(n)),
            (Effect::Draw(n), Target::Card(uid)) => {
                if let Some(owner) = state.owner_of(uid) {
                    draw(state, owner, usize::from(n));
                }
            }
            (Effect::GainMana(n), Target::Player(p)) => {
                let player = state.player_mut(p);
                player.mana = (player.mana + n).clamp(0, MANA_CAP);
            }
            (Effect::ReturnToHand, Target::Card(uid)) => self.return_to_hand(state, uid),
            _ => {}
        }
    }

    /// Move a board or discard card back to its owner's hand, fresh.
    fn return_to_hand(&self, state: &mut MatchState, uid: CardUid) {
        let Some(owner) = state.owner_of(uid) else {
            return;
        };
        let player = state.player_mut(owner);
        let Some(mut card) = player
            .take_board_card(uid)
            .or_else(|| player.take_discard_card(uid))
        else {
            return;
        };
        if let Some(def) = self.registry.get(card.card_id) {
            card.attack = def.attack;
            card.hp = def.hp;
        }
        reset_card(&mut card);
        if player.hand.len() < HAND_LIMIT {
            player.hand.push_back(card);
        } else {
            player.discard.push_back(card);
        }
    }

    /// Fire a card's on-play abilities.
    fn fire_on_play(&self, state: &mut MatchState, card: &Card, chosen: Option<Target>) {
        for id in &card.abilities {
            let Some(ability) = self.registry.ability(*id) else {
                continue;
            };
            if ability.trigger == AbilityTrigger::OnPlay {
                self.resolve_ability(state, card.uid, card.owner, ability, chosen);
            }
        }
    }

    // === Actions ===

    fn play_card(&self, state: &mut MatchState, player: PlayerId, uid: CardUid, placement: Placement) {
        let legal = state.player(player).hand_card(uid).is_some_and(|card| {
            self.can_play_card(state, card, placement)
                && match placement {
                    Placement::Target(target) => self.is_play_target_valid(state, card, target),
                    _ => true,
                }
        });
        if !legal {
            return;
        }
        let Some(mut card) = state.player_mut(player).take_hand_card(uid) else {
            return;
        };
        state.player_mut(player).mana -= card.mana;

        match placement {
            Placement::Slot(slot) => {
                card.slot = Some(slot);
                card.exhausted = true;
                state.player_mut(player).board.push_back(card.clone());
                self.fire_on_play(state, &card, None);
            }
            Placement::Target(target) => {
                self.fire_on_play(state, &card, Some(target));
                state.player_mut(player).discard.push_back(card);
            }
            Placement::Free => {
                self.fire_on_play(state, &card, None);
                state.player_mut(player).discard.push_back(card);
            }
        }
    }

    fn move_card(&self, state: &mut MatchState, player: PlayerId, uid: CardUid, slot: Slot) {
        let legal = state
            .player(player)
            .board_card(uid)
            .is_some_and(|card| self.can_move_card(state, card, slot));
        if !legal {
            return;
        }
        if let Some(card) = state.active_card_mut(uid) {
            card.slot = Some(slot);
            card.exhausted = true;
        }
    }

    fn attack_card(&self, state: &mut MatchState, player: PlayerId, attacker: CardUid, target: CardUid) {
        let strikes = match (state.player(player).board_card(attacker), state.board_card(target)) {
            (Some(a), Some(t)) if self.can_attack_card(state, a, t) => Some((a.attack, t.attack)),
            _ => None,
        };
        let Some((attack, counter)) = strikes else {
            return;
        };
        if let Some(t) = state.active_card_mut(target) {
            damage_card(t, attack);
        }
        if let Some(a) = state.active_card_mut(attacker) {
            damage_card(a, counter);
            a.exhausted = true;
            a.remove_status(StatusType::Stealth);
        }
    }

    fn attack_player(&self, state: &mut MatchState, player: PlayerId, attacker: CardUid, target: PlayerId) {
        let attack = match state.player(player).board_card(attacker) {
            Some(a) if self.can_attack_player(state, a, target) => a.attack,
            _ => return,
        };
        state.player_mut(target).hp -= attack;
        if let Some(a) = state.active_card_mut(attacker) {
            a.exhausted = true;
            a.remove_status(StatusType::Stealth);
        }
    }

    fn cast_ability(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        uid: CardUid,
        ability: AbilityId,
    ) {
        let Some(ability) = self.registry.ability(ability) else {
            return;
        };
        let legal = active_card(state, uid)
            .is_some_and(|card| card.owner == player && self.can_cast_ability(state, card, ability));
        if !legal {
            return;
        }
        state.player_mut(player).mana -= ability.mana_cost;
        if let Some(card) = state.active_card_mut(uid) {
            if ability.exhaust {
                card.exhausted = true;
            }
        }
        if ability.target.is_selector() {
            state.selection = Some(PendingSelection {
                player,
                caster: uid,
                ability: ability.id,
            });
        } else {
            self.resolve_ability(state, uid, player, ability, None);
        }
    }

    /// The open prompt, if `player` must answer it for `caster`.
    fn open_selection(
        &self,
        state: &MatchState,
        player: PlayerId,
        caster: CardUid,
    ) -> Option<(PendingSelection, &AbilityDefinition)> {
        let selection = state.selection?;
        if selection.player != player || selection.caster != caster {
            return None;
        }
        Some((selection, self.registry.ability(selection.ability)?))
    }

    fn select_target(&self, state: &mut MatchState, player: PlayerId, caster: CardUid, target: Target) {
        let Some((_, ability)) = self.open_selection(state, player, caster) else {
            return;
        };
        let legal = state.card(caster).is_some_and(|card| match (ability.target, target) {
            (AbilityTarget::CardSelector, Target::Card(uid)) => self
                .card_selector_targets(state, card, ability)
                .iter()
                .any(|c| c.uid == uid),
            (AbilityTarget::SelectTarget, _) => self.can_select_target(state, card, ability, target),
            _ => false,
        });
        if !legal {
            return;
        }
        state.selection = None;
        self.resolve_ability(state, caster, player, ability, Some(target));
    }

    fn select_choice(&self, state: &mut MatchState, player: PlayerId, caster: CardUid, choice: u8) {
        let Some((_, ability)) = self.open_selection(state, player, caster) else {
            return;
        };
        if ability.target != AbilityTarget::ChoiceSelector {
            return;
        }
        let Some(chosen) = ability
            .chain
            .get(usize::from(choice))
            .and_then(|id| self.registry.ability(*id))
        else {
            return;
        };
        let enabled = state
            .card(caster)
            .is_some_and(|card| self.are_trigger_conditions_met(state, card, chosen));
        if !enabled {
            return;
        }
        state.selection = None;
        state.player_mut(player).mana -= chosen.mana_cost;
        self.resolve_ability(state, caster, player, chosen, None);
    }

    /// Send dead board cards to the discard pile and credit the kills.
    fn resolve_deaths(&self, state: &mut MatchState) {
        for player in PlayerId::all() {
            let dead: SmallVec<[CardUid; 4]> = state
                .player(player)
                .board
                .iter()
                .filter(|c| c.is_dead())
                .map(|c| c.uid)
                .collect();
            for uid in dead {
                if let Some(mut card) = state.player_mut(player).take_board_card(uid) {
                    reset_card(&mut card);
                    state.player_mut(player).discard.push_back(card);
                    state.player_mut(player.opponent()).kill_count += 1;
                }
            }
        }
    }
}

impl RulesEngine for DuelRules {
    fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    fn can_play_card(&self, state: &MatchState, card: &Card, placement: Placement) -> bool {
        let player = state.player(card.owner);
        if !in_turn(state, card.owner) || player.hand_card(card.uid).is_none() || player.mana < card.mana {
            return false;
        }
        match (card.kind, placement) {
            (CardKind::Creature, Placement::Slot(slot)) => {
                slot.player == card.owner && slot.is_valid() && state.slot_card(slot).is_none()
            }
            (CardKind::Spell, Placement::Free) => !self.registry.requires_target(card.card_id),
            (CardKind::Spell, Placement::Target(_)) => self.registry.requires_target(card.card_id),
            _ => false,
        }
    }

    fn can_move_card(&self, state: &MatchState, card: &Card, slot: Slot) -> bool {
        in_turn(state, card.owner)
            && state.player(card.owner).board_card(card.uid).is_some()
            && !card.exhausted
            && !card.has_status(StatusType::Paralysed)
            && slot.player == card.owner
            && slot.is_valid()
            && state.slot_card(slot).is_none()
    }

    fn can_attack_card(&self, state: &MatchState, attacker: &Card, target: &Card) -> bool {
        let enemy = attacker.owner.opponent();
        if !in_turn(state, attacker.owner)
            || state.player(attacker.owner).board_card(attacker.uid).is_none()
            || !attacker.can_attack()
            || state.player(enemy).board_card(target.uid).is_none()
            || target.has_status(StatusType::Stealth)
        {
            return false;
        }
        !has_taunt(state, enemy) || target.has_status(StatusType::Taunt)
    }

    fn can_attack_player(&self, state: &MatchState, attacker: &Card, target: PlayerId) -> bool {
        in_turn(state, attacker.owner)
            && state.player(attacker.owner).board_card(attacker.uid).is_some()
            && attacker.can_attack()
            && target == attacker.owner.opponent()
            && !has_taunt(state, target)
    }

    fn can_cast_ability(&self, state: &MatchState, card: &Card, ability: &AbilityDefinition) -> bool {
        if !in_turn(state, card.owner)
            || active_card(state, card.uid).is_none()
            || ability.trigger != AbilityTrigger::Activate
            || !card.has_ability(ability.id)
            || (ability.exhaust && card.exhausted)
            || card.has_status(StatusType::Paralysed)
            || state.player(card.owner).mana < ability.mana_cost
        {
            return false;
        }
        match ability.target {
            AbilityTarget::CardSelector => !self.card_selector_targets(state, card, ability).is_empty(),
            AbilityTarget::ChoiceSelector => ability
                .chain
                .iter()
                .filter_map(|id| self.registry.ability(*id))
                .any(|chained| {
                    state.player(card.owner).mana - ability.mana_cost >= chained.mana_cost
                }),
            _ => true,
        }
    }

    fn is_play_target_valid(&self, state: &MatchState, card: &Card, target: Target) -> bool {
        self.registry
            .play_target_ability(card.card_id)
            .is_some_and(|ability| matches_filter(state, ability.filter, target, card.owner))
    }

    fn can_select_target(
        &self,
        state: &MatchState,
        caster: &Card,
        ability: &AbilityDefinition,
        target: Target,
    ) -> bool {
        let open = state
            .selection
            .is_some_and(|s| s.caster == caster.uid && s.ability == ability.id);
        open && matches_filter(state, ability.filter, target, caster.owner)
    }

    fn card_selector_targets<'a>(
        &self,
        state: &'a MatchState,
        caster: &Card,
        _ability: &AbilityDefinition,
    ) -> Vec<&'a Card> {
        state
            .player(caster.owner)
            .discard
            .iter()
            .filter(|c| c.kind.is_board_card())
            .collect()
    }

    fn are_trigger_conditions_met(
        &self,
        state: &MatchState,
        caster: &Card,
        ability: &AbilityDefinition,
    ) -> bool {
        state.player(caster.owner).mana >= ability.mana_cost
    }

    fn apply_action(&mut self, state: &mut MatchState, player: PlayerId, action: &AiAction) {
        match *action {
            AiAction::EndTurn => {
                if state.current_player == player {
                    self.end_turn(state);
                }
            }
            AiAction::CancelSelection => {
                if state.selection.is_some_and(|s| s.player == player) {
                    state.selection = None;
                }
            }
            AiAction::PlayCard { card, placement } => self.play_card(state, player, card, placement),
            AiAction::MoveCard { card, slot } => self.move_card(state, player, card, slot),
            AiAction::AttackCard { attacker, target } => {
                self.attack_card(state, player, attacker, target);
            }
            AiAction::AttackPlayer { attacker, target } => {
                self.attack_player(state, player, attacker, target);
            }
            AiAction::CastAbility { card, ability } => self.cast_ability(state, player, card, ability),
            AiAction::SelectCard { caster, target } => {
                self.select_target(state, player, caster, Target::Card(target));
            }
            AiAction::SelectPlayer { caster, target } => {
                self.select_target(state, player, caster, Target::Player(target));
            }
            AiAction::SelectSlot { caster, slot } => {
                self.select_target(state, player, caster, Target::Slot(slot));
            }
            AiAction::SelectChoice { caster, choice } => {
                self.select_choice(state, player, caster, choice);
            }
        }
        self.resolve_deaths(state);
    }

    fn end_turn(&mut self, state: &mut MatchState) {
        let current = state.current_player;
        state.selection = None;

        for card in state.player_mut(current).board.iter_mut() {
            card.damage += card.status_value(StatusType::Poisoned);
            card.tick_statuses();
        }
        self.resolve_deaths(state);

        let next = current.opponent();
        state.current_player = next;
        state.turn += 1;

        let player = state.player_mut(next);
        player.mana_max = (player.mana_max + 1).min(MANA_CAP);
        player.mana = player.mana_max;
        for card in player.board.iter_mut() {
            card.exhausted = false;
        }
        if let Some(hero) = player.hero.as_mut() {
            hero.exhausted = false;
        }
        draw(state, next, 1);
    }
}

/// It is `player`'s turn and nothing is pending.
fn in_turn(state: &MatchState, player: PlayerId) -> bool {
    state.current_player == player && !state.has_selection() && !state.has_ended()
}

fn has_taunt(state: &MatchState, player: PlayerId) -> bool {
    state
        .player(player)
        .board
        .iter()
        .any(|c| c.has_status(StatusType::Taunt))
}

/// A hero or board card.
fn active_card(state: &MatchState, uid: CardUid) -> Option<&Card> {
    state.board_card(uid).or_else(|| {
        PlayerId::all()
            .filter_map(|p| state.player(p).hero.as_ref())
            .find(|h| h.uid == uid)
    })
}

fn matches_filter(state: &MatchState, filter: TargetFilter, target: Target, owner: PlayerId) -> bool {
    match (filter, target) {
        (TargetFilter::Characters | TargetFilter::Players, Target::Player(_)) => true,
        (TargetFilter::Characters | TargetFilter::Cards, Target::Card(uid)) => state
            .board_card(uid)
            .is_some_and(|c| c.owner == owner || !c.has_status(StatusType::Stealth)),
        (TargetFilter::Slots, Target::Slot(slot)) => {
            slot.is_valid() && state.slot_card(slot).is_none()
        }
        _ => false,
    }
}

fn damage_card(card: &mut Card, amount: i32) {
    let armor = card.status_value(StatusType::Armor);
    card.damage += (amount - armor).max(0);
}

fn reset_card(card: &mut Card) {
    card.damage = 0;
    card.slot = None;
    card.exhausted = false;
    card.statuses.clear();
}

/// Move `count` cards from deck to hand, burning any past the hand limit.
fn draw(state: &mut MatchState, player: PlayerId, count: usize) {
    let player = state.player_mut(player);
    for _ in 0..count {
        let Some(card) = player.deck.pop_front() else {
            break;
        };
        if player.hand.len() < HAND_LIMIT {
            player.hand.push_back(card);
        } else {
            player.discard.push_back(card);
        }
    }
}

/// Builder for a duel match.
#[derive(Clone, Debug)]
pub struct DuelBuilder {
    starting_hp: i32,
    starting_hand: usize,
    deck: Vec<CardId>,
    heroes: bool,
}

impl Default for DuelBuilder {
    fn default() -> Self {
        Self {
            starting_hp: DEFAULT_PLAYER_HP,
            starting_hand: 4,
            deck: default_deck(),
            heroes: true,
        }
    }
}

impl DuelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    #[must_use]
    pub fn starting_hand(mut self, size: usize) -> Self {
        self.starting_hand = size;
        self
    }

    /// Deck list used by both players.
    #[must_use]
    pub fn deck(mut self, deck: Vec<CardId>) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn heroes(mut self, enabled: bool) -> Self {
        self.heroes = enabled;
        self
    }

    /// Build the rules and the opening state. Player 0 moves first with one
    /// mana.
    #[must_use]
    pub fn build(self, seed: u64) -> (DuelRules, MatchState) {
        let rules = DuelRules::new();
        let mut state = MatchState::new(self.starting_hp);
        let mut rng = AiRng::new(seed);

        for player in PlayerId::all() {
            let mut deck = self.deck.clone();
            rng.shuffle(&mut deck);
            for id in deck {
                rules.put_in_deck(&mut state, id, player);
            }
            if self.heroes {
                rules.set_hero(&mut state, ids::WARLORD, player);
            }
            draw(&mut state, player, self.starting_hand);
        }

        let first = state.player_mut(PlayerId::new(0));
        first.mana_max = 1;
        first.mana = 1;
        (rules, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardStatus;
    use crate::games::duel::cards::abilities;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn empty_match(mana: i32) -> (DuelRules, MatchState) {
        let rules = DuelRules::new();
        let mut state = MatchState::default();
        for player in PlayerId::all() {
            let p = state.player_mut(player);
            p.mana_max = mana;
            p.mana = mana;
        }
        (rules, state)
    }

    #[test]
    fn test_build_deals_hands() {
        let (_, state) = DuelBuilder::new().starting_hand(3).build(42);
        for player in PlayerId::all() {
            let p = state.player(player);
            assert_eq!(p.hand.len(), 3);
            assert_eq!(p.deck.len(), default_deck().len() - 3);
            assert!(p.hero.is_some());
        }
        assert_eq!(state.player(P0).mana, 1);
        assert_eq!(state.player(P1).mana, 0);
    }

    #[test]
    fn test_build_is_deterministic() {
        let (_, a) = DuelBuilder::new().build(7);
        let (_, b) = DuelBuilder::new().build(7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_play_creature_spends_mana() {
        let (mut rules, mut state) = empty_match(3);
        let uid = rules.put_in_hand(&mut state, ids::KNIGHT, P0).unwrap();
        let slot = Slot::new(1, P0);
        let card = state.player(P0).hand_card(uid).unwrap().clone();
        assert!(rules.can_play_card(&state, &card, Placement::Slot(slot)));
        assert!(!rules.can_play_card(&state, &card, Placement::Slot(Slot::new(1, P1))));

        rules.apply_action(
            &mut state,
            P0,
            &AiAction::PlayCard {
                card: uid,
                placement: Placement::Slot(slot),
            },
        );
        assert_eq!(state.player(P0).mana, 0);
        let placed = state.slot_card(slot).unwrap();
        assert_eq!(placed.uid, uid);
        assert!(placed.exhausted);
    }

    #[test]
    fn test_unaffordable_play_is_ignored() {
        let (mut rules, mut state) = empty_match(2);
        let uid = rules.put_in_hand(&mut state, ids::OGRE, P0).unwrap();
        let before = state.clone();
        rules.apply_action(
            &mut state,
            P0,
            &AiAction::PlayCard {
                card: uid,
                placement: Placement::Slot(Slot::new(1, P0)),
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_combat_and_kill_credit() {
        let (mut rules, mut state) = empty_match(0);
        let knight = rules.put_on_board(&mut state, ids::KNIGHT, P0, 1).unwrap();
        let squire = rules.put_on_board(&mut state, ids::SQUIRE, P1, 1).unwrap();

        rules.apply_action(
            &mut state,
            P0,
            &AiAction::AttackCard {
                attacker: knight,
                target: squire,
            },
        );
        assert!(state.board_card(squire).is_none());
        assert!(state.player(P1).discard_card(squire).is_some());
        assert_eq!(state.player(P0).kill_count, 1);
        let knight = state.board_card(knight).unwrap();
        assert_eq!(knight.damage, 1);
        assert!(knight.exhausted);
    }

    #[test]
    fn test_taunt_blocks_face_and_other_targets() {
        let (rules, mut state) = empty_match(0);
        let ogre = rules.put_on_board(&mut state, ids::OGRE, P0, 1).unwrap();
        let squire = rules.put_on_board(&mut state, ids::SQUIRE, P1, 1).unwrap();
        let guardian = rules.put_on_board(&mut state, ids::GUARDIAN, P1, 2).unwrap();

        let attacker = state.board_card(ogre).unwrap();
        assert!(!rules.can_attack_player(&state, attacker, P1));
        assert!(!rules.can_attack_card(&state, attacker, state.board_card(squire).unwrap()));
        assert!(rules.can_attack_card(&state, attacker, state.board_card(guardian).unwrap()));
    }

    #[test]
    fn test_armor_absorbs_damage() {
        let (mut rules, mut state) = empty_match(0);
        let knight = rules.put_on_board(&mut state, ids::KNIGHT, P0, 1).unwrap();
        let ogre = rules.put_on_board(&mut state, ids::OGRE, P1, 1).unwrap();
        state
            .active_card_mut(ogre)
            .unwrap()
            .add_status(CardStatus::new(StatusType::Armor, 2, 0));

        rules.apply_action(
            &mut state,
            P0,
            &AiAction::AttackCard {
                attacker: knight,
                target: ogre,
            },
        );
        assert_eq!(state.board_card(ogre).unwrap().damage, 1);
    }

    #[test]
    fn test_firebolt_hits_target() {
        let (mut rules, mut state) = empty_match(2);
        let bolt = rules.put_in_hand(&mut state, ids::FIREBOLT, P0).unwrap();
        let card = state.player(P0).hand_card(bolt).unwrap().clone();
        assert!(!rules.can_play_card(&state, &card, Placement::Free));
        assert!(!rules.is_play_target_valid(&state, &card, Target::Slot(Slot::new(1, P1))));

        rules.apply_action(
            &mut state,
            P0,
            &AiAction::PlayCard {
                card: bolt,
                placement: Placement::Target(Target::Player(P1)),
            },
        );
        assert_eq!(state.player(P1).hp, DEFAULT_PLAYER_HP - 3);
        assert!(state.player(P0).discard_card(bolt).is_some());
    }

    #[test]
    fn test_stunner_paralyses_enemy_board_for_a_turn() {
        let (mut rules, mut state) = empty_match(4);
        let enemy = rules.put_on_board(&mut state, ids::KNIGHT, P1, 1).unwrap();
        let stunner = rules.put_in_hand(&mut state, ids::STUNNER, P0).unwrap();
        rules.apply_action(
            &mut state,
            P0,
            &AiAction::PlayCard {
                card: stunner,
                placement: Placement::Slot(Slot::new(1, P0)),
            },
        );
        assert!(state.board_card(enemy).unwrap().has_status(StatusType::Paralysed));

        rules.end_turn(&mut state);
        assert!(!state.board_card(enemy).unwrap().can_attack());
        rules.end_turn(&mut state);
        assert!(!state.board_card(enemy).unwrap().has_status(StatusType::Paralysed));
    }

    #[test]
    fn test_select_target_resolves_prompt() {
        let (mut rules, mut state) = empty_match(2);
        let shaman = rules.put_on_board(&mut state, ids::SHAMAN, P0, 1).unwrap();
        rules.apply_action(
            &mut state,
            P0,
            &AiAction::CastAbility {
                card: shaman,
                ability: abilities::ZAP,
            },
        );
        assert_eq!(state.acting_player(), P0);
        assert!(state.has_selection());
        assert_eq!(state.player(P0).mana, 1);

        rules.apply_action(
            &mut state,
            P0,
            &AiAction::SelectPlayer {
                caster: shaman,
                target: P1,
            },
        );
        assert!(!state.has_selection());
        assert_eq!(state.player(P1).hp, DEFAULT_PLAYER_HP - 1);
    }

    #[test]
    fn test_choice_resolves_chained_ability() {
        let (mut rules, mut state) = empty_match(2);
        let mystic = rules.put_on_board(&mut state, ids::MYSTIC, P0, 1).unwrap();
        rules.apply_action(
            &mut state,
            P0,
            &AiAction::CastAbility {
                card: mystic,
                ability: abilities::ATTUNE,
            },
        );
        rules.apply_action(
            &mut state,
            P0,
            &AiAction::SelectChoice {
                caster: mystic,
                choice: 1,
            },
        );
        let card = state.board_card(mystic).unwrap();
        assert_eq!(card.status_value(StatusType::Armor), 1);
        assert_eq!(state.player(P0).mana, 1);
    }

    #[test]
    fn test_exhume_returns_creature() {
        let (mut rules, mut state) = empty_match(2);
        let digger = rules.put_on_board(&mut state, ids::GRAVEDIGGER, P0, 1).unwrap();
        let dead = rules.put_in_discard(&mut state, ids::OGRE, P0).unwrap();

        rules.apply_action(
            &mut state,
            P0,
            &AiAction::CastAbility {
                card: digger,
                ability: abilities::EXHUME,
            },
        );
        rules.apply_action(
            &mut state,
            P0,
            &AiAction::SelectCard {
                caster: digger,
                target: dead,
            },
        );
        assert!(state.player(P0).hand_card(dead).is_some());
        assert!(state.player(P0).discard_card(dead).is_none());
    }

    #[test]
    fn test_end_turn_refreshes_next_player() {
        let (mut rules, mut state) = DuelBuilder::new().build(3);
        let hand = state.player(P1).hand.len();
        rules.end_turn(&mut state);
        let p1 = state.player(P1);
        assert_eq!(state.current_player, P1);
        assert_eq!(state.turn, 2);
        assert_eq!(p1.mana_max, 1);
        assert_eq!(p1.mana, 1);
        assert_eq!(p1.hand.len(), hand + 1);
    }

    #[test]
    fn test_poison_ticks_at_owner_turn_end() {
        let (mut rules, mut state) = empty_match(0);
        let squire = rules.put_on_board(&mut state, ids::SQUIRE, P0, 1).unwrap();
        state
            .active_card_mut(squire)
            .unwrap()
            .add_status(CardStatus::new(StatusType::Poisoned, 1, 2));
        rules.end_turn(&mut state);
        assert_eq!(state.board_card(squire).unwrap().damage, 1);
        rules.end_turn(&mut state);
        rules.end_turn(&mut state);
        assert!(state.board_card(squire).is_none());
        assert_eq!(state.player(P1).kill_count, 1);
    }

    #[test]
    fn test_hero_power_needs_mana() {
        let (mut rules, mut state) = empty_match(1);
        let hero = rules.set_hero(&mut state, ids::WARLORD, P0).unwrap();
        let command = rules.registry().ability(abilities::COMMAND).unwrap().clone();
        let card = state.player(P0).hero.clone().unwrap();
        assert!(!rules.can_cast_ability(&state, &card, &command));

        state.player_mut(P0).mana = 2;
        assert!(rules.can_cast_ability(&state, &card, &command));
        rules.apply_action(
            &mut state,
            P0,
            &AiAction::CastAbility {
                card: hero,
                ability: abilities::COMMAND,
            },
        );
        assert_eq!(state.player(P1).hp, DEFAULT_PLAYER_HP - 1);
        assert!(state.player(P0).hero.as_ref().unwrap().exhausted);
    }
}
