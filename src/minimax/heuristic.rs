//! Static evaluation.
//!
//! Three scoring functions drive the search:
//!
//! - **State value** (`Heuristic::win_score`, `Heuristic::full_score`):
//!   how good a simulated state is for the searching player. Positive
//!   favours the AI, negative its opponent. Terminal states score beyond
//!   `±WIN_THRESHOLD`; everything else stays well inside it.
//! - **Action score** (`action_score`): how promising a single action looks,
//!   used only to cut a node's candidates down to its cap.
//! - **Sort key** (`sort_key`): the order actions must be taken in within a
//!   turn, so that "A then B" and "B then A" are not both explored.

use super::config::{AiConfig, HeuristicWeights};
use crate::cards::{Card, CardRegistry};
use crate::core::{AiAction, AiRng, MatchState, PlayerId, PlayerState};

/// Base value of a won or lost state.
pub const WIN_SCORE: i32 = 100_000;
/// Win value lost per turn it takes to get there.
pub const DEPTH_PENALTY: i32 = 1_000;
/// Values beyond this magnitude are decided.
pub const WIN_THRESHOLD: i32 = 50_000;

/// Check if a value means the game is already won or lost.
#[inline]
#[must_use]
pub fn is_decided(value: i32) -> bool {
    value > WIN_THRESHOLD || value < -WIN_THRESHOLD
}

/// State evaluator for one searching player.
#[derive(Clone, Debug)]
pub struct Heuristic {
    player: PlayerId,
    weights: HeuristicWeights,
    jitter: i32,
    rng: AiRng,
}

impl Heuristic {
    #[must_use]
    pub fn new(config: &AiConfig) -> Self {
        Self {
            player: config.player,
            weights: config.weights,
            jitter: config.difficulty.jitter(),
            rng: AiRng::new(config.seed),
        }
    }

    /// The player values are computed for.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Restart the jitter sequence.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Terminal score: 0 while both players live.
    ///
    /// Faster wins and slower losses score better. If both players are dead
    /// the win takes precedence.
    #[must_use]
    pub fn win_score(&self, state: &MatchState, turn_depth: u32) -> i32 {
        let offset = (turn_depth as i32).saturating_mul(DEPTH_PENALTY);
        let mut score = 0;
        if state.player(self.player).is_dead() {
            score = -WIN_SCORE + offset;
        }
        if state.player(self.player.opponent()).is_dead() {
            score = WIN_SCORE - offset;
        }
        score
    }

    /// Win score plus material, plus difficulty jitter.
    pub fn full_score(&mut self, state: &MatchState, registry: &CardRegistry, win_score: i32) -> i32 {
        let own = state.player(self.player);
        let opp = state.player(self.player.opponent());

        let mut score = win_score;
        score += self.side_score(own, registry);
        score -= self.side_score(opp, registry);
        score + self.rng.jitter(self.jitter)
    }

    /// Full evaluation from scratch.
    pub fn evaluate(&mut self, state: &MatchState, registry: &CardRegistry, turn_depth: u32) -> i32 {
        let win = self.win_score(state, turn_depth);
        self.full_score(state, registry, win)
    }

    fn side_score(&self, player: &PlayerState, registry: &CardRegistry) -> i32 {
        let w = &self.weights;
        let mut score = player.board.len() as i32 * w.board_card
            + player.hand.len() as i32 * w.hand_card
            + player.kill_count * w.kill
            + player.hp * w.player_hp;

        for card in player.board.iter() {
            score += card.attack * w.card_attack;
            score += card.current_hp() * w.card_hp;
            score += card
                .statuses
                .iter()
                .map(|s| registry.status_ai_value(s.status) * w.card_status)
                .sum::<i32>();
        }
        score
    }
}

/// Pruning score of an action; never negative.
///
/// Unknown cards or players score 0.
#[must_use]
pub fn action_score(state: &MatchState, action: &AiAction) -> i32 {
    raw_action_score(state, action).unwrap_or(0).max(0)
}

fn raw_action_score(state: &MatchState, action: &AiAction) -> Option<i32> {
    let score = match *action {
        AiAction::EndTurn | AiAction::CancelSelection => 0,
        AiAction::CastAbility { .. } => 200,
        AiAction::AttackCard { attacker, target } => {
            let card = state.card(attacker)?;
            let target = state.card(target)?;
            let lethal = if card.attack >= target.current_hp() { 300 } else { 100 };
            let counter = if target.attack >= card.current_hp() { -200 } else { 0 };
            lethal + counter + card.attack * 5 + target.attack * 5
        }
        AiAction::AttackPlayer { attacker, target } => {
            let card = state.card(attacker)?;
            let hp = state.player(target).hp;
            let lethal = if card.attack >= hp { 500 } else { 200 };
            lethal + card.attack * 10 - hp
        }
        AiAction::PlayCard { card, .. } => {
            let card = state.card(card)?;
            if card.kind.is_board_card() {
                let board = state.player(card.owner).board.len() as i32;
                200 + card.mana * 5 - 30 * board
            } else {
                200 + card.mana * 5
            }
        }
        AiAction::MoveCard { .. } => 150,
        AiAction::SelectCard { .. }
        | AiAction::SelectPlayer { .. }
        | AiAction::SelectSlot { .. }
        | AiAction::SelectChoice { .. } => 100,
    };
    Some(score)
}

/// Ordering bucket of an action within a turn.
fn type_bucket(action: &AiAction, card: &Card) -> i32 {
    match action {
        AiAction::PlayCard { .. } if card.kind.is_board_card() => 7,
        AiAction::PlayCard { .. } => 1,
        AiAction::CastAbility { .. } => 2,
        AiAction::MoveCard { .. } => 3,
        AiAction::AttackCard { .. } => 4,
        AiAction::AttackPlayer { .. } => 5,
        _ => 0,
    }
}

/// Turn ordering key.
///
/// 0 for end-turn and any action taken while a selection is open; those may
/// run in any order. Otherwise `bucket * 10000 + card * 100 + target + 1`,
/// where card and target are stable hashes reduced modulo 100.
#[must_use]
pub fn sort_key(state: &MatchState, action: &AiAction) -> i32 {
    if action.is_end_turn() || state.has_selection() {
        return 0;
    }
    let Some(card) = action.acting_card().and_then(|uid| state.card(uid)) else {
        return 0;
    };
    let card_sort = (card.uid.stable_hash() % 100) as i32;
    let target_sort = action
        .target_card()
        .map_or(0, |uid| (uid.stable_hash() % 100) as i32);
    type_bucket(action, card) * 10_000 + card_sort * 100 + target_sort + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardKind};
    use crate::core::{CardUid, Placement, Slot};

    fn creature(state: &mut MatchState, owner: PlayerId, attack: i32, hp: i32, x: u8) -> CardUid {
        let def = CardDefinition::new(CardId::new(1), "Unit", CardKind::Creature)
            .with_mana(attack)
            .with_stats(attack, hp);
        let mut card = state.create_card(&def, owner);
        card.slot = Some(Slot::new(x, owner));
        let uid = card.uid;
        state.player_mut(owner).board.push_back(card);
        uid
    }

    fn heuristic() -> Heuristic {
        Heuristic::new(&AiConfig::for_player(PlayerId::new(0)))
    }

    #[test]
    fn test_win_score() {
        let h = heuristic();
        let mut state = MatchState::default();
        assert_eq!(h.win_score(&state, 0), 0);

        state.player_mut(PlayerId::new(1)).hp = 0;
        assert_eq!(h.win_score(&state, 2), WIN_SCORE - 2 * DEPTH_PENALTY);

        let mut lost = MatchState::default();
        lost.player_mut(PlayerId::new(0)).hp = -3;
        assert_eq!(h.win_score(&lost, 2), -WIN_SCORE + 2 * DEPTH_PENALTY);
    }

    #[test]
    fn test_full_score_is_symmetric_material() {
        let mut h = heuristic();
        let registry = CardRegistry::new();
        let mut state = MatchState::default();
        assert_eq!(h.evaluate(&state, &registry, 0), 0);

        creature(&mut state, PlayerId::new(0), 2, 3, 1);
        // board 10 + attack 2*3 + hp 3*2
        assert_eq!(h.evaluate(&state, &registry, 0), 22);

        creature(&mut state, PlayerId::new(1), 2, 3, 1);
        assert_eq!(h.evaluate(&state, &registry, 0), 0);
    }

    #[test]
    fn test_decided() {
        assert!(is_decided(WIN_SCORE));
        assert!(is_decided(-WIN_SCORE + 3 * DEPTH_PENALTY));
        assert!(!is_decided(WIN_THRESHOLD));
        assert!(!is_decided(-200));
    }

    #[test]
    fn test_attack_scores() {
        let mut state = MatchState::default();
        let attacker = creature(&mut state, PlayerId::new(0), 5, 5, 1);
        let weak = creature(&mut state, PlayerId::new(1), 1, 1, 1);
        let tough = creature(&mut state, PlayerId::new(1), 6, 9, 2);

        let lethal = AiAction::AttackCard { attacker, target: weak };
        assert_eq!(action_score(&state, &lethal), 300 + 25 + 5);

        // not lethal, counter is lethal: 100 - 200 + 25 + 30
        let bad = AiAction::AttackCard { attacker, target: tough };
        assert_eq!(action_score(&state, &bad), 0);
    }

    #[test]
    fn test_play_card_penalises_full_board() {
        let mut state = MatchState::default();
        let p0 = PlayerId::new(0);
        let def = CardDefinition::new(CardId::new(9), "Ogre", CardKind::Creature)
            .with_mana(5)
            .with_stats(5, 5);
        let card = state.create_card(&def, p0);
        let uid = card.uid;
        state.player_mut(p0).hand.push_back(card);
        let play = AiAction::PlayCard {
            card: uid,
            placement: Placement::Slot(Slot::new(1, p0)),
        };
        assert_eq!(action_score(&state, &play), 225);

        creature(&mut state, p0, 1, 1, 2);
        creature(&mut state, p0, 1, 1, 3);
        assert_eq!(action_score(&state, &play), 165);
    }

    #[test]
    fn test_missing_card_scores_zero() {
        let state = MatchState::default();
        let action = AiAction::AttackPlayer {
            attacker: CardUid(77),
            target: PlayerId::new(1),
        };
        assert_eq!(action_score(&state, &action), 0);
        assert_eq!(sort_key(&state, &action), 0);
    }

    #[test]
    fn test_sort_buckets() {
        let mut state = MatchState::default();
        let attacker = creature(&mut state, PlayerId::new(0), 2, 2, 1);
        let defender = creature(&mut state, PlayerId::new(1), 2, 2, 1);

        let attack_card = sort_key(&state, &AiAction::AttackCard { attacker, target: defender });
        let attack_player = sort_key(
            &state,
            &AiAction::AttackPlayer {
                attacker,
                target: PlayerId::new(1),
            },
        );
        assert_eq!(attack_card / 10_000, 4);
        assert_eq!(attack_player / 10_000, 5);
        assert!(attack_card < attack_player);
        assert_eq!(sort_key(&state, &AiAction::EndTurn), 0);
    }

    #[test]
    fn test_play_bucket_follows_board_rule() {
        let mut state = MatchState::default();
        let p0 = PlayerId::new(0);
        let mut key = |kind: CardKind| {
            let def = CardDefinition::new(CardId::new(3), "Card", kind).with_mana(2);
            let card = state.create_card(&def, p0);
            let uid = card.uid;
            state.player_mut(p0).hand.push_back(card);
            let play = AiAction::PlayCard {
                card: uid,
                placement: Placement::Free,
            };
            (kind.is_board_card(), sort_key(&state, &play) / 10_000)
        };
        for kind in [CardKind::Creature, CardKind::Spell] {
            let (board, bucket) = key(kind);
            assert_eq!(bucket, if board { 7 } else { 1 });
        }
    }
}
