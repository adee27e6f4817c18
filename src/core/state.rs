//! Match state.
//!
//! ## PlayerState
//!
//! One seat: hit points, mana, kill count, hero and the four card piles.
//!
//! ## MatchState
//!
//! Both seats plus whose turn it is and any pending selection prompt.
//!
//! All piles are `im::Vector`s, so cloning a `MatchState` is O(1) and
//! structurally shares everything until one side is mutated. The search
//! clones a state for every action it explores.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::CardUid;
use super::player::{PlayerId, PlayerMap};
use super::slot::Slot;
use crate::cards::{AbilityId, Card, CardDefinition};

/// Starting and maximum hit points of a player.
pub const DEFAULT_PLAYER_HP: i32 = 20;
/// Mana ceiling.
pub const MANA_CAP: i32 = 10;

/// State of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub hp: i32,
    pub hp_max: i32,

    /// Mana available this turn.
    pub mana: i32,
    /// Mana refilled at turn start.
    pub mana_max: i32,

    /// Enemy cards destroyed by this player.
    pub kill_count: i32,

    pub hero: Option<Card>,
    pub hand: Vector<Card>,
    pub board: Vector<Card>,
    pub deck: Vector<Card>,
    pub discard: Vector<Card>,
}

impl PlayerState {
    #[must_use]
    pub fn new(id: PlayerId, hp: i32) -> Self {
        Self {
            id,
            hp,
            hp_max: hp,
            mana: 0,
            mana_max: 0,
            kill_count: 0,
            hero: None,
            hand: Vector::new(),
            board: Vector::new(),
            deck: Vector::new(),
            discard: Vector::new(),
        }
    }

    /// Check if the player has lost.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    #[must_use]
    pub fn hand_card(&self, uid: CardUid) -> Option<&Card> {
        self.hand.iter().find(|c| c.uid == uid)
    }

    #[must_use]
    pub fn board_card(&self, uid: CardUid) -> Option<&Card> {
        self.board.iter().find(|c| c.uid == uid)
    }

    #[must_use]
    pub fn discard_card(&self, uid: CardUid) -> Option<&Card> {
        self.discard.iter().find(|c| c.uid == uid)
    }

    /// Any card this player holds: hero, board, hand, discard or deck.
    #[must_use]
    pub fn card(&self, uid: CardUid) -> Option<&Card> {
        self.hero
            .as_ref()
            .filter(|h| h.uid == uid)
            .or_else(|| self.board_card(uid))
            .or_else(|| self.hand_card(uid))
            .or_else(|| self.discard_card(uid))
            .or_else(|| self.deck.iter().find(|c| c.uid == uid))
    }

    /// Mutable access to a board card or the hero.
    pub fn active_card_mut(&mut self, uid: CardUid) -> Option<&mut Card> {
        if self.hero.as_ref().is_some_and(|h| h.uid == uid) {
            return self.hero.as_mut();
        }
        let index = self.board.iter().position(|c| c.uid == uid)?;
        self.board.get_mut(index)
    }

    /// Card in one of this player's slots.
    #[must_use]
    pub fn slot_card(&self, slot: Slot) -> Option<&Card> {
        self.board.iter().find(|c| c.slot == Some(slot))
    }

    /// Free slots on this player's side, in column order.
    pub fn empty_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::all_for(self.id).filter(move |s| self.slot_card(*s).is_none())
    }

    /// Remove a card from the hand.
    pub fn take_hand_card(&mut self, uid: CardUid) -> Option<Card> {
        let index = self.hand.iter().position(|c| c.uid == uid)?;
        Some(self.hand.remove(index))
    }

    /// Remove a card from the board.
    pub fn take_board_card(&mut self, uid: CardUid) -> Option<Card> {
        let index = self.board.iter().position(|c| c.uid == uid)?;
        Some(self.board.remove(index))
    }

    /// Remove a card from the discard pile.
    pub fn take_discard_card(&mut self, uid: CardUid) -> Option<Card> {
        let index = self.discard.iter().position(|c| c.uid == uid)?;
        Some(self.discard.remove(index))
    }
}

/// An open selection prompt that must be answered before play continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingSelection {
    /// Player who must answer.
    pub player: PlayerId,
    /// Card whose ability opened the prompt.
    pub caster: CardUid,
    pub ability: AbilityId,
}

/// Complete state of a match.
///
/// ```
/// use ccg_ai::core::{MatchState, PlayerId};
///
/// let state = MatchState::default();
/// let snapshot = state.clone();
/// assert_eq!(state, snapshot);
/// assert_eq!(state.acting_player(), PlayerId::new(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub players: PlayerMap<PlayerState>,

    /// Player whose turn it is.
    pub current_player: PlayerId,

    /// Turn number (starts at 1).
    pub turn: u32,

    pub selection: Option<PendingSelection>,

    next_uid: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_HP)
    }
}

impl MatchState {
    /// Empty match with both players at `hp`.
    #[must_use]
    pub fn new(hp: i32) -> Self {
        Self {
            players: PlayerMap::new(|id| PlayerState::new(id, hp)),
            current_player: PlayerId::new(0),
            turn: 1,
            selection: None,
            next_uid: 1,
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id]
    }

    /// Player expected to act next: the selector if a prompt is open,
    /// otherwise the player whose turn it is.
    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.selection.map_or(self.current_player, |s| s.player)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// Allocate a fresh card UID.
    pub fn alloc_uid(&mut self) -> CardUid {
        let uid = CardUid::new(self.next_uid);
        self.next_uid += 1;
        uid
    }

    /// Instantiate a definition for a player.
    pub fn create_card(&mut self, def: &CardDefinition, owner: PlayerId) -> Card {
        let uid = self.alloc_uid();
        Card::new(uid, def, owner)
    }

    /// Find a card anywhere in the match.
    #[must_use]
    pub fn card(&self, uid: CardUid) -> Option<&Card> {
        self.players.iter().find_map(|(_, p)| p.card(uid))
    }

    /// Find a card on either board.
    #[must_use]
    pub fn board_card(&self, uid: CardUid) -> Option<&Card> {
        self.players.iter().find_map(|(_, p)| p.board_card(uid))
    }

    /// Card currently in a slot.
    #[must_use]
    pub fn slot_card(&self, slot: Slot) -> Option<&Card> {
        self.players.get(slot.player).slot_card(slot)
    }

    /// Mutable access to a board card or hero of either player.
    pub fn active_card_mut(&mut self, uid: CardUid) -> Option<&mut Card> {
        let owner = self
            .players
            .iter()
            .find(|(_, p)| p.hero.as_ref().is_some_and(|h| h.uid == uid) || p.board_card(uid).is_some())
            .map(|(id, _)| id)?;
        self.players[owner].active_card_mut(uid)
    }

    /// Seat that holds a card, wherever it is.
    #[must_use]
    pub fn owner_of(&self, uid: CardUid) -> Option<PlayerId> {
        self.card(uid).map(|c| c.owner)
    }

    /// Check if either player has lost.
    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.players.iter().any(|(_, p)| p.is_dead())
    }

    /// The surviving player once the match has ended.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let dead: Vec<_> = self
            .players
            .iter()
            .filter(|(_, p)| p.is_dead())
            .map(|(id, _)| id)
            .collect();
        match dead.as_slice() {
            [loser] => Some(loser.opponent()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardKind};

    fn squire() -> CardDefinition {
        CardDefinition::new(CardId::new(1), "Squire", CardKind::Creature)
            .with_mana(1)
            .with_stats(1, 2)
    }

    fn state_with_board() -> (MatchState, CardUid) {
        let mut state = MatchState::default();
        let p0 = PlayerId::new(0);
        let mut card = state.create_card(&squire(), p0);
        card.slot = Some(Slot::new(2, p0));
        let uid = card.uid;
        state.player_mut(p0).board.push_back(card);
        (state, uid)
    }

    #[test]
    fn test_new_state() {
        let state = MatchState::new(15);
        assert_eq!(state.turn, 1);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.player(PlayerId::new(1)).hp, 15);
        assert!(!state.has_ended());
    }

    #[test]
    fn test_alloc_uid_is_unique() {
        let mut state = MatchState::default();
        let a = state.alloc_uid();
        let b = state.alloc_uid();
        assert_ne!(a, b);
    }

    #[test]
    fn test_card_lookup() {
        let (state, uid) = state_with_board();
        assert!(state.board_card(uid).is_some());
        assert_eq!(state.owner_of(uid), Some(PlayerId::new(0)));
        assert_eq!(state.slot_card(Slot::new(2, PlayerId::new(0))).map(|c| c.uid), Some(uid));
        assert!(state.card(CardUid(999)).is_none());
    }

    #[test]
    fn test_empty_slots_skip_occupied() {
        let (state, _) = state_with_board();
        let empty: Vec<_> = state.player(PlayerId::new(0)).empty_slots().collect();
        assert_eq!(empty.len(), 4);
        assert!(!empty.contains(&Slot::new(2, PlayerId::new(0))));
    }

    #[test]
    fn test_clone_is_independent() {
        let (state, uid) = state_with_board();
        let mut copy = state.clone();
        copy.active_card_mut(uid).unwrap().damage = 1;

        assert_eq!(state.board_card(uid).unwrap().damage, 0);
        assert_eq!(copy.board_card(uid).unwrap().damage, 1);
    }

    #[test]
    fn test_acting_player_follows_selection() {
        let (mut state, uid) = state_with_board();
        state.selection = Some(PendingSelection {
            player: PlayerId::new(1),
            caster: uid,
            ability: AbilityId::new(1),
        });
        assert_eq!(state.acting_player(), PlayerId::new(1));
    }

    #[test]
    fn test_winner() {
        let mut state = MatchState::default();
        assert_eq!(state.winner(), None);
        state.player_mut(PlayerId::new(1)).hp = 0;
        assert!(state.has_ended());
        assert_eq!(state.winner(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_take_cards() {
        let (mut state, uid) = state_with_board();
        let p0 = PlayerId::new(0);
        let card = state.player_mut(p0).take_board_card(uid).unwrap();
        assert_eq!(card.uid, uid);
        assert!(state.board_card(uid).is_none());
        assert!(state.player_mut(p0).take_board_card(uid).is_none());
    }
}
