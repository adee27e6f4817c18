//! Player actions.
//!
//! `AiAction` is a closed enum: each variant carries exactly the references
//! that kind of move needs, so an attack without a target or a selection
//! without a caster cannot be built.

use serde::{Deserialize, Serialize};

use super::entity::CardUid;
use super::player::PlayerId;
use super::slot::Slot;
use crate::cards::AbilityId;

/// Something an effect or a selection can point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A player.
    Player(PlayerId),
    /// A card instance.
    Card(CardUid),
    /// An empty board slot.
    Slot(Slot),
}

impl Target {
    /// Seat that owns the target. Cards need the match state to answer.
    #[must_use]
    pub fn side(self) -> Option<PlayerId> {
        match self {
            Target::Player(p) => Some(p),
            Target::Slot(s) => Some(s.player),
            Target::Card(_) => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Player(p) => write!(f, "{}", p),
            Target::Card(c) => write!(f, "card {}", c),
            Target::Slot(s) => write!(f, "slot {}", s),
        }
    }
}

/// Where a card from hand goes when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// Untargeted spell.
    Free,
    /// Board card into a slot.
    Slot(Slot),
    /// Targeted spell.
    Target(Target),
}

/// Discriminant of an `AiAction`, for cheap membership checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    EndTurn,
    CancelSelection,
    PlayCard,
    MoveCard,
    AttackCard,
    AttackPlayer,
    CastAbility,
    SelectCard,
    SelectPlayer,
    SelectSlot,
    SelectChoice,
}

/// One fully-specified move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiAction {
    /// Pass the turn to the opponent.
    #[default]
    EndTurn,
    /// Dismiss the pending selection prompt.
    CancelSelection,
    /// Play a card from hand.
    PlayCard { card: CardUid, placement: Placement },
    /// Move a board card to another slot on its side.
    MoveCard { card: CardUid, slot: Slot },
    /// Attack an enemy board card.
    AttackCard { attacker: CardUid, target: CardUid },
    /// Attack an enemy player directly.
    AttackPlayer { attacker: CardUid, target: PlayerId },
    /// Activate an ability of a board card or hero.
    CastAbility { card: CardUid, ability: AbilityId },
    /// Answer a prompt with a card.
    SelectCard { caster: CardUid, target: CardUid },
    /// Answer a prompt with a player.
    SelectPlayer { caster: CardUid, target: PlayerId },
    /// Answer a prompt with an empty slot.
    SelectSlot { caster: CardUid, slot: Slot },
    /// Answer a prompt with one of the chained choices.
    SelectChoice { caster: CardUid, choice: u8 },
}

impl AiAction {
    /// Discriminant of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            AiAction::EndTurn => ActionKind::EndTurn,
            AiAction::CancelSelection => ActionKind::CancelSelection,
            AiAction::PlayCard { .. } => ActionKind::PlayCard,
            AiAction::MoveCard { .. } => ActionKind::MoveCard,
            AiAction::AttackCard { .. } => ActionKind::AttackCard,
            AiAction::AttackPlayer { .. } => ActionKind::AttackPlayer,
            AiAction::CastAbility { .. } => ActionKind::CastAbility,
            AiAction::SelectCard { .. } => ActionKind::SelectCard,
            AiAction::SelectPlayer { .. } => ActionKind::SelectPlayer,
            AiAction::SelectSlot { .. } => ActionKind::SelectSlot,
            AiAction::SelectChoice { .. } => ActionKind::SelectChoice,
        }
    }

    /// Check if this action ends the turn.
    #[must_use]
    pub fn is_end_turn(&self) -> bool {
        matches!(self, AiAction::EndTurn)
    }

    /// The card performing the action, if any.
    #[must_use]
    pub fn acting_card(&self) -> Option<CardUid> {
        match *self {
            AiAction::EndTurn | AiAction::CancelSelection => None,
            AiAction::PlayCard { card, .. }
            | AiAction::MoveCard { card, .. }
            | AiAction::CastAbility { card, .. } => Some(card),
            AiAction::AttackCard { attacker, .. } | AiAction::AttackPlayer { attacker, .. } => {
                Some(attacker)
            }
            AiAction::SelectCard { caster, .. }
            | AiAction::SelectPlayer { caster, .. }
            | AiAction::SelectSlot { caster, .. }
            | AiAction::SelectChoice { caster, .. } => Some(caster),
        }
    }

    /// The card on the receiving end, if any.
    #[must_use]
    pub fn target_card(&self) -> Option<CardUid> {
        match *self {
            AiAction::AttackCard { target, .. } | AiAction::SelectCard { target, .. } => {
                Some(target)
            }
            AiAction::PlayCard {
                placement: Placement::Target(Target::Card(target)),
                ..
            } => Some(target),
            _ => None,
        }
    }
}

impl std::fmt::Display for AiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiAction::EndTurn => write!(f, "end turn"),
            AiAction::CancelSelection => write!(f, "cancel selection"),
            AiAction::PlayCard { card, placement } => match placement {
                Placement::Free => write!(f, "play card {}", card),
                Placement::Slot(slot) => write!(f, "play card {} slot {}", card, slot),
                Placement::Target(target) => write!(f, "play card {} target {}", card, target),
            },
            AiAction::MoveCard { card, slot } => write!(f, "move card {} slot {}", card, slot),
            AiAction::AttackCard { attacker, target } => {
                write!(f, "attack card {} target {}", attacker, target)
            }
            AiAction::AttackPlayer { attacker, target } => {
                write!(f, "attack player card {} target {}", attacker, target)
            }
            AiAction::CastAbility { card, ability } => {
                write!(f, "cast ability card {} ability {}", card, ability)
            }
            AiAction::SelectCard { caster, target } => {
                write!(f, "select card {} target {}", caster, target)
            }
            AiAction::SelectPlayer { caster, target } => {
                write!(f, "select player {} target {}", caster, target)
            }
            AiAction::SelectSlot { caster, slot } => {
                write!(f, "select slot {} slot {}", caster, slot)
            }
            AiAction::SelectChoice { caster, choice } => {
                write!(f, "select choice {} value {}", caster, choice)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_end_turn() {
        assert_eq!(AiAction::default(), AiAction::EndTurn);
        assert!(AiAction::default().is_end_turn());
    }

    #[test]
    fn test_acting_and_target_cards() {
        let attack = AiAction::AttackCard {
            attacker: CardUid(3),
            target: CardUid(8),
        };
        assert_eq!(attack.kind(), ActionKind::AttackCard);
        assert_eq!(attack.acting_card(), Some(CardUid(3)));
        assert_eq!(attack.target_card(), Some(CardUid(8)));

        let spell = AiAction::PlayCard {
            card: CardUid(5),
            placement: Placement::Target(Target::Player(PlayerId::new(1))),
        };
        assert_eq!(spell.acting_card(), Some(CardUid(5)));
        assert_eq!(spell.target_card(), None);

        assert_eq!(AiAction::EndTurn.acting_card(), None);
    }

    #[test]
    fn test_target_side() {
        assert_eq!(Target::Player(PlayerId::new(1)).side(), Some(PlayerId::new(1)));
        assert_eq!(
            Target::Slot(Slot::new(2, PlayerId::new(0))).side(),
            Some(PlayerId::new(0))
        );
        assert_eq!(Target::Card(CardUid(1)).side(), None);
    }

    #[test]
    fn test_display() {
        let action = AiAction::PlayCard {
            card: CardUid(4),
            placement: Placement::Slot(Slot::new(2, PlayerId::new(1))),
        };
        assert_eq!(format!("{}", action), "play card #4 slot 2-1");
        assert_eq!(format!("{}", AiAction::EndTurn), "end turn");
    }

    #[test]
    fn test_action_serialization() {
        let action = AiAction::CastAbility {
            card: CardUid(2),
            ability: AbilityId::new(9),
        };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: AiAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
