//! Ability definitions.
//!
//! An ability is a list of effects plus the rules for when it fires and what
//! it hits. `Activate` abilities are cast explicitly by the player; `OnPlay`
//! abilities fire when their card is played. Abilities whose target is
//! `SelectTarget`, `CardSelector` or `ChoiceSelector` open a selection prompt
//! that the caster must resolve before anything else happens.

use serde::{Deserialize, Serialize};

use super::status::CardStatus;

/// Identifier of an ability definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbilityId(pub u16);

impl AbilityId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ability({})", self.0)
    }
}

/// When an ability fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTrigger {
    /// Cast by the player as an action.
    #[default]
    Activate,
    /// Fires when the card is played from hand.
    OnPlay,
}

/// What an ability's effects are applied to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTarget {
    /// No target; effects that need one do nothing.
    #[default]
    None,
    /// The card carrying the ability.
    Caster,
    /// The caster's owner.
    OwnerPlayer,
    /// The caster owner's opponent.
    OpponentPlayer,
    /// Every card on the opponent's board.
    EnemyBoard,
    /// Chosen when the spell is played.
    PlayTarget,
    /// Prompt: a card, player or empty slot on the board.
    SelectTarget,
    /// Prompt: a card from the caster owner's discard pile.
    CardSelector,
    /// Prompt: one of the chained abilities.
    ChoiceSelector,
}

impl AbilityTarget {
    /// Check if this target category opens a selection prompt.
    #[must_use]
    pub const fn is_selector(self) -> bool {
        matches!(
            self,
            AbilityTarget::SelectTarget | AbilityTarget::CardSelector | AbilityTarget::ChoiceSelector
        )
    }
}

/// Which kinds of target a chosen-target ability accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFilter {
    /// Cards or players.
    #[default]
    Characters,
    /// Board cards only.
    Cards,
    /// Players only.
    Players,
    /// Empty slots only.
    Slots,
}

/// A single effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Damage a card or player.
    Damage(i32),
    /// Restore hp to a card or player, capped at its maximum.
    Heal(i32),
    /// Permanently change a card's attack.
    AddAttack(i32),
    /// Permanently change a card's hp.
    AddHp(i32),
    /// Attach a status to a card.
    AddStatus(CardStatus),
    /// Target player draws cards.
    Draw(u8),
    /// Target player gains mana this turn.
    GainMana(i32),
    /// Move a card from the board or discard pile back to its owner's hand.
    ReturnToHand,
}

impl Effect {
    /// Sign of this effect for its target: 1 helps, -1 hurts, 0 neutral.
    ///
    /// Status effects are valued through the registry instead.
    #[must_use]
    pub fn ai_value(&self) -> i32 {
        match *self {
            Effect::Damage(_) => -1,
            Effect::Heal(_) | Effect::Draw(_) | Effect::GainMana(_) => 1,
            Effect::AddAttack(v) | Effect::AddHp(v) => v.signum(),
            Effect::AddStatus(_) | Effect::ReturnToHand => 0,
        }
    }
}

/// Static ability data.
///
/// ```
/// use ccg_ai::cards::{AbilityDefinition, AbilityId, AbilityTarget, Effect};
///
/// let zap = AbilityDefinition::new(AbilityId::new(1), "Zap")
///     .with_target(AbilityTarget::SelectTarget)
///     .with_mana_cost(1)
///     .with_effect(Effect::Damage(1));
///
/// assert!(zap.target.is_selector());
/// assert!(zap.exhaust);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub trigger: AbilityTrigger,
    pub target: AbilityTarget,
    pub filter: TargetFilter,
    /// Mana spent when cast.
    pub mana_cost: i32,
    /// Casting exhausts the caster.
    pub exhaust: bool,
    pub effects: Vec<Effect>,
    /// Options of a `ChoiceSelector`, or follow-ups fired after resolution.
    pub chain: Vec<AbilityId>,
}

impl AbilityDefinition {
    /// Create an activated ability with no effects.
    #[must_use]
    pub fn new(id: AbilityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            trigger: AbilityTrigger::Activate,
            target: AbilityTarget::None,
            filter: TargetFilter::default(),
            mana_cost: 0,
            exhaust: true,
            effects: Vec::new(),
            chain: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: AbilityTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: AbilityTarget) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_mana_cost(mut self, mana: i32) -> Self {
        self.mana_cost = mana;
        self
    }

    #[must_use]
    pub fn with_exhaust(mut self, exhaust: bool) -> Self {
        self.exhaust = exhaust;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_chain(mut self, ability: AbilityId) -> Self {
        self.chain.push(ability);
        self
    }
}
