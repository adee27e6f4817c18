//! Status effects.
//!
//! A status is a tag attached to a card instance, optionally with a value
//! (armor points, poison damage) and a duration in turns. Each status type
//! has a definition in the registry carrying the value the evaluator assigns
//! to it: positive for statuses that help their holder, negative for ones
//! that hurt.

use serde::{Deserialize, Serialize};

/// Kind of status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusType {
    /// Enemy attackers must target this card first.
    Taunt,
    /// Incoming damage reduced by the status value.
    Armor,
    /// Cannot be attacked or targeted until it acts.
    Stealth,
    /// Cannot act.
    Paralysed,
    /// Loses the status value in hp at the end of its owner's turn.
    Poisoned,
}

impl StatusType {
    /// Check if the status hurts its holder.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, StatusType::Paralysed | StatusType::Poisoned)
    }
}

/// A status applied to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardStatus {
    pub status: StatusType,
    /// Magnitude; meaning depends on the status.
    pub value: u8,
    /// Remaining turns, 0 for permanent.
    pub duration: u8,
}

impl CardStatus {
    /// Create a status.
    #[must_use]
    pub const fn new(status: StatusType, value: u8, duration: u8) -> Self {
        Self {
            status,
            value,
            duration,
        }
    }

    /// Permanent status with no value.
    #[must_use]
    pub const fn permanent(status: StatusType) -> Self {
        Self::new(status, 0, 0)
    }

    /// Count one turn down. Returns `true` when the status expires.
    pub fn tick(&mut self) -> bool {
        match self.duration {
            0 => false,
            1 => {
                self.duration = 0;
                true
            }
            _ => {
                self.duration -= 1;
                false
            }
        }
    }
}

/// Static data for a status type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    pub status: StatusType,
    pub name: String,
    /// Evaluation weight of holding this status, signed.
    pub ai_value: i32,
}

impl StatusDefinition {
    #[must_use]
    pub fn new(status: StatusType, name: impl Into<String>, ai_value: i32) -> Self {
        Self {
            status,
            name: name.into(),
            ai_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity() {
        assert!(StatusType::Paralysed.is_negative());
        assert!(StatusType::Poisoned.is_negative());
        assert!(!StatusType::Taunt.is_negative());
        assert!(!StatusType::Armor.is_negative());
    }

    #[test]
    fn test_tick() {
        let mut timed = CardStatus::new(StatusType::Paralysed, 0, 2);
        assert!(!timed.tick());
        assert!(timed.tick());

        let mut permanent = CardStatus::permanent(StatusType::Taunt);
        for _ in 0..5 {
            assert!(!permanent.tick());
        }
    }
}
