//! Error types for the Commander engine

use crate::core::{CardId, Color, PlayerId};
use crate::game::Phase;
use crate::zones::ZoneKind;
use thiserror::Error;

/// Why a proposed action was refused by the rule engine
///
/// These are expected, recoverable outcomes. A refused action never mutates
/// the match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("the match has not started yet")]
    GameNotStarted,

    #[error("not your turn: {player} is not the active player")]
    WrongTurn { player: PlayerId },

    #[error("cannot {action} during the {phase} phase")]
    WrongPhase { phase: Phase, action: &'static str },

    #[error("land limit reached: already played {limit} land(s) this turn")]
    LandLimitReached { limit: u8 },

    #[error("{card} is not a land")]
    NotALand { card: String },

    #[error("{card} is a land and cannot be cast")]
    NotASpell { card: String },

    #[error("{card} is not a creature")]
    NotACreature { card: String },

    #[error("{card} is already tapped")]
    AlreadyTapped { card: String },

    /// `color` is `None` when the shortfall is in the generic part of the cost
    #[error("insufficient {} mana: short by {shortfall}", mana_label(.color))]
    InsufficientMana { color: Option<Color>, shortfall: u8 },
}

fn mana_label(color: &Option<Color>) -> &'static str {
    match color {
        Some(color) => color.name(),
        None => "generic",
    }
}

/// Outcome of a legality predicate: `Ok(())` when allowed, the reason otherwise
pub type RuleCheck = std::result::Result<(), RuleViolation>;

#[derive(Error, Debug)]
pub enum MtgError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Index {index} out of range for {zone} of {player} (len {len})")]
    IndexOutOfRange {
        player: PlayerId,
        zone: ZoneKind,
        index: usize,
        len: usize,
    },

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MtgError {
    /// The rule refusal carried by this error, if that is what it is
    pub fn rule_violation(&self) -> Option<&RuleViolation> {
        match self {
            MtgError::Rule(violation) => Some(violation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MtgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_mana_messages() {
        let colored = RuleViolation::InsufficientMana {
            color: Some(Color::Green),
            shortfall: 2,
        };
        assert_eq!(colored.to_string(), "insufficient green mana: short by 2");

        let generic = RuleViolation::InsufficientMana {
            color: None,
            shortfall: 1,
        };
        assert_eq!(generic.to_string(), "insufficient generic mana: short by 1");
    }

    #[test]
    fn test_rule_violation_converts_into_error() {
        let err: MtgError = RuleViolation::LandLimitReached { limit: 1 }.into();
        assert_eq!(
            err.rule_violation(),
            Some(&RuleViolation::LandLimitReached { limit: 1 })
        );
        assert!(err.to_string().contains("land limit"));
    }
}
