//! Legality predicates
//!
//! Every check here is read-only. A check returns `Ok(())` when the action is
//! allowed and the `RuleViolation` explaining the refusal otherwise, and
//! gives the same answer however often it is asked between mutations.

use crate::core::{Card, CardCategory, PlayerId};
use crate::error::{RuleCheck, RuleViolation};
use crate::game::{MatchState, Phase};

pub struct RuleEngine;

impl RuleEngine {
    /// One land per turn, on your own turn, in a main phase
    pub fn can_play_land(state: &MatchState, player_id: PlayerId, card: &Card) -> RuleCheck {
        Self::require_active(state, player_id)?;
        Self::require_main_phase(state, "play a land")?;

        let player = state.player(player_id);
        if !player.can_play_land() {
            return Err(RuleViolation::LandLimitReached {
                limit: player.max_lands_per_turn,
            });
        }

        if !card.is_land() {
            return Err(RuleViolation::NotALand {
                card: card.name().to_string(),
            });
        }

        Ok(())
    }

    /// Sorcery speed, and the pool must cover the cost
    ///
    /// Payment is simulated on a copy of the pool with the same algorithm
    /// `ManaManager::pay` uses.
    pub fn can_cast(state: &MatchState, player_id: PlayerId, card: &Card) -> RuleCheck {
        Self::require_active(state, player_id)?;
        Self::require_main_phase(state, "cast a spell")?;

        state
            .player(player_id)
            .mana_pool
            .try_pay(card.mana_cost())
            .map(|_| ())
    }

    /// Untapped creature, on your turn, in the combat phase
    ///
    /// The base rule only asks for the combat phase and an untapped card;
    /// the other refusals below are stricter than that.
    pub fn can_attack(state: &MatchState, player_id: PlayerId, creature: &Card) -> RuleCheck {
        if !state.is_started() {
            return Err(RuleViolation::GameNotStarted);
        }
        if state.current_phase() != Phase::Combat {
            return Err(RuleViolation::WrongPhase {
                phase: state.current_phase(),
                action: "attack",
            });
        }
        Self::require_active(state, player_id)?;

        if !creature.is_creature() {
            return Err(RuleViolation::NotACreature {
                card: creature.name().to_string(),
            });
        }
        if creature.is_tapped() {
            return Err(RuleViolation::AlreadyTapped {
                card: creature.name().to_string(),
            });
        }

        Ok(())
    }

    /// The check that applies to playing `card` from hand
    pub fn can_play(state: &MatchState, player_id: PlayerId, card: &Card) -> RuleCheck {
        match card.category() {
            CardCategory::Land => Self::can_play_land(state, player_id, card),
            _ => Self::can_cast(state, player_id, card),
        }
    }

    fn require_active(state: &MatchState, player_id: PlayerId) -> RuleCheck {
        match state.active_player_id() {
            None => Err(RuleViolation::GameNotStarted),
            Some(active) if active != player_id => Err(RuleViolation::WrongTurn { player: player_id }),
            Some(_) => Ok(()),
        }
    }

    fn require_main_phase(state: &MatchState, action: &'static str) -> RuleCheck {
        let phase = state.current_phase();
        if phase.is_main() {
            Ok(())
        } else {
            Err(RuleViolation::WrongPhase { phase, action })
        }
    }
}
