//! Turn phases and the game clock

use crate::core::PlayerId;
use crate::error::RuleViolation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five phases of a turn, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Untap and draw
    Beginning,
    FirstMain,
    Combat,
    SecondMain,
    Ending,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Beginning,
        Phase::FirstMain,
        Phase::Combat,
        Phase::SecondMain,
        Phase::Ending,
    ];

    /// Get the next phase in turn order, `None` after the ending phase
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Beginning => Some(Phase::FirstMain),
            Phase::FirstMain => Some(Phase::Combat),
            Phase::Combat => Some(Phase::SecondMain),
            Phase::SecondMain => Some(Phase::Ending),
            Phase::Ending => None,
        }
    }

    /// Lands and sorcery-speed spells are only allowed here
    pub fn is_main(&self) -> bool {
        matches!(self, Phase::FirstMain | Phase::SecondMain)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Beginning => "Beginning",
            Phase::FirstMain => "First Main",
            Phase::Combat => "Combat",
            Phase::SecondMain => "Second Main",
            Phase::Ending => "Ending",
        };
        write!(f, "{name}")
    }
}

/// What happened on one `GameClock::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Player whose phase just ended
    pub ending_player: PlayerId,
    /// Player who is active after the transition
    pub active_player: PlayerId,
    /// True when the ending phase wrapped into a new turn
    pub turn_changed: bool,
}

/// Tracks turn number, active player, priority and the current phase
///
/// The clock only knows which phase is current; automatic effects on
/// entering or leaving a phase are the controller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    /// Current turn number (starts at 1)
    pub turn_number: u32,

    pub current_phase: Phase,

    /// Active player (whose turn it is); `None` until the match starts
    pub active_player: Option<PlayerId>,

    /// Always the active player: there are no response windows
    pub priority_player: Option<PlayerId>,

    /// Who took the first turn, for the first-turn draw skip
    pub starting_player: Option<PlayerId>,
}

impl GameClock {
    pub fn new() -> Self {
        GameClock {
            turn_number: 1,
            current_phase: Phase::Beginning,
            active_player: None,
            priority_player: None,
            starting_player: None,
        }
    }

    /// Put the clock at turn 1, beginning phase, with `first` active
    pub fn start(&mut self, first: PlayerId) {
        self.turn_number = 1;
        self.current_phase = Phase::Beginning;
        self.active_player = Some(first);
        self.priority_player = Some(first);
        self.starting_player = Some(first);
    }

    /// Back to the un-started state
    pub fn reset(&mut self) {
        *self = GameClock::new();
    }

    pub fn is_started(&self) -> bool {
        self.active_player.is_some()
    }

    pub fn is_active(&self, player: PlayerId) -> bool {
        self.active_player == Some(player)
    }

    /// True during the first turn of the match, for the player who took it
    pub fn is_first_turn_for(&self, player: PlayerId) -> bool {
        self.turn_number == 1 && self.starting_player == Some(player)
    }

    /// Move to the next phase, wrapping into the next turn after `Ending`
    pub fn advance(&mut self) -> Result<PhaseTransition, RuleViolation> {
        let ending_player = self.active_player.ok_or(RuleViolation::GameNotStarted)?;
        let from = self.current_phase;

        let (to, turn_changed) = match from.next() {
            Some(next) => (next, false),
            None => (Phase::Beginning, true),
        };

        self.current_phase = to;
        if turn_changed {
            let next_player = ending_player.opponent();
            self.turn_number += 1;
            self.active_player = Some(next_player);
            self.priority_player = Some(next_player);
        }

        Ok(PhaseTransition {
            from,
            to,
            ending_player,
            active_player: self.active_player.unwrap_or(ending_player),
            turn_changed,
        })
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_progression() {
        let mut phase = Phase::Beginning;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            seen.push(next);
            phase = next;
        }
        assert_eq!(seen, Phase::ALL.to_vec());
    }

    #[test]
    fn test_main_phases() {
        assert!(Phase::FirstMain.is_main());
        assert!(Phase::SecondMain.is_main());
        assert!(!Phase::Beginning.is_main());
        assert!(!Phase::Combat.is_main());
        assert!(!Phase::Ending.is_main());
    }

    #[test]
    fn test_clock_requires_start() {
        let mut clock = GameClock::new();
        assert!(!clock.is_started());
        assert_eq!(clock.advance(), Err(RuleViolation::GameNotStarted));
        assert_eq!(clock.current_phase, Phase::Beginning);
    }

    #[test]
    fn test_turn_wraps_and_flips_active_player() {
        let mut clock = GameClock::new();
        clock.start(PlayerId::P2);

        assert_eq!(clock.turn_number, 1);
        assert!(clock.is_active(PlayerId::P2));
        assert!(clock.is_first_turn_for(PlayerId::P2));
        assert!(!clock.is_first_turn_for(PlayerId::P1));

        for expected in [Phase::FirstMain, Phase::Combat, Phase::SecondMain, Phase::Ending] {
            let t = clock.advance().unwrap();
            assert_eq!(t.to, expected);
            assert!(!t.turn_changed);
        }

        let t = clock.advance().unwrap();
        assert!(t.turn_changed);
        assert_eq!(t.from, Phase::Ending);
        assert_eq!(t.to, Phase::Beginning);
        assert_eq!(t.ending_player, PlayerId::P2);
        assert_eq!(t.active_player, PlayerId::P1);
        assert_eq!(clock.turn_number, 2);
        assert_eq!(clock.priority_player, Some(PlayerId::P1));
        assert!(!clock.is_first_turn_for(PlayerId::P2));
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = GameClock::new();
        clock.start(PlayerId::P1);
        clock.advance().unwrap();
        clock.reset();
        assert!(!clock.is_started());
        assert_eq!(clock.turn_number, 1);
        assert_eq!(clock.current_phase, Phase::Beginning);
    }
}
