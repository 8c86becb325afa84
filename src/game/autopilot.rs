//! Goldfish autopilot
//!
//! Plays both seats without an opponent model: in a main phase it plays the
//! first playable land, taps every untapped land, casts whatever is playable
//! from left to right, then moves on. Outside main phases it just advances.
//! It only uses the controller's public commands, so anything it does a UI
//! could do too.

use crate::core::PlayerId;
use crate::game::{MatchController, PlayOutcome};
use crate::Result;

/// What happened during one autopilot run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutopilotReport {
    pub turns_played: u32,
    pub lands_played: usize,
    pub spells_cast: usize,
    pub mana_produced: usize,
    pub phases_advanced: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Autopilot
    }

    /// Run until `turns` more turns have begun
    ///
    /// The match must already be started.
    pub fn play_turns(&self, ctrl: &mut MatchController, turns: u32) -> Result<AutopilotReport> {
        let mut report = AutopilotReport::default();
        while report.turns_played < turns {
            if ctrl.state().current_phase().is_main() {
                self.play_main_phase(ctrl, &mut report)?;
            }
            let transition = ctrl.advance_phase()?;
            report.phases_advanced += 1;
            if transition.turn_changed {
                report.turns_played += 1;
            }
        }
        Ok(report)
    }

    /// Take every action the active player has in the current main phase
    pub fn play_main_phase(&self, ctrl: &mut MatchController, report: &mut AutopilotReport) -> Result<()> {
        let Some(active) = ctrl.state().active_player_id() else {
            return Ok(());
        };

        if let Some(index) = Self::first_playable(ctrl, active, true) {
            if let PlayOutcome::LandPlayed { .. } = ctrl.play_card(active, index)? {
                report.lands_played += 1;
            }
        }

        report.mana_produced += Self::tap_all_lands(ctrl, active)?;

        while let Some(index) = Self::first_playable(ctrl, active, false) {
            ctrl.play_card(active, index)?;
            report.spells_cast += 1;
        }
        Ok(())
    }

    fn tap_all_lands(ctrl: &mut MatchController, player: PlayerId) -> Result<usize> {
        let lands = ctrl.state().player(player).zones.lands.len();

        let mut produced = 0;
        for index in 0..lands {
            if ctrl.produce_mana_from_land(player, index)?.is_some() {
                produced += 1;
            }
        }
        Ok(produced)
    }

    /// Index of the first hand card whose playable flag is set
    fn first_playable(ctrl: &MatchController, player: PlayerId, land: bool) -> Option<usize> {
        ctrl.state()
            .player(player)
            .hand()
            .iter()
            .position(|card| card.is_playable() && card.is_land() == land)
    }
}
