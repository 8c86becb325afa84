//! Match snapshots for stop-and-resume play
//!
//! A snapshot is the whole read model (`MatchState`, RNG included) plus the
//! config it was played under, written as pretty JSON. Resuming from one
//! continues with exactly the shuffles the saved match would have seen.

use crate::config::MatchConfig;
use crate::game::{MatchController, MatchState, Phase};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_state: MatchState,

    pub config: MatchConfig,

    /// Turn number when the snapshot was taken
    pub turn_number: u32,

    pub phase: Phase,
}

impl MatchSnapshot {
    pub fn new(match_state: MatchState, config: MatchConfig) -> Self {
        let turn_number = match_state.turn_number();
        let phase = match_state.current_phase();
        MatchSnapshot {
            match_state,
            config,
            turn_number,
            phase,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: MatchSnapshot =
            serde_json::from_str(json).map_err(|e| SnapshotError::Deserialization(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).map_err(|e| SnapshotError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| SnapshotError::Io(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Rebuild a controller that carries on from this snapshot
    pub fn resume(self) -> MatchController {
        MatchController::from_parts(self.match_state, self.config)
    }

    /// The header fields must agree with the state they describe
    fn validate(&self) -> Result<(), SnapshotError> {
        if self.turn_number != self.match_state.turn_number() || self.phase != self.match_state.current_phase() {
            return Err(SnapshotError::InvalidState(format!(
                "header says turn {} {} but the match is at turn {} {}",
                self.turn_number,
                self.phase,
                self.match_state.turn_number(),
                self.match_state.current_phase()
            )));
        }
        Ok(())
    }
}

/// Errors that can occur during snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(String),

    #[error("Failed to deserialize snapshot: {0}")]
    Deserialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid snapshot state: {0}")]
    InvalidState(String),
}
