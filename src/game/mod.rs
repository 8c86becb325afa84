//! Match state, turn structure and the controller that drives them

pub mod autopilot;
pub mod controller;
pub mod logger;
pub mod mana_manager;
pub mod phase;
pub mod rules;
pub mod snapshot;
pub mod state;

pub use autopilot::{Autopilot, AutopilotReport};
pub use controller::{MatchController, PlayOutcome};
pub use logger::{LogEntry, MatchLogger, OutputFormat, OutputMode, VerbosityLevel};
pub use mana_manager::ManaManager;
pub use phase::{GameClock, Phase, PhaseTransition};
pub use rules::RuleEngine;
pub use snapshot::{MatchSnapshot, SnapshotError};
pub use state::MatchState;
