//! MTG Commander - a two-player Commander rules core
//!
//! Cards, zones, mana and turn structure for a simplified Commander match,
//! driven through a single `MatchController` that validates every command
//! with the `RuleEngine` before applying it.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod zones;

pub use config::MatchConfig;
pub use error::{MtgError, Result, RuleCheck, RuleViolation};
