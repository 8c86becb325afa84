//! Match configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes: `{"starting_life": 20}` is a complete config.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Commander defaults: 40 life, 7-card opening hand, one land per turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub starting_life: i32,
    pub opening_hand_size: usize,
    pub max_lands_per_turn: u8,
    /// Shuffle seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            starting_life: 40,
            opening_hand_size: 7,
            max_lands_per_turn: 1,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.starting_life, 40);
        assert_eq!(config.opening_hand_size, 7);
        assert_eq!(config.max_lands_per_turn, 1);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MatchConfig::from_json(r#"{"starting_life": 20, "seed": 7}"#).unwrap();
        assert_eq!(config.starting_life, 20);
        assert_eq!(config.opening_hand_size, 7);
        assert_eq!(config.resolve_seed(), 7);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(MatchConfig::from_json("{starting_life: }").is_err());
    }
}
