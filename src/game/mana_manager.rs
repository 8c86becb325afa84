//! Producing and spending mana
//!
//! No legality logic lives here: callers ask the `RuleEngine` first.

use crate::core::{Card, Color, ManaCost, ManaPool};
use crate::{MtgError, Result};

pub struct ManaManager;

impl ManaManager {
    /// Add one mana from an untapped land to the pool
    ///
    /// Uses the first color the land lists (colorless when it lists none).
    /// Returns `None` without touching the pool when the card is not a land
    /// or is already tapped. Tapping the land is the caller's job.
    pub fn produce(pool: &mut ManaPool, land: &Card) -> Option<Color> {
        if !land.is_land() || land.is_tapped() {
            return None;
        }
        let color = land.produced_mana().first().copied().unwrap_or(Color::Colorless);
        pool.add_color(color);
        Some(color)
    }

    /// Deduct a cost from the pool
    ///
    /// Colored requirements first, then generic from colorless and WUBRG in
    /// that order. Calling this for a cost the rule engine has not approved
    /// is a caller bug and is reported as `InvalidAction`; the pool is left
    /// untouched in that case.
    pub fn pay(pool: &mut ManaPool, cost: &ManaCost) -> Result<()> {
        pool.pay_cost(cost).map_err(|violation| {
            MtgError::InvalidAction(format!("paid {cost} without a legality check: {violation}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardDefinition, CardId, PlayerId};
    use std::sync::Arc;

    fn card(def: CardDefinition) -> Card {
        Arc::new(def).instantiate(CardId::new(1), PlayerId::P1)
    }

    #[test]
    fn test_produce_uses_first_listed_color() {
        let mut pool = ManaPool::new();
        let land = card(CardDefinition::land("Savannah", &[Color::Green, Color::White]));

        assert_eq!(ManaManager::produce(&mut pool, &land), Some(Color::Green));
        assert_eq!(pool.green, 1);
        assert_eq!(pool.white, 0);
    }

    #[test]
    fn test_produce_defaults_to_colorless() {
        let mut pool = ManaPool::new();
        let land = card(CardDefinition::land("Wastes", &[]));

        assert_eq!(ManaManager::produce(&mut pool, &land), Some(Color::Colorless));
        assert_eq!(pool.colorless, 1);
    }

    #[test]
    fn test_produce_ignores_tapped_lands_and_non_lands() {
        let mut pool = ManaPool::new();
        let mut land = card(CardDefinition::land("Forest", &[Color::Green]));
        land.tap();
        assert_eq!(ManaManager::produce(&mut pool, &land), None);

        let bear = card(CardDefinition::creature("Grizzly Bears", "1G", 2, 2));
        assert_eq!(ManaManager::produce(&mut pool, &bear), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pay_conserves_mana() {
        let mut pool = ManaPool::new();
        for color in [Color::Green, Color::Green, Color::Colorless, Color::Red] {
            pool.add_color(color);
        }
        let cost = ManaCost::from_string("2G");

        let before = pool.total();
        ManaManager::pay(&mut pool, &cost).unwrap();
        assert_eq!(before - pool.total(), cost.cmc());
        // Generic 2: colorless first, then red (the only color left besides the green)
        assert_eq!(pool.colorless, 0);
        assert_eq!(pool.green, 1);
        assert_eq!(pool.red, 0);
    }

    #[test]
    fn test_pay_without_mana_is_contract_error() {
        let mut pool = ManaPool::new();
        pool.add_color(Color::Blue);

        let err = ManaManager::pay(&mut pool, &ManaCost::from_string("3")).unwrap_err();
        assert!(matches!(err, MtgError::InvalidAction(_)));
        assert_eq!(pool.blue, 1);
    }
}
