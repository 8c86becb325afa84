//! Deck files (.json) and turning them into seated players
//!
//! A deck record carries the printed data of every card inline, so no card
//! database is needed:
//!
//! ```json
//! {
//!   "name": "Mono Green",
//!   "commander": "Omnath, Locus of Mana",
//!   "cards": [
//!     {"name": "Forest", "quantity": 36, "type_line": "Basic Land — Forest", "produced_mana": ["G"]},
//!     {"name": "Omnath, Locus of Mana", "mana_cost": "{2}{G}", "type_line": "Legendary Creature — Elemental",
//!      "power": "1", "toughness": "1"}
//!   ]
//! }
//! ```

use crate::core::{CardCategory, CardDefinition, CardIdAllocator, Color, ManaCost, Player, PlayerId};
use crate::{MtgError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Power and toughness arrive as numbers or as strings such as "2" or "*"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(i32),
    Text(String),
}

impl StatValue {
    /// Variable stats ("*", "1+*") count as 0
    pub fn base_value(&self) -> i32 {
        match self {
            StatValue::Number(n) => *n,
            StatValue::Text(text) => text.trim().parse().unwrap_or(0),
        }
    }
}

/// One line of a deck: a card and how many copies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCardEntry {
    pub name: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default)]
    pub mana_cost: String,

    #[serde(default)]
    pub type_line: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<StatValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<StatValue>,

    /// Mana symbols a land taps for, e.g. `["G"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produced_mana: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub oracle_text: String,
}

fn default_quantity() -> u32 {
    1
}

impl DeckCardEntry {
    /// Build the printed card this entry describes
    pub fn to_definition(&self) -> Result<CardDefinition> {
        if self.name.trim().is_empty() {
            return Err(MtgError::InvalidCardFormat("card without a name".to_string()));
        }

        let mut def = CardDefinition::new(
            self.name.clone(),
            self.type_line.clone(),
            ManaCost::from_string(&self.mana_cost),
        )
        .with_oracle_text(self.oracle_text.clone());

        for symbol in &self.produced_mana {
            let color = Color::from_symbol(symbol).ok_or_else(|| {
                MtgError::InvalidCardFormat(format!("{}: unknown mana symbol '{symbol}'", self.name))
            })?;
            def.produced_mana.push(color);
        }

        if def.category == CardCategory::Creature || self.power.is_some() || self.toughness.is_some() {
            let power = self.power.as_ref().map_or(0, StatValue::base_value);
            let toughness = self.toughness.as_ref().map_or(0, StatValue::base_value);
            def = def.with_stats(power, toughness);
        }

        Ok(def)
    }
}

/// A stored deck: name, commander and card list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDefinition {
    pub name: String,

    /// Name of the card that starts in the command zone, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commander: Option<String>,

    pub cards: Vec<DeckCardEntry>,
}

impl DeckDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        let deck: DeckDefinition = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Load a deck from a .json file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of physical cards, commander included
    pub fn total_cards(&self) -> usize {
        self.cards.iter().map(|entry| entry.quantity as usize).sum()
    }

    fn validate(&self) -> Result<()> {
        if self.total_cards() == 0 {
            return Err(MtgError::InvalidDeckFormat(format!("deck '{}' is empty", self.name)));
        }
        if let Some(commander) = &self.commander {
            let listed = self
                .cards
                .iter()
                .any(|entry| &entry.name == commander && entry.quantity > 0);
            if !listed {
                return Err(MtgError::InvalidDeckFormat(format!(
                    "commander '{commander}' is not in the card list of '{}'",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Expands deck definitions into card instances
///
/// Use one builder for both seats so card IDs never collide within a match.
#[derive(Debug, Default)]
pub struct DeckBuilder {
    ids: CardIdAllocator,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A player whose library holds the deck and whose command zone holds
    /// one copy of the commander
    ///
    /// The library is left in list order; `start_game` shuffles it.
    pub fn build_player(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
        deck: &DeckDefinition,
        starting_life: i32,
    ) -> Result<Player> {
        deck.validate()?;
        let mut player = Player::new(id, name, starting_life);

        for entry in &deck.cards {
            let def = Arc::new(entry.to_definition()?);
            let mut copies = entry.quantity;

            let is_commander = deck.commander.as_deref() == Some(entry.name.as_str());
            if is_commander && copies > 0 && player.zones.command.is_empty() {
                player.zones.command.add(def.instantiate(self.ids.next_id(), id));
                copies -= 1;
            }

            for _ in 0..copies {
                player.zones.library.add(def.instantiate(self.ids.next_id(), id));
            }
        }

        Ok(player)
    }
}
