//! Card types and definitions

use crate::core::{CardId, Color, ManaCost, PlayerId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Rules category of a card, decided once from its type line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Land,
    Creature,
    /// Artifacts, enchantments, planeswalkers and other non-creature permanents
    OtherPermanent,
    Instant,
    Sorcery,
}

impl CardCategory {
    /// Classify a printed type line such as "Legendary Creature — Elf Druid"
    ///
    /// Land wins over everything else (artifact lands are lands), then
    /// creature (artifact creatures are creatures).
    pub fn from_type_line(type_line: &str) -> Self {
        let lower = type_line.to_ascii_lowercase();
        let front = lower.split('—').next().unwrap_or("");
        let has = |word: &str| front.split_whitespace().any(|w| w == word);

        if has("land") {
            CardCategory::Land
        } else if has("creature") {
            CardCategory::Creature
        } else if has("instant") {
            CardCategory::Instant
        } else if has("sorcery") {
            CardCategory::Sorcery
        } else {
            CardCategory::OtherPermanent
        }
    }
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardCategory::Land => "Land",
            CardCategory::Creature => "Creature",
            CardCategory::OtherPermanent => "Permanent",
            CardCategory::Instant => "Instant",
            CardCategory::Sorcery => "Sorcery",
        };
        write!(f, "{name}")
    }
}

/// Kinds of counters a card can carry
///
/// Serialized as its printed name ("+1/+1", "loyalty", ...) so counter maps
/// stay valid JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CounterKind {
    PlusOnePlusOne,
    MinusOneMinusOne,
    Loyalty,
    Charge,
    Other(String),
}

impl From<String> for CounterKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "+1/+1" => CounterKind::PlusOnePlusOne,
            "-1/-1" => CounterKind::MinusOneMinusOne,
            "loyalty" => CounterKind::Loyalty,
            "charge" => CounterKind::Charge,
            _ => CounterKind::Other(name),
        }
    }
}

impl From<CounterKind> for String {
    fn from(kind: CounterKind) -> Self {
        match kind {
            CounterKind::PlusOnePlusOne => "+1/+1".to_string(),
            CounterKind::MinusOneMinusOne => "-1/-1".to_string(),
            CounterKind::Loyalty => "loyalty".to_string(),
            CounterKind::Charge => "charge".to_string(),
            CounterKind::Other(name) => name,
        }
    }
}

/// Printed, immutable attributes of a card
///
/// Shared between every copy of the same card through an `Arc`, so nothing
/// can change them once a card instance exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub mana_cost: ManaCost,
    pub type_line: String,
    pub category: CardCategory,
    pub power: Option<i32>,
    pub toughness: Option<i32>,
    /// Colors a land can tap for (first entry is used; empty means colorless)
    pub produced_mana: SmallVec<[Color; 2]>,
    pub oracle_text: String,
}

impl CardDefinition {
    pub fn new(name: impl Into<String>, type_line: impl Into<String>, mana_cost: ManaCost) -> Self {
        let type_line = type_line.into();
        CardDefinition {
            name: name.into(),
            mana_cost,
            category: CardCategory::from_type_line(&type_line),
            type_line,
            power: None,
            toughness: None,
            produced_mana: SmallVec::new(),
            oracle_text: String::new(),
        }
    }

    /// A land that taps for the given colors
    pub fn land(name: impl Into<String>, produces: &[Color]) -> Self {
        let mut def = CardDefinition::new(name, "Land", ManaCost::new());
        def.produced_mana = produces.iter().copied().collect();
        def
    }

    /// A creature with the given cost string and stats
    pub fn creature(name: impl Into<String>, cost: &str, power: i32, toughness: i32) -> Self {
        CardDefinition::new(name, "Creature", ManaCost::from_string(cost)).with_stats(power, toughness)
    }

    pub fn with_stats(mut self, power: i32, toughness: i32) -> Self {
        self.power = Some(power);
        self.toughness = Some(toughness);
        self
    }

    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    /// Create a card instance from this definition
    pub fn instantiate(self: &Arc<Self>, id: CardId, owner: PlayerId) -> Card {
        Card::new(id, Arc::clone(self), owner)
    }
}

/// Represents a card in the game
///
/// Cards have a unique `CardId` but many cards can share the same card definition.
/// Only `tapped`, `counters` and the `playable` cache change during a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    definition: Arc<CardDefinition>,
    owner: PlayerId,

    /// Is the card tapped?
    pub(crate) tapped: bool,

    /// Counters on this card; entries are dropped when they reach zero
    pub(crate) counters: FxHashMap<CounterKind, i32>,

    /// Controller-computed cache: would playing this card right now pass the rules?
    #[serde(skip)]
    pub(crate) playable: bool,
}

impl Card {
    pub fn new(id: CardId, definition: Arc<CardDefinition>, owner: PlayerId) -> Self {
        Card {
            id,
            definition,
            owner,
            tapped: false,
            counters: FxHashMap::default(),
            playable: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn definition(&self) -> &CardDefinition {
        &self.definition
    }

    pub fn mana_cost(&self) -> &ManaCost {
        &self.definition.mana_cost
    }

    /// Converted mana cost
    pub fn cmc(&self) -> u8 {
        self.definition.mana_cost.cmc()
    }

    pub fn category(&self) -> CardCategory {
        self.definition.category
    }

    pub fn type_line(&self) -> &str {
        &self.definition.type_line
    }

    pub fn produced_mana(&self) -> &[Color] {
        &self.definition.produced_mana
    }

    pub fn power(&self) -> Option<i32> {
        self.definition.power
    }

    pub fn toughness(&self) -> Option<i32> {
        self.definition.toughness
    }

    pub fn is_land(&self) -> bool {
        self.category() == CardCategory::Land
    }

    pub fn is_creature(&self) -> bool {
        self.category() == CardCategory::Creature
    }

    pub fn is_tapped(&self) -> bool {
        self.tapped
    }

    pub fn is_playable(&self) -> bool {
        self.playable
    }

    /// Tap the card; returns false if it was already tapped
    pub fn tap(&mut self) -> bool {
        !std::mem::replace(&mut self.tapped, true)
    }

    /// Untap the card; returns false if it was already untapped
    pub fn untap(&mut self) -> bool {
        std::mem::replace(&mut self.tapped, false)
    }

    /// Add (or with a negative delta, remove) counters
    pub fn add_counter(&mut self, kind: CounterKind, delta: i32) {
        let count = self.counters.entry(kind.clone()).or_insert(0);
        *count += delta;
        if *count <= 0 {
            self.counters.remove(&kind);
        }
    }

    pub fn get_counter(&self, kind: &CounterKind) -> i32 {
        self.counters.get(kind).copied().unwrap_or(0)
    }

    pub fn counters(&self) -> &FxHashMap<CounterKind, i32> {
        &self.counters
    }

    pub fn clear_counters(&mut self) {
        self.counters.clear();
    }

    /// Get current power (including counters)
    pub fn current_power(&self) -> Option<i32> {
        self.power().map(|base| base + self.counter_modifier())
    }

    /// Get current toughness (including counters)
    pub fn current_toughness(&self) -> Option<i32> {
        self.toughness().map(|base| base + self.counter_modifier())
    }

    fn counter_modifier(&self) -> i32 {
        self.get_counter(&CounterKind::PlusOnePlusOne) - self.get_counter(&CounterKind::MinusOneMinusOne)
    }

    /// Drop all per-match state (used when a card goes back into the library)
    pub(crate) fn reset_state(&mut self) {
        self.tapped = false;
        self.counters.clear();
        self.playable = false;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id)
    }
}
