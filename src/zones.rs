//! Game zones (Library, Hand, Battlefield, Graveyard, etc.)
//!
//! Zones own their `Card` values. Moving a card means removing it from one
//! zone and pushing it into another, so a card can never be in two places.

use crate::core::{Card, CardCategory, CardId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Library,
    Hand,
    BattlefieldLands,
    BattlefieldCreatures,
    BattlefieldOther,
    Graveyard,
    Exile,
    Command,
    Stack,
}

impl ZoneKind {
    /// Every zone a player owns (the stack belongs to the match)
    pub const PLAYER_ZONES: [ZoneKind; 8] = [
        ZoneKind::Library,
        ZoneKind::Hand,
        ZoneKind::BattlefieldLands,
        ZoneKind::BattlefieldCreatures,
        ZoneKind::BattlefieldOther,
        ZoneKind::Graveyard,
        ZoneKind::Exile,
        ZoneKind::Command,
    ];

    pub fn is_battlefield(&self) -> bool {
        matches!(
            self,
            ZoneKind::BattlefieldLands | ZoneKind::BattlefieldCreatures | ZoneKind::BattlefieldOther
        )
    }

    /// Where a card of this category lands after it is played
    pub fn destination_for(category: CardCategory) -> ZoneKind {
        match category {
            CardCategory::Land => ZoneKind::BattlefieldLands,
            CardCategory::Creature => ZoneKind::BattlefieldCreatures,
            CardCategory::OtherPermanent => ZoneKind::BattlefieldOther,
            CardCategory::Instant | CardCategory::Sorcery => ZoneKind::Graveyard,
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZoneKind::Library => "library",
            ZoneKind::Hand => "hand",
            ZoneKind::BattlefieldLands => "lands",
            ZoneKind::BattlefieldCreatures => "creatures",
            ZoneKind::BattlefieldOther => "other permanents",
            ZoneKind::Graveyard => "graveyard",
            ZoneKind::Exile => "exile",
            ZoneKind::Command => "command zone",
            ZoneKind::Stack => "stack",
        };
        write!(f, "{name}")
    }
}

/// An ordered zone of cards
///
/// For the library the top is the end of the vector. The hand keeps draw
/// order for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: ZoneKind,
    cards: Vec<Card>,
}

impl CardZone {
    pub fn new(zone_type: ZoneKind) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove by position, keeping the order of the rest
    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn remove(&mut self, card_id: CardId) -> Option<Card> {
        self.position(card_id).and_then(|pos| self.remove_at(pos))
    }

    pub fn position(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.position(card_id).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Card> {
        self.cards.iter_mut()
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(Card::id).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top (for Library)
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Shuffle the zone (for Library)
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    /// Take every card out of the zone
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

impl Extend<Card> for CardZone {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        self.cards.extend(iter);
    }
}

/// Collection of all zones for a player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerZones {
    pub library: CardZone,
    pub hand: CardZone,
    pub lands: CardZone,
    pub creatures: CardZone,
    pub other: CardZone,
    pub graveyard: CardZone,
    pub exile: CardZone,
    pub command: CardZone,
}

impl PlayerZones {
    pub fn new() -> Self {
        PlayerZones {
            library: CardZone::new(ZoneKind::Library),
            hand: CardZone::new(ZoneKind::Hand),
            lands: CardZone::new(ZoneKind::BattlefieldLands),
            creatures: CardZone::new(ZoneKind::BattlefieldCreatures),
            other: CardZone::new(ZoneKind::BattlefieldOther),
            graveyard: CardZone::new(ZoneKind::Graveyard),
            exile: CardZone::new(ZoneKind::Exile),
            command: CardZone::new(ZoneKind::Command),
        }
    }

    pub fn get_zone(&self, zone: ZoneKind) -> Option<&CardZone> {
        match zone {
            ZoneKind::Library => Some(&self.library),
            ZoneKind::Hand => Some(&self.hand),
            ZoneKind::BattlefieldLands => Some(&self.lands),
            ZoneKind::BattlefieldCreatures => Some(&self.creatures),
            ZoneKind::BattlefieldOther => Some(&self.other),
            ZoneKind::Graveyard => Some(&self.graveyard),
            ZoneKind::Exile => Some(&self.exile),
            ZoneKind::Command => Some(&self.command),
            ZoneKind::Stack => None,
        }
    }

    pub fn get_zone_mut(&mut self, zone: ZoneKind) -> Option<&mut CardZone> {
        match zone {
            ZoneKind::Library => Some(&mut self.library),
            ZoneKind::Hand => Some(&mut self.hand),
            ZoneKind::BattlefieldLands => Some(&mut self.lands),
            ZoneKind::BattlefieldCreatures => Some(&mut self.creatures),
            ZoneKind::BattlefieldOther => Some(&mut self.other),
            ZoneKind::Graveyard => Some(&mut self.graveyard),
            ZoneKind::Exile => Some(&mut self.exile),
            ZoneKind::Command => Some(&mut self.command),
            ZoneKind::Stack => None,
        }
    }

    /// Every permanent the player controls
    pub fn battlefield(&self) -> impl Iterator<Item = &Card> {
        self.lands.iter().chain(self.creatures.iter()).chain(self.other.iter())
    }

    pub fn battlefield_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.lands
            .iter_mut()
            .chain(self.creatures.iter_mut())
            .chain(self.other.iter_mut())
    }

    /// Which of this player's zones holds the card, if any
    pub fn locate(&self, card_id: CardId) -> Option<ZoneKind> {
        ZoneKind::PLAYER_ZONES
            .into_iter()
            .find(|&kind| self.get_zone(kind).is_some_and(|zone| zone.contains(card_id)))
    }

    /// Total number of cards across all zones
    pub fn total_cards(&self) -> usize {
        ZoneKind::PLAYER_ZONES
            .iter()
            .filter_map(|&kind| self.get_zone(kind))
            .map(CardZone::len)
            .sum()
    }
}

impl Default for PlayerZones {
    fn default() -> Self {
        Self::new()
    }
}
