//! Player representation

use crate::core::{Card, CardId, ManaPool, PlayerId};
use crate::zones::{PlayerZones, ZoneKind};
use crate::{MtgError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Represents a player in the game
///
/// Created once at match setup and kept for the whole match; mulligans and
/// rematches reshuffle cards instead of recreating the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Seat of this player
    pub id: PlayerId,

    /// Player name
    pub name: String,

    /// Life total
    pub life: i32,

    /// Mana pool
    pub mana_pool: ManaPool,

    /// Lands played this turn
    pub lands_played_this_turn: u8,

    /// Maximum lands per turn (usually 1)
    pub max_lands_per_turn: u8,

    /// Library, hand, battlefield, graveyard, exile and command zone
    pub zones: PlayerZones,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, starting_life: i32) -> Self {
        Player {
            id,
            name: name.into(),
            life: starting_life,
            mana_pool: ManaPool::new(),
            lands_played_this_turn: 0,
            max_lands_per_turn: 1,
            zones: PlayerZones::new(),
        }
    }

    pub fn gain_life(&mut self, amount: i32) {
        self.life = self.life.saturating_add(amount);
    }

    /// Life may go to zero or below; no loss is declared here
    pub fn lose_life(&mut self, amount: i32) {
        self.life = self.life.saturating_sub(amount);
    }

    /// Apply a signed life change and return the new total
    ///
    /// The total saturates at the `i32` bounds.
    pub fn adjust_life(&mut self, delta: i32) -> i32 {
        self.gain_life(delta);
        self.life
    }

    pub fn can_play_land(&self) -> bool {
        self.lands_played_this_turn < self.max_lands_per_turn
    }

    pub fn play_land(&mut self) {
        self.lands_played_this_turn += 1;
    }

    pub fn reset_lands_played(&mut self) {
        self.lands_played_this_turn = 0;
    }

    pub fn empty_mana_pool(&mut self) {
        self.mana_pool.clear();
    }

    pub fn hand(&self) -> &[Card] {
        self.zones.hand.cards()
    }

    pub fn library_size(&self) -> usize {
        self.zones.library.len()
    }

    /// Draw the top card of the library into the hand
    ///
    /// Drawing from an empty library is a no-op that returns `None`.
    pub fn draw_card(&mut self) -> Option<CardId> {
        let card = self.zones.library.draw_top()?;
        let id = card.id();
        self.zones.hand.add(card);
        Some(id)
    }

    /// Draw up to `count` cards, returning how many were actually drawn
    pub fn draw_cards(&mut self, count: usize) -> usize {
        (0..count).take_while(|_| self.draw_card().is_some()).count()
    }

    pub fn shuffle_library(&mut self, rng: &mut impl Rng) {
        self.zones.library.shuffle(rng);
    }

    /// Put the whole hand back into the library (unshuffled)
    pub fn return_hand_to_library(&mut self) -> usize {
        let hand = self.zones.hand.take_all();
        let count = hand.len();
        for mut card in hand {
            card.playable = false;
            self.zones.library.add(card);
        }
        count
    }

    /// Gather every card outside the command zone back into the library
    ///
    /// Cards come back untapped, without counters and not playable. The
    /// library is left unshuffled.
    pub fn return_all_to_library(&mut self) -> usize {
        let mut gathered = Vec::new();
        for kind in ZoneKind::PLAYER_ZONES {
            if matches!(kind, ZoneKind::Library | ZoneKind::Command) {
                continue;
            }
            if let Some(zone) = self.zones.get_zone_mut(kind) {
                gathered.extend(zone.take_all());
            }
        }
        let count = gathered.len();
        for mut card in gathered {
            card.reset_state();
            self.zones.library.add(card);
        }
        count
    }

    /// Untap every permanent this player controls, returning how many changed
    pub fn untap_all(&mut self) -> usize {
        self.zones
            .battlefield_mut()
            .map(|card| card.untap())
            .filter(|&changed| changed)
            .count()
    }

    /// Look up a card by position in one of this player's zones
    pub fn card_at(&self, zone: ZoneKind, index: usize) -> Result<&Card> {
        let cards = self.zone(zone)?;
        cards.get(index).ok_or(MtgError::IndexOutOfRange {
            player: self.id,
            zone,
            index,
            len: cards.len(),
        })
    }

    pub fn card_at_mut(&mut self, zone: ZoneKind, index: usize) -> Result<&mut Card> {
        let player = self.id;
        let cards = self.zone_mut(zone)?;
        let len = cards.len();
        cards.get_mut(index).ok_or(MtgError::IndexOutOfRange {
            player,
            zone,
            index,
            len,
        })
    }

    /// Remove and return the card at `index` in `zone`
    pub fn take_card(&mut self, zone: ZoneKind, index: usize) -> Result<Card> {
        self.card_at(zone, index)?;
        self.zone_mut(zone)?
            .remove_at(index)
            .ok_or_else(|| MtgError::InvalidAction(format!("{zone} changed during move")))
    }

    /// Move the card at `index` in `from` to the end of `to`
    pub fn move_card(&mut self, from: ZoneKind, index: usize, to: ZoneKind) -> Result<CardId> {
        // Validate both zones before removing anything
        self.zone(to)?;

        let card = self.take_card(from, index)?;
        let id = card.id();
        self.zone_mut(to)?.add(card);
        Ok(id)
    }

    fn zone(&self, zone: ZoneKind) -> Result<&crate::zones::CardZone> {
        self.zones
            .get_zone(zone)
            .ok_or_else(|| MtgError::InvalidAction(format!("{zone} is not a player zone")))
    }

    fn zone_mut(&mut self, zone: ZoneKind) -> Result<&mut crate::zones::CardZone> {
        self.zones
            .get_zone_mut(zone)
            .ok_or_else(|| MtgError::InvalidAction(format!("{zone} is not a player zone")))
    }
}
