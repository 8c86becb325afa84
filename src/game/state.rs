//! Main match state structure

use crate::core::{Card, CardId, Player, PlayerId};
use crate::game::{GameClock, Phase};
use crate::zones::{CardZone, ZoneKind};
use crate::{MtgError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Complete match state
///
/// Composes the two players, the game clock and the stack. Outside this
/// crate it is read-only: every mutation goes through `MatchController`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Indexed by `PlayerId::index()`
    players: [Player; 2],

    clock: GameClock,

    /// LIFO holding area for spells awaiting resolution
    stack: CardZone,

    /// Seed the RNG was created from, for replaying a match
    seed: u64,

    /// Random number generator for shuffles (serializable for deterministic replay)
    rng: ChaCha12Rng,
}

impl MatchState {
    /// Seat two fully built players
    ///
    /// `p1` must sit in seat `P1` and `p2` in seat `P2`.
    pub fn new(p1: Player, p2: Player, seed: u64) -> Result<Self> {
        if p1.id != PlayerId::P1 || p2.id != PlayerId::P2 {
            return Err(MtgError::InvalidAction(format!(
                "players must occupy seats P1 and P2 (got {} and {})",
                p1.id, p2.id
            )));
        }

        Ok(MatchState {
            players: [p1, p2],
            clock: GameClock::new(),
            stack: CardZone::new(ZoneKind::Stack),
            seed,
            rng: ChaCha12Rng::seed_from_u64(seed),
        })
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub(crate) fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    pub fn active_player_id(&self) -> Option<PlayerId> {
        self.clock.active_player
    }

    pub fn priority_player_id(&self) -> Option<PlayerId> {
        self.clock.priority_player
    }

    pub fn current_phase(&self) -> Phase {
        self.clock.current_phase
    }

    pub fn turn_number(&self) -> u32 {
        self.clock.turn_number
    }

    pub fn is_started(&self) -> bool {
        self.clock.is_started()
    }

    /// The player whose turn it is, or `None` before the match starts
    pub fn active_player(&self) -> Option<&Player> {
        self.active_player_id().map(|id| self.player(id))
    }

    /// The player on the other side of the table
    pub fn opponent_of(&self, id: PlayerId) -> &Player {
        self.player(id.opponent())
    }

    pub fn stack(&self) -> &CardZone {
        &self.stack
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a player's library using the match RNG
    pub(crate) fn shuffle_library(&mut self, id: PlayerId) {
        let rng = &mut self.rng;
        self.players[id.index()].shuffle_library(rng);
    }

    pub(crate) fn put_on_stack(&mut self, card: Card) {
        self.stack.add(card);
    }

    /// Pop the top of the stack into its owner's graveyard
    pub(crate) fn resolve_top_of_stack(&mut self) -> Option<CardId> {
        let card = self.stack.draw_top()?;
        let id = card.id();
        let owner = card.owner();
        self.player_mut(owner).zones.graveyard.add(card);
        Some(id)
    }

    /// Move everything left on the stack to the owners' graveyards
    pub(crate) fn clear_stack(&mut self) -> usize {
        let mut moved = 0;
        while self.resolve_top_of_stack().is_some() {
            moved += 1;
        }
        moved
    }

    /// Cards in both players' zones plus the stack
    pub fn total_cards(&self) -> usize {
        self.players.iter().map(|p| p.zones.total_cards()).sum::<usize>() + self.stack.len()
    }

    /// Find which player's zone (or the stack) holds a card
    pub fn locate_card(&self, card_id: CardId) -> Option<(Option<PlayerId>, ZoneKind)> {
        if self.stack.contains(card_id) {
            return Some((None, ZoneKind::Stack));
        }
        self.players
            .iter()
            .find_map(|p| p.zones.locate(card_id).map(|zone| (Some(p.id), zone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardDefinition, ManaCost};
    use std::sync::Arc;

    fn two_players() -> (Player, Player) {
        (
            Player::new(PlayerId::P1, "Alice", 40),
            Player::new(PlayerId::P2, "Bob", 40),
        )
    }

    #[test]
    fn test_new_match_is_not_started() {
        let (p1, p2) = two_players();
        let state = MatchState::new(p1, p2, 42).unwrap();

        assert!(!state.is_started());
        assert!(state.active_player().is_none());
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.player(PlayerId::P2).name, "Bob");
        assert_eq!(state.opponent_of(PlayerId::P1).name, "Bob");
        assert_eq!(state.seed(), 42);
    }

    #[test]
    fn test_seats_must_match() {
        let p1 = Player::new(PlayerId::P2, "Alice", 40);
        let p2 = Player::new(PlayerId::P2, "Bob", 40);
        assert!(MatchState::new(p1, p2, 0).is_err());
    }

    #[test]
    fn test_stack_is_lifo_and_resolves_to_owner_graveyard() {
        let (p1, p2) = two_players();
        let mut state = MatchState::new(p1, p2, 0).unwrap();
        let def = Arc::new(CardDefinition::new("Opt", "Instant", ManaCost::from_string("U")));

        state.put_on_stack(def.instantiate(CardId::new(1), PlayerId::P1));
        state.put_on_stack(def.instantiate(CardId::new(2), PlayerId::P2));
        assert_eq!(state.total_cards(), 2);

        assert_eq!(state.resolve_top_of_stack(), Some(CardId::new(2)));
        assert_eq!(
            state.locate_card(CardId::new(2)),
            Some((Some(PlayerId::P2), ZoneKind::Graveyard))
        );
        assert_eq!(state.locate_card(CardId::new(1)), Some((None, ZoneKind::Stack)));

        assert_eq!(state.clear_stack(), 1);
        assert!(state.stack().is_empty());
        assert_eq!(state.total_cards(), 2);
    }
}
