//! Match controller: the only code that mutates a match
//!
//! Every command validates first and applies second. A refused command
//! returns the `RuleViolation` wrapped in `MtgError::Rule`, logs it as
//! blocked, and leaves the match exactly as it was. After every state change
//! the `playable` flag of each hand card is recomputed.

use crate::config::MatchConfig;
use crate::core::{CardId, Color, Player, PlayerId};
use crate::game::{ManaManager, MatchLogger, MatchSnapshot, MatchState, Phase, PhaseTransition, RuleEngine};
use crate::zones::ZoneKind;
use crate::{MtgError, Result, RuleViolation};

/// What a successful `play_card` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    LandPlayed { card: CardId },
    SpellCast { card: CardId, destination: ZoneKind },
}

impl PlayOutcome {
    pub fn card_id(&self) -> CardId {
        match self {
            PlayOutcome::LandPlayed { card } | PlayOutcome::SpellCast { card, .. } => *card,
        }
    }
}

#[derive(Debug)]
pub struct MatchController {
    state: MatchState,
    logger: MatchLogger,
    config: MatchConfig,
}

impl MatchController {
    /// Seat two fully built players
    ///
    /// Their zones should already be populated (see `DeckBuilder`). The land
    /// limit comes from the config; the seed too, or a random one is drawn.
    pub fn new(mut p1: Player, mut p2: Player, config: MatchConfig) -> Result<Self> {
        p1.max_lands_per_turn = config.max_lands_per_turn;
        p2.max_lands_per_turn = config.max_lands_per_turn;
        let seed = config.resolve_seed();
        let state = MatchState::new(p1, p2, seed)?;

        Ok(MatchController {
            state,
            logger: MatchLogger::new(),
            config,
        })
    }

    pub fn with_logger(mut self, logger: MatchLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Read-only view of the match
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn logger(&self) -> &MatchLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut MatchLogger {
        &mut self.logger
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn into_state(self) -> MatchState {
        self.state
    }

    /// Rebuild a controller around a saved state
    pub(crate) fn from_parts(state: MatchState, config: MatchConfig) -> Self {
        let mut controller = MatchController {
            state,
            logger: MatchLogger::new(),
            config,
        };
        controller.recompute_playable();
        controller
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::new(self.state.clone(), self.config.clone())
    }

    /// Shuffle, deal opening hands and start the clock with `first` active
    pub fn start_game(&mut self, first: PlayerId) -> Result<()> {
        if self.state.is_started() {
            return Err(MtgError::InvalidAction("the match has already started".to_string()));
        }

        self.logger.turn(&format!(
            "Match started: {} vs {} (seed {})",
            self.state.player(PlayerId::P1).name,
            self.state.player(PlayerId::P2).name,
            self.state.seed()
        ));

        for id in PlayerId::ALL {
            self.state.shuffle_library(id);
            let drawn = self.state.player_mut(id).draw_cards(self.config.opening_hand_size);
            self.logger
                .verbose(&format!("{} draws an opening hand of {drawn}", self.state.player(id).name));
        }

        self.state.clock_mut().start(first);
        self.log_turn_start();
        self.enter_beginning_phase(first);
        self.recompute_playable();
        Ok(())
    }

    /// Play the card at `hand_index` from `player_id`'s hand
    ///
    /// Lands go to the battlefield and count against the land limit. Anything
    /// else is paid for and moved to the zone its category calls for.
    pub fn play_card(&mut self, player_id: PlayerId, hand_index: usize) -> Result<PlayOutcome> {
        let player = self.state.player(player_id);
        let card = player.card_at(ZoneKind::Hand, hand_index)?;

        if let Err(violation) = RuleEngine::can_play(&self.state, player_id, card) {
            self.logger
                .blocked(&format!("[BLOCKED] {} cannot play {card}: {violation}", player.name));
            return Err(violation.into());
        }

        let is_land = card.is_land();
        let cost = *card.mana_cost();
        let destination = ZoneKind::destination_for(card.category());
        let card_label = card.to_string();

        let player = self.state.player_mut(player_id);
        let outcome = if is_land {
            let card = player.move_card(ZoneKind::Hand, hand_index, ZoneKind::BattlefieldLands)?;
            player.play_land();
            self.logger.action(&format!("{} plays {card_label}", player.name));
            PlayOutcome::LandPlayed { card }
        } else {
            ManaManager::pay(&mut player.mana_pool, &cost)?;
            let card = player.move_card(ZoneKind::Hand, hand_index, destination)?;
            self.logger
                .action(&format!("{} casts {card_label} for {cost} ({destination})", player.name));
            PlayOutcome::SpellCast { card, destination }
        };

        self.recompute_playable();
        Ok(outcome)
    }

    /// Pay for the card at `hand_index` and put it on top of the stack
    ///
    /// Same checks and payment as casting through `play_card`, but the card
    /// waits on the stack until `resolve_stack_top` or the end of the turn.
    pub fn cast_to_stack(&mut self, player_id: PlayerId, hand_index: usize) -> Result<CardId> {
        let player = self.state.player(player_id);
        let card = player.card_at(ZoneKind::Hand, hand_index)?;

        let check = if card.is_land() {
            Err(RuleViolation::NotASpell {
                card: card.name().to_string(),
            })
        } else {
            RuleEngine::can_cast(&self.state, player_id, card)
        };
        if let Err(violation) = check {
            self.logger
                .blocked(&format!("[BLOCKED] {} cannot cast {card}: {violation}", player.name));
            return Err(violation.into());
        }

        let cost = *card.mana_cost();
        let player = self.state.player_mut(player_id);
        ManaManager::pay(&mut player.mana_pool, &cost)?;
        let card = player.take_card(ZoneKind::Hand, hand_index)?;
        self.logger
            .action(&format!("{} casts {card} for {cost} onto the stack", player.name));

        let id = card.id();
        self.state.put_on_stack(card);
        self.recompute_playable();
        Ok(id)
    }

    /// Move the clock one phase forward and run the automatic effects
    ///
    /// The pool of the player whose phase ended is emptied. At a turn change
    /// anything left on the stack goes to its owner's graveyard. Entering the
    /// beginning phase untaps, resets the land count, empties the pool and
    /// draws a card.
    pub fn advance_phase(&mut self) -> Result<PhaseTransition> {
        let transition = match self.state.clock_mut().advance() {
            Ok(transition) => transition,
            Err(violation) => {
                self.logger.blocked(&format!("[BLOCKED] cannot advance: {violation}"));
                return Err(violation.into());
            }
        };

        self.state.player_mut(transition.ending_player).empty_mana_pool();

        if transition.turn_changed {
            let swept = self.state.clear_stack();
            if swept > 0 {
                self.logger
                    .phase(&format!("{swept} card(s) left on the stack moved to the graveyard"));
            }
            self.log_turn_start();
        }

        self.logger.phase(&format!(
            "{} -> {} ({})",
            transition.from,
            transition.to,
            self.state.player(transition.active_player).name
        ));

        if transition.to == Phase::Beginning {
            self.enter_beginning_phase(transition.active_player);
        }

        self.recompute_playable();
        Ok(transition)
    }

    /// Shuffle the hand back into the library and draw a fresh one
    ///
    /// The new hand is always full size, however often this is repeated.
    pub fn execute_mulligan(&mut self, player_id: PlayerId) -> Result<()> {
        let returned = self.state.player_mut(player_id).return_hand_to_library();
        self.state.shuffle_library(player_id);
        let drawn = self
            .state
            .player_mut(player_id)
            .draw_cards(self.config.opening_hand_size);

        self.logger.action(&format!(
            "{} mulligans: {returned} card(s) shuffled away, {drawn} drawn",
            self.state.player(player_id).name
        ));
        self.recompute_playable();
        Ok(())
    }

    /// Add `delta` to a life total and return the new total
    ///
    /// A total of zero or less does not end the match.
    pub fn adjust_life(&mut self, player_id: PlayerId, delta: i32) -> i32 {
        let player = self.state.player_mut(player_id);
        let life = player.adjust_life(delta);
        self.logger
            .action(&format!("{} life {delta:+} -> {life}", player.name));
        self.recompute_playable();
        life
    }

    /// Tap the land at `land_index` for one mana
    ///
    /// Returns `Ok(None)` without changing anything when the land is already
    /// tapped.
    pub fn produce_mana_from_land(&mut self, player_id: PlayerId, land_index: usize) -> Result<Option<Color>> {
        let Player {
            name, mana_pool, zones, ..
        } = self.state.player_mut(player_id);

        let len = zones.lands.len();
        let land = zones.lands.get_mut(land_index).ok_or(MtgError::IndexOutOfRange {
            player: player_id,
            zone: ZoneKind::BattlefieldLands,
            index: land_index,
            len,
        })?;

        let Some(color) = ManaManager::produce(mana_pool, land) else {
            self.logger
                .verbose(&format!("{name}: {land} is already tapped, no mana produced"));
            return Ok(None);
        };
        land.tap();
        self.logger
            .action(&format!("{name} taps {land} for {color} (pool: {mana_pool})"));

        self.recompute_playable();
        Ok(Some(color))
    }

    /// Declare the creature at `creature_index` as an attacker, tapping it
    ///
    /// No damage is dealt.
    pub fn declare_attacker(&mut self, player_id: PlayerId, creature_index: usize) -> Result<CardId> {
        let player = self.state.player(player_id);
        let creature = player.card_at(ZoneKind::BattlefieldCreatures, creature_index)?;

        if let Err(violation) = RuleEngine::can_attack(&self.state, player_id, creature) {
            self.logger
                .blocked(&format!("[BLOCKED] {} cannot attack with {creature}: {violation}", player.name));
            return Err(violation.into());
        }

        let player = self.state.player_mut(player_id);
        let creature = player.card_at_mut(ZoneKind::BattlefieldCreatures, creature_index)?;
        creature.tap();
        let id = creature.id();
        let label = creature.to_string();
        self.logger.action(&format!("{} attacks with {label}", player.name));

        self.recompute_playable();
        Ok(id)
    }

    /// Resolve the top of the stack into its owner's graveyard
    pub fn resolve_stack_top(&mut self) -> Option<CardId> {
        let resolved = self.state.resolve_top_of_stack()?;
        self.logger.action(&format!("{resolved} resolves"));
        self.recompute_playable();
        Some(resolved)
    }

    /// Put both players back to their pre-match state for another game
    ///
    /// All cards return to the libraries (commanders stay in the command
    /// zone), life, mana and land counts reset, libraries are reshuffled and
    /// the clock goes back to un-started. The RNG keeps running, so the
    /// rematch gets different shuffles.
    pub fn reset_for_rematch(&mut self) {
        self.state.clear_stack();

        for id in PlayerId::ALL {
            let player = self.state.player_mut(id);
            player.return_all_to_library();
            player.life = self.config.starting_life;
            player.empty_mana_pool();
            player.reset_lands_played();
            self.state.shuffle_library(id);
        }

        self.state.clock_mut().reset();
        self.logger.turn("Match reset for a rematch");
        self.recompute_playable();
    }

    /// Re-run the rule engine over every hand card and cache the answer
    pub fn recompute_playable(&mut self) {
        for id in PlayerId::ALL {
            let flags: Vec<bool> = self
                .state
                .player(id)
                .hand()
                .iter()
                .map(|card| RuleEngine::can_play(&self.state, id, card).is_ok())
                .collect();

            let hand = &mut self.state.player_mut(id).zones.hand;
            for (card, playable) in hand.iter_mut().zip(flags) {
                card.playable = playable;
            }
        }
    }

    fn enter_beginning_phase(&mut self, active: PlayerId) {
        let skip_draw = self.state.clock().is_first_turn_for(active);
        let player = self.state.player_mut(active);

        let untapped = player.untap_all();
        player.reset_lands_played();
        player.empty_mana_pool();
        self.logger
            .phase(&format!("{} untaps {untapped} permanent(s)", player.name));

        if skip_draw {
            self.logger
                .phase(&format!("{} skips the draw on the first turn", player.name));
        } else if let Some(card) = player.draw_card() {
            self.logger.phase(&format!("{} draws {card}", player.name));
        } else {
            self.logger
                .phase(&format!("{} has no card to draw", player.name));
        }
    }

    fn log_turn_start(&self) {
        if let Some(active) = self.state.active_player() {
            self.logger.turn(&format!(
                "Turn {}: {}'s turn",
                self.state.turn_number(),
                active.name
            ));
        }
    }
}
