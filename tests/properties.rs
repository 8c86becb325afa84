//! Property tests for mana payment and rule checks

use mtg_commander::core::{Color, ManaCost, ManaPool, PlayerId};
use mtg_commander::game::{Autopilot, MatchController, Phase, RuleEngine};
use mtg_commander::loader::{DeckBuilder, DeckDefinition};
use mtg_commander::MatchConfig;
use proptest::prelude::*;

fn pool_strategy() -> impl Strategy<Value = ManaPool> {
    prop::array::uniform6(0u8..8).prop_map(|[white, blue, black, red, green, colorless]| ManaPool {
        white,
        blue,
        black,
        red,
        green,
        colorless,
    })
}

fn cost_strategy() -> impl Strategy<Value = ManaCost> {
    (0u8..8, prop::array::uniform6(0u8..3)).prop_map(|(generic, [white, blue, black, red, green, colorless])| {
        ManaCost {
            generic,
            white,
            blue,
            black,
            red,
            green,
            colorless,
        }
    })
}

const MIXED: &str = r#"{"name": "Mixed", "cards": [
    {"name": "Forest", "quantity": 16, "type_line": "Basic Land — Forest", "produced_mana": ["G"]},
    {"name": "Mountain", "quantity": 14, "type_line": "Basic Land — Mountain", "produced_mana": ["R"]},
    {"name": "Grizzly Bears", "quantity": 10, "mana_cost": "{1}{G}", "type_line": "Creature — Bear", "power": 2, "toughness": 2},
    {"name": "Lightning Bolt", "quantity": 10, "mana_cost": "{R}", "type_line": "Instant"},
    {"name": "Mind Stone", "quantity": 10, "mana_cost": "{2}", "type_line": "Artifact"}
]}"#;

fn started_match(seed: u64) -> MatchController {
    let deck = DeckDefinition::from_json(MIXED).unwrap();
    let mut builder = DeckBuilder::new();
    let p1 = builder.build_player(PlayerId::P1, "Alice", &deck, 40).unwrap();
    let p2 = builder.build_player(PlayerId::P2, "Bob", &deck, 40).unwrap();
    let mut ctrl = MatchController::new(p1, p2, MatchConfig::default().with_seed(seed)).unwrap();
    ctrl.logger_mut().enable_capture();
    ctrl.start_game(PlayerId::P1).unwrap();
    ctrl
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_payment_conserves_mana(pool in pool_strategy(), cost in cost_strategy()) {
        if let Ok(after) = pool.try_pay(&cost) {
            prop_assert_eq!(pool.total() - after.total(), cost.cmc());
            for color in Color::ALL {
                prop_assert!(after.amount(color) <= pool.amount(color));
            }
        }
    }

    #[test]
    fn prop_check_and_payment_agree(pool in pool_strategy(), cost in cost_strategy()) {
        let mut paid = pool;
        let result = paid.pay_cost(&cost);
        prop_assert_eq!(result.is_ok(), pool.can_pay(&cost));
        if result.is_err() {
            prop_assert_eq!(paid, pool);
        }
    }

    #[test]
    fn prop_colored_before_generic(pool in pool_strategy(), cost in cost_strategy()) {
        let colored_ok = Color::ALL.iter().all(|&c| pool.amount(c) >= cost.amount(c));
        let enough_total = pool.total() >= cost.cmc();
        prop_assert_eq!(pool.can_pay(&cost), colored_ok && enough_total);
    }

    #[test]
    fn prop_outside_main_phases_nothing_is_playable(seed in any::<u64>(), steps in 0usize..30) {
        let mut ctrl = started_match(seed);
        let autopilot = Autopilot::new();
        for _ in 0..steps {
            if ctrl.state().current_phase().is_main() {
                let mut report = Default::default();
                autopilot.play_main_phase(&mut ctrl, &mut report).unwrap();
            }
            ctrl.advance_phase().unwrap();
        }

        let state = ctrl.state();
        let active = state.active_player_id().unwrap();
        if !state.current_phase().is_main() {
            for card in state.player(active).hand() {
                prop_assert!(RuleEngine::can_play_land(state, active, card).is_err());
                prop_assert!(RuleEngine::can_cast(state, active, card).is_err());
                prop_assert!(!card.is_playable());
            }
        }
    }

    #[test]
    fn prop_legality_is_idempotent(seed in any::<u64>(), steps in 0usize..15) {
        let mut ctrl = started_match(seed);
        for _ in 0..steps {
            ctrl.advance_phase().unwrap();
        }

        let state = ctrl.state();
        for id in PlayerId::ALL {
            for card in state.player(id).hand() {
                let first = RuleEngine::can_play(state, id, card);
                for _ in 0..3 {
                    prop_assert_eq!(&RuleEngine::can_play(state, id, card), &first);
                }
                prop_assert_eq!(card.is_playable(), first.is_ok());
            }
        }
    }

    #[test]
    fn prop_five_advances_flip_the_turn(seed in any::<u64>(), turns in 0u32..6) {
        let mut ctrl = started_match(seed);
        for _ in 0..turns * 5 {
            ctrl.advance_phase().unwrap();
        }
        let turn = ctrl.state().turn_number();
        let active = ctrl.state().active_player_id().unwrap();
        prop_assert_eq!(ctrl.state().current_phase(), Phase::Beginning);

        for _ in 0..5 {
            ctrl.advance_phase().unwrap();
        }
        prop_assert_eq!(ctrl.state().turn_number(), turn + 1);
        prop_assert_eq!(ctrl.state().active_player_id(), Some(active.opponent()));
    }
}
