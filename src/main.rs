//! MTG Commander - Main Binary
//!
//! Goldfish matches driven by the autopilot, and deck inspection

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mtg_commander::{
    core::{CardCategory, PlayerId},
    game::{Autopilot, MatchController, MatchLogger, VerbosityLevel},
    loader::{DeckBuilder, DeckDefinition},
    MatchConfig,
};
use std::path::{Path, PathBuf};

/// Deck used for any seat without a --deck/--opponent-deck
const DEFAULT_DECK: &str = include_str!("../test_decks/mono_green.json");

/// Verbosity level for match output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "mtg-commander")]
#[command(about = "Two-player Commander rules core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play both seats with the autopilot for a number of turns
    Goldfish {
        /// Deck file (.json) for player 1
        #[arg(long, value_name = "FILE")]
        deck: Option<PathBuf>,

        /// Deck file (.json) for player 2 (defaults to player 1's deck)
        #[arg(long, value_name = "FILE")]
        opponent_deck: Option<PathBuf>,

        /// Number of turns to play
        #[arg(long, default_value = "6")]
        turns: u32,

        /// Shuffle seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Match config file (.json)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Verbosity level (silent/0, minimal/1, normal/2, verbose/3)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityArg,

        /// Write a snapshot of the final state to this file
        #[arg(long, value_name = "FILE")]
        snapshot_output: Option<PathBuf>,
    },

    /// Print a summary of a deck file
    InspectDeck {
        /// Deck file (.json)
        #[arg(value_name = "FILE")]
        deck: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Goldfish {
            deck,
            opponent_deck,
            turns,
            seed,
            config,
            verbosity,
            snapshot_output,
        } => run_goldfish(GoldfishArgs {
            deck,
            opponent_deck,
            turns,
            seed,
            config,
            verbosity: verbosity.into(),
            snapshot_output,
        }),
        Commands::InspectDeck { deck } => inspect_deck(&deck),
    }
}

struct GoldfishArgs {
    deck: Option<PathBuf>,
    opponent_deck: Option<PathBuf>,
    turns: u32,
    seed: Option<u64>,
    config: Option<PathBuf>,
    verbosity: VerbosityLevel,
    snapshot_output: Option<PathBuf>,
}

fn load_deck(path: Option<&Path>) -> Result<DeckDefinition> {
    match path {
        Some(path) => DeckDefinition::load_from_file(path)
            .with_context(|| format!("failed to load deck {}", path.display())),
        None => DeckDefinition::from_json(DEFAULT_DECK).context("built-in deck is invalid"),
    }
}

fn run_goldfish(args: GoldfishArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    // Pin the seed so the banner and the snapshot both record it
    config.seed = Some(args.seed.unwrap_or_else(|| config.resolve_seed()));

    let deck1 = load_deck(args.deck.as_deref())?;
    let deck2 = match args.opponent_deck.as_deref() {
        Some(path) => load_deck(Some(path))?,
        None => deck1.clone(),
    };

    let mut builder = DeckBuilder::new();
    let p1 = builder.build_player(PlayerId::P1, "Player 1", &deck1, config.starting_life)?;
    let p2 = builder.build_player(PlayerId::P2, "Player 2", &deck2, config.starting_life)?;

    let mut ctrl =
        MatchController::new(p1, p2, config)?.with_logger(MatchLogger::with_verbosity(args.verbosity));
    ctrl.start_game(PlayerId::P1)?;

    let report = Autopilot::new().play_turns(&mut ctrl, args.turns)?;

    if args.verbosity >= VerbosityLevel::Minimal {
        println!("\n=== Goldfish Summary ===");
        println!("  Turns played: {}", report.turns_played);
        println!("  Lands played: {}", report.lands_played);
        println!("  Spells cast: {}", report.spells_cast);
        println!("  Mana produced: {}", report.mana_produced);
        for player in ctrl.state().players() {
            println!(
                "  {}: life {}, {} in hand, {} permanents, {} in library",
                player.name,
                player.life,
                player.hand().len(),
                player.zones.battlefield().count(),
                player.library_size()
            );
        }
    }

    if let Some(path) = &args.snapshot_output {
        ctrl.snapshot()
            .save_to_file(path)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        if args.verbosity >= VerbosityLevel::Minimal {
            println!("  Snapshot saved to: {}", path.display());
        }
    }

    Ok(())
}

fn inspect_deck(path: &Path) -> Result<()> {
    let deck = load_deck(Some(path))?;

    println!("Deck: {}", deck.name);
    if let Some(commander) = &deck.commander {
        println!("Commander: {commander}");
    }
    println!("Total cards: {}", deck.total_cards());

    let mut by_category: Vec<(CardCategory, usize)> = Vec::new();
    let mut total_cmc = 0usize;
    let mut nonland = 0usize;
    for entry in &deck.cards {
        let def = entry
            .to_definition()
            .with_context(|| format!("bad card entry '{}'", entry.name))?;
        let quantity = entry.quantity as usize;
        match by_category.iter_mut().find(|(category, _)| *category == def.category) {
            Some((_, count)) => *count += quantity,
            None => by_category.push((def.category, quantity)),
        }
        if def.category != CardCategory::Land {
            total_cmc += def.mana_cost.cmc() as usize * quantity;
            nonland += quantity;
        }
    }

    for (category, count) in by_category {
        println!("  {category}: {count}");
    }
    if nonland > 0 {
        println!("Average mana value (nonland): {:.2}", total_cmc as f64 / nonland as f64);
    }
    Ok(())
}
