//! Deck loading
//!
//! Decks are JSON records with the printed card data inline.

pub mod deck;

pub use deck::{DeckBuilder, DeckCardEntry, DeckDefinition, StatValue};
