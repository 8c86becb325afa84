//! Core game types and entities

pub mod card;
pub mod entity;
pub mod mana;
pub mod player;

pub use card::{Card, CardCategory, CardDefinition, CounterKind};
pub use entity::{CardId, CardIdAllocator, PlayerId};
pub use mana::{Color, ManaCost, ManaPool};
pub use player::Player;
