//! Stable identifiers for card instances and player seats

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for a physical card instance
///
/// Assigned once when a deck is built and stable for the whole match, so
/// presentation caches can key on it instead of on memory addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out contiguous card IDs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardIdAllocator {
    next_id: u32,
}

impl CardIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start numbering at `first`, e.g. to keep two decks' IDs disjoint
    pub fn starting_at(first: u32) -> Self {
        CardIdAllocator { next_id: first }
    }

    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of IDs handed out so far plus the starting offset
    pub fn peek(&self) -> u32 {
        self.next_id
    }
}

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    /// The human seat
    P1,
    /// The opposing seat
    P2,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::P1, PlayerId::P2];

    /// The other seat
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::P1 => PlayerId::P2,
            PlayerId::P2 => PlayerId::P1,
        }
    }

    /// Position in `MatchState::players`
    pub fn index(self) -> usize {
        match self {
            PlayerId::P1 => 0,
            PlayerId::P2 => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::P1 => write!(f, "P1"),
            PlayerId::P2 => write!(f, "P2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_allocator() {
        let mut ids = CardIdAllocator::new();
        let id1 = ids.next_id();
        let id2 = ids.next_id();

        assert_eq!(id1.as_u32(), 0);
        assert_eq!(id2.as_u32(), 1);
        assert_eq!(ids.peek(), 2);

        let mut offset = CardIdAllocator::starting_at(100);
        assert_eq!(offset.next_id(), CardId::new(100));
    }

    #[test]
    fn test_player_seats() {
        assert_eq!(PlayerId::P1.opponent(), PlayerId::P2);
        assert_eq!(PlayerId::P2.opponent(), PlayerId::P1);
        assert_eq!(PlayerId::P1.index(), 0);
        assert_eq!(PlayerId::P2.index(), 1);
        assert_eq!(PlayerId::P2.to_string(), "P2");
    }
}
