//! Pairing model — two players assigned to face each other next round.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Standing};

/// A single next-round pairing `(id1, name1, id2, name2)`.
///
/// `id1` is always the higher-ranked of the two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub id1: PlayerId,
    pub name1: String,
    pub id2: PlayerId,
    pub name2: String,
}

impl Pairing {
    /// Pair two standings rows, higher-ranked player first.
    pub fn new(first: &Standing, second: &Standing) -> Self {
        Self {
            id1: first.id,
            name1: first.name.clone(),
            id2: second.id,
            name2: second.name.clone(),
        }
    }

    /// Both player ids.
    pub fn ids(&self) -> (PlayerId, PlayerId) {
        (self.id1, self.id2)
    }

    /// Whether the given player is in this pairing.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.id1 == id || self.id2 == id
    }
}

impl From<Pairing> for (PlayerId, String, PlayerId, String) {
    fn from(p: Pairing) -> Self {
        (p.id1, p.name1, p.id2, p.name2)
    }
}

/// The full outcome of pairing one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRound {
    /// Pairings in the order they were committed
    pub pairings: Vec<Pairing>,

    /// Player left without an opponent (odd player counts only)
    pub bye: Option<Standing>,

    /// Pairings that repeat an earlier match
    pub rematches: u32,
}

impl PairingRound {
    /// Number of players placed in a pairing.
    pub fn paired_count(&self) -> usize {
        self.pairings.len() * 2
    }
}
