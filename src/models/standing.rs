//! Standing model — a player's win record at a point in time.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One row of the standings table: `(id, name, wins, matches)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: PlayerId,
    pub name: String,
    /// Matches won
    pub wins: u32,
    /// Matches played
    pub matches: u32,
}

impl Standing {
    pub fn new(id: PlayerId, name: impl Into<String>, wins: u32, matches: u32) -> Self {
        Self {
            id,
            name: name.into(),
            wins,
            matches,
        }
    }

    /// Matches lost (every recorded match has exactly one winner).
    pub fn losses(&self) -> u32 {
        self.matches.saturating_sub(self.wins)
    }
}
