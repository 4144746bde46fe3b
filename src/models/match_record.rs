//! Match model — the recorded outcome of one game.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A single recorded match. Append-only: never edited once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Id of the player who won
    pub winner: PlayerId,

    /// Id of the player who lost
    pub loser: PlayerId,

    /// When the result was reported
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a new MatchRecord reported now.
    pub fn new(winner: PlayerId, loser: PlayerId) -> Self {
        Self {
            winner,
            loser,
            recorded_at: Utc::now(),
        }
    }
}
