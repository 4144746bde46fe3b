//! In-memory match history.
//!
//! Loaded once from the match log so that every "have these two played"
//! probe during a pairing search is a set lookup instead of a store query.

use std::collections::HashSet;

use crate::models::{MatchRecord, PlayerId};

use super::HistoryOracle;

/// Symmetric set of player pairs that have already met.
#[derive(Debug, Clone, Default)]
pub struct MatchHistory {
    played: HashSet<(PlayerId, PlayerId)>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the history from a complete match log.
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = &'a MatchRecord>) -> Self {
        let mut history = Self::new();
        for m in matches {
            history.record(m.winner, m.loser);
        }
        history
    }

    /// Record that `a` and `b` played each other. Order does not matter.
    pub fn record(&mut self, a: PlayerId, b: PlayerId) {
        self.played.insert(Self::key(a, b));
    }

    /// Number of distinct pairs that have met.
    pub fn len(&self) -> usize {
        self.played.len()
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }

    fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl HistoryOracle for MatchHistory {
    fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self.played.contains(&Self::key(a, b))
    }
}
