//! Swiss pairing engine.
//!
//! Turns a ranked standings list into next-round pairings:
//! - Players are paired top-down with the nearest opponent they have not met
//! - Match history is consulted through a [`HistoryOracle`]
//! - Odd fields leave exactly one player with a bye
//!
//! The engine is a pure function of its inputs. It never reorders the
//! standings it is given and never writes match records.

mod backtrack;
mod greedy;
mod history;

pub use history::MatchHistory;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::PairingConfig;
use crate::models::{Pairing, PairingRound, PlayerId, Standing};

/// Errors that can occur while pairing a round.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error("Player {0} appears more than once in the standings")]
    DuplicatePlayer(PlayerId),

    #[error("No pairing avoids a rematch")]
    NoValidPairing,

    #[error("Pairing search gave up after {0} steps")]
    SearchBudgetExceeded(usize),
}

/// Answers whether two players have already faced each other.
///
/// Implementations must be symmetric: `has_played(a, b) == has_played(b, a)`.
pub trait HistoryOracle {
    fn has_played(&self, a: PlayerId, b: PlayerId) -> bool;
}

impl<F> HistoryOracle for F
where
    F: Fn(PlayerId, PlayerId) -> bool,
{
    fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self(a, b)
    }
}

/// How opponents are searched for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingStrategy {
    /// Nearest unplayed opponent, never revisiting earlier pairs.
    /// Forces a rematch with the adjacent player when stuck.
    Greedy,

    /// Same candidate order as greedy, undoing earlier pairs on dead ends.
    #[default]
    Backtracking,
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingStrategy::Greedy => write!(f, "greedy"),
            PairingStrategy::Backtracking => write!(f, "backtracking"),
        }
    }
}

impl FromStr for PairingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(PairingStrategy::Greedy),
            "backtracking" | "backtrack" => Ok(PairingStrategy::Backtracking),
            other => Err(format!(
                "Unknown pairing strategy: {} (expected 'greedy' or 'backtracking')",
                other
            )),
        }
    }
}

/// Pair the next round with the default configuration and return only the
/// pairings. With an odd field the bye player is absent from the result.
pub fn compute_pairings<O>(
    ranks: &[Standing],
    oracle: &O,
) -> Result<Vec<Pairing>, PairingError>
where
    O: HistoryOracle + ?Sized,
{
    pair_round(ranks, oracle, &PairingConfig::default()).map(|round| round.pairings)
}

/// Pair the next round.
///
/// `ranks` must already be in standings order; it is the only notion of
/// proximity the engine uses.
pub fn pair_round<O>(
    ranks: &[Standing],
    oracle: &O,
    config: &PairingConfig,
) -> Result<PairingRound, PairingError>
where
    O: HistoryOracle + ?Sized,
{
    ensure_unique(ranks)?;

    let round = match config.strategy {
        PairingStrategy::Greedy => greedy::pair(ranks, oracle),
        PairingStrategy::Backtracking => {
            match backtrack::pair(ranks, oracle, config.search_budget) {
                Ok(round) => round,
                Err(e @ (PairingError::NoValidPairing | PairingError::SearchBudgetExceeded(_)))
                    if config.allow_rematches =>
                {
                    warn!("{}; falling back to greedy pairing with rematches", e);
                    greedy::pair(ranks, oracle)
                }
                Err(e) => return Err(e),
            }
        }
    };

    info!(
        "Paired {} of {} players into {} pairings ({} strategy, bye: {}, rematches: {})",
        round.paired_count(),
        ranks.len(),
        round.pairings.len(),
        config.strategy,
        round
            .bye
            .as_ref()
            .map(|s| s.id.to_string())
            .unwrap_or_else(|| "none".to_string()),
        round.rematches
    );

    Ok(round)
}

fn ensure_unique(ranks: &[Standing]) -> Result<(), PairingError> {
    let mut seen = HashSet::with_capacity(ranks.len());
    for standing in ranks {
        if !seen.insert(standing.id) {
            return Err(PairingError::DuplicatePlayer(standing.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchRecord;
    use pretty_assertions::assert_eq;

    fn id(n: u32) -> PlayerId {
        PlayerId::new(n)
    }

    fn four_players() -> Vec<Standing> {
        vec![
            Standing::new(PlayerId::new(1), "A", 2, 2),
            Standing::new(PlayerId::new(2), "B", 2, 2),
            Standing::new(PlayerId::new(3), "C", 1, 2),
            Standing::new(PlayerId::new(4), "D", 1, 2),
        ]
    }

    fn tuples(pairs: Vec<Pairing>) -> Vec<(u32, String, u32, String)> {
        pairs
            .into_iter()
            .map(|p| (p.id1.get(), p.name1, p.id2.get(), p.name2))
            .collect()
    }

    fn field(n: u32) -> Vec<Standing> {
        (1..=n)
            .map(|i| Standing::new(PlayerId::new(i), format!("P{}", i), 0, 0))
            .collect()
    }

    fn never(_: PlayerId, _: PlayerId) -> bool {
        false
    }

    fn greedy() -> PairingConfig {
        PairingConfig {
            strategy: PairingStrategy::Greedy,
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_field_pairs_adjacent_players() {
        let pairs = compute_pairings(&four_players(), &never).unwrap();

        assert_eq!(
            tuples(pairs),
            vec![
                (1, "A".to_string(), 2, "B".to_string()),
                (3, "C".to_string(), 4, "D".to_string()),
            ]
        );
    }

    #[test]
    fn test_played_adjacent_pair_is_avoided() {
        let history = MatchHistory::from_matches(&[MatchRecord::new(id(1), id(2))]);
        let pairs = compute_pairings(&four_players(), &history).unwrap();

        assert_eq!(
            tuples(pairs),
            vec![
                (1, "A".to_string(), 3, "C".to_string()),
                (2, "B".to_string(), 4, "D".to_string()),
            ]
        );
    }

    #[test]
    fn test_closure_oracle() {
        let oracle = |a: PlayerId, b: PlayerId| {
            (a, b) == (id(1), id(2)) || (a, b) == (id(2), id(1))
        };
        let pairs = compute_pairings(&four_players(), &oracle).unwrap();

        assert_eq!(pairs[0].ids(), (id(1), id(3)));
        assert_eq!(pairs[1].ids(), (id(2), id(4)));
    }

    #[test]
    fn test_even_field_covers_every_player_once() {
        for n in [0u32, 2, 4, 8, 16] {
            let ranks = field(n);
            let pairs = compute_pairings(&ranks, &never).unwrap();

            assert_eq!(pairs.len(), n as usize / 2);
            for (k, pair) in pairs.iter().enumerate() {
                let k = k as u32;
                assert_eq!(pair.ids(), (id(2 * k + 1), id(2 * k + 2)));
            }
        }
    }

    #[test]
    fn test_odd_field_leaves_one_player_out() {
        let ranks = field(7);
        let pairs = compute_pairings(&ranks, &never).unwrap();
        assert_eq!(pairs.len(), 3);

        let mut seen = HashSet::new();
        for pair in &pairs {
            assert_ne!(pair.id1, pair.id2);
            assert!(seen.insert(pair.id1));
            assert!(seen.insert(pair.id2));
        }
        let missing: Vec<_> = ranks
            .iter()
            .filter(|s| !pairs.iter().any(|p| p.contains(s.id)))
            .collect();
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn test_bye_reported_in_round() {
        let round = pair_round(&field(3), &never, &PairingConfig::default()).unwrap();

        assert_eq!(round.pairings.len(), 1);
        assert_eq!(round.bye.map(|s| s.id), Some(id(3)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut ranks = four_players();
        ranks.push(Standing::new(PlayerId::new(2), "B again", 0, 0));

        let err = compute_pairings(&ranks, &never).unwrap_err();
        assert!(matches!(err, PairingError::DuplicatePlayer(p) if p == id(2)));
    }

    #[test]
    fn test_result_is_repeatable() {
        let history = MatchHistory::from_matches(&[
            MatchRecord::new(id(1), id(2)),
            MatchRecord::new(id(3), id(5)),
        ]);
        let ranks = field(6);

        let first = compute_pairings(&ranks, &history).unwrap();
        let second = compute_pairings(&ranks, &history).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_greedy_strategy_forces_rematch() {
        let history = MatchHistory::from_matches(&[MatchRecord::new(id(3), id(4))]);
        let round = pair_round(&field(4), &history, &greedy()).unwrap();

        assert_eq!(round.pairings[1].ids(), (id(3), id(4)));
        assert_eq!(round.rematches, 1);
    }

    #[test]
    fn test_backtracking_falls_back_when_rematches_allowed() {
        let history = MatchHistory::from_matches(&[
            MatchRecord::new(id(1), id(2)),
            MatchRecord::new(id(1), id(3)),
            MatchRecord::new(id(1), id(4)),
            MatchRecord::new(id(2), id(3)),
            MatchRecord::new(id(2), id(4)),
            MatchRecord::new(id(3), id(4)),
        ]);

        let round = pair_round(&field(4), &history, &PairingConfig::default()).unwrap();
        assert_eq!(round.pairings.len(), 2);
        assert_eq!(round.rematches, 2);

        let strict = PairingConfig {
            allow_rematches: false,
            ..Default::default()
        };
        let err = pair_round(&field(4), &history, &strict).unwrap_err();
        assert!(matches!(err, PairingError::NoValidPairing));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "greedy".parse::<PairingStrategy>().unwrap(),
            PairingStrategy::Greedy
        );
        assert_eq!(
            "Backtracking".parse::<PairingStrategy>().unwrap(),
            PairingStrategy::Backtracking
        );
        assert!("optimal".parse::<PairingStrategy>().is_err());
    }

    #[test]
    fn test_strategy_serialization() {
        let json = serde_json::to_string(&PairingStrategy::Greedy).unwrap();
        assert_eq!(json, "\"greedy\"");
        assert_eq!(PairingStrategy::default(), PairingStrategy::Backtracking);
    }
}
