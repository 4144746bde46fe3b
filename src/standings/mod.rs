//! Standings calculation.
//!
//! Aggregates the registered players and the match log into the ranked
//! table the pairing engine consumes:
//! - Wins and matches played per player
//! - Rank order: wins descending, then registration order

use std::collections::HashMap;

use tracing::warn;

use crate::models::{MatchRecord, Player, PlayerId, Standing};

/// Compute the current standings, best record first.
pub fn compute_standings(players: &[Player], matches: &[MatchRecord]) -> Vec<Standing> {
    let mut table: HashMap<PlayerId, Standing> = players
        .iter()
        .map(|p| (p.id, Standing::new(p.id, p.name.clone(), 0, 0)))
        .collect();

    for m in matches {
        if !table.contains_key(&m.winner) || !table.contains_key(&m.loser) {
            warn!(
                "Ignoring match {} vs {}: player not registered",
                m.winner, m.loser
            );
            continue;
        }
        if let Some(winner) = table.get_mut(&m.winner) {
            winner.wins += 1;
            winner.matches += 1;
        }
        if let Some(loser) = table.get_mut(&m.loser) {
            loser.matches += 1;
        }
    }

    let mut standings: Vec<Standing> = table.into_values().collect();
    rank(&mut standings);
    standings
}

/// Sort standings into rank order.
pub fn rank(standings: &mut [Standing]) {
    standings.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));
}

/// Calculate win rate from wins and matches played.
pub fn win_rate(standing: &Standing) -> f64 {
    if standing.matches == 0 {
        0.0
    } else {
        standing.wins as f64 / standing.matches as f64
    }
}
