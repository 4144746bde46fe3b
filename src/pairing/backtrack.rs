//! Exhaustive backtracking pairing.
//!
//! Candidates are tried in the same order as the greedy strategy (top
//! remaining player first, nearest unplayed opponent first), but a dead end
//! unwinds earlier commitments instead of forcing a rematch. Whenever the
//! greedy strategy reaches a rematch-free round, this search returns the
//! same round.

use tracing::debug;

use crate::models::{Pairing, PairingRound, Standing};

use super::{HistoryOracle, PairingError};

pub(crate) fn pair<O>(
    ranks: &[Standing],
    oracle: &O,
    budget: usize,
) -> Result<PairingRound, PairingError>
where
    O: HistoryOracle + ?Sized,
{
    let mut search = Search {
        ranks,
        oracle,
        taken: vec![false; ranks.len()],
        frames: Vec::with_capacity(ranks.len() / 2 + 1),
        pairs: Vec::with_capacity(ranks.len() / 2),
        needs_bye: ranks.len() % 2 == 1,
        bye: None,
        budget,
        expanded: 0,
    };

    if !search.solve()? {
        return Err(PairingError::NoValidPairing);
    }
    debug!("Backtracking search expanded {} nodes", search.expanded);

    Ok(PairingRound {
        pairings: search
            .pairs
            .iter()
            .map(|&(a, b)| Pairing::new(&ranks[a], &ranks[b]))
            .collect(),
        bye: search.bye.map(|i| ranks[i].clone()),
        rematches: 0,
    })
}

/// One level of the search: the top remaining player and how far through
/// its options the search has got.
struct Frame {
    anchor: usize,
    /// Next opponent index to try.
    next: usize,
    /// Opponent currently committed, if any.
    partner: Option<usize>,
    took_bye: bool,
}

struct Search<'a, O: ?Sized> {
    ranks: &'a [Standing],
    oracle: &'a O,
    taken: Vec<bool>,
    frames: Vec<Frame>,
    pairs: Vec<(usize, usize)>,
    needs_bye: bool,
    bye: Option<usize>,
    budget: usize,
    expanded: usize,
}

impl<O: HistoryOracle + ?Sized> Search<'_, O> {
    /// Depth-first search over an explicit frame stack.
    fn solve(&mut self) -> Result<bool, PairingError> {
        loop {
            // Everyone before the deepest anchor is already taken.
            let from = self.frames.last().map_or(0, |f| f.anchor + 1);
            let Some(anchor) = (from..self.ranks.len()).find(|&i| !self.taken[i]) else {
                return Ok(true);
            };

            self.expanded += 1;
            if self.expanded > self.budget {
                return Err(PairingError::SearchBudgetExceeded(self.budget));
            }

            self.taken[anchor] = true;
            self.frames.push(Frame {
                anchor,
                next: anchor + 1,
                partner: None,
                took_bye: false,
            });

            while !self.advance() {
                if self.frames.is_empty() {
                    return Ok(false);
                }
            }
        }
    }

    /// Move the deepest frame to its next option. Returns `false` and pops
    /// the frame once its options are exhausted.
    fn advance(&mut self) -> bool {
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };

        if let Some(partner) = frame.partner.take() {
            self.taken[partner] = false;
            self.pairs.pop();
        }
        if frame.took_bye {
            self.bye = None;
        }

        while frame.next < self.ranks.len() {
            let candidate = frame.next;
            frame.next += 1;
            if self.taken[candidate]
                || self
                    .oracle
                    .has_played(self.ranks[frame.anchor].id, self.ranks[candidate].id)
            {
                continue;
            }

            self.taken[candidate] = true;
            self.pairs.push((frame.anchor, candidate));
            frame.partner = Some(candidate);
            return true;
        }

        // Only reached once pairing the anchor has failed, so the bye
        // lands as low in the standings as the history allows.
        if self.needs_bye && self.bye.is_none() && !frame.took_bye {
            frame.took_bye = true;
            self.bye = Some(frame.anchor);
            return true;
        }

        self.taken[frame.anchor] = false;
        self.frames.pop();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;
    use crate::pairing::{greedy, MatchHistory};
    use pretty_assertions::assert_eq;

    const BUDGET: usize = 100_000;

    fn field(n: u32) -> Vec<Standing> {
        (1..=n)
            .map(|i| Standing::new(PlayerId::new(i), format!("P{}", i), 0, 0))
            .collect()
    }

    fn ids(round: &PairingRound) -> Vec<(u32, u32)> {
        round
            .pairings
            .iter()
            .map(|p| (p.id1.get(), p.id2.get()))
            .collect()
    }

    fn history(pairs: &[(u32, u32)]) -> MatchHistory {
        let mut h = MatchHistory::new();
        for &(a, b) in pairs {
            h.record(PlayerId::new(a), PlayerId::new(b));
        }
        h
    }

    #[test]
    fn test_matches_greedy_when_greedy_succeeds() {
        let h = history(&[(1, 2), (1, 3), (1, 4)]);
        let ranks = field(6);

        let expected = greedy::pair(&ranks, &h);
        let round = pair(&ranks, &h, BUDGET).unwrap();

        assert_eq!(expected.rematches, 0);
        assert_eq!(round, expected);
    }

    #[test]
    fn test_undoes_commitment_to_avoid_rematch() {
        // Greedy commits (1,2) and is left with the played pair (3,4).
        let round = pair(&field(4), &history(&[(3, 4)]), BUDGET).unwrap();

        assert_eq!(ids(&round), vec![(1, 3), (2, 4)]);
        assert_eq!(round.rematches, 0);
    }

    #[test]
    fn test_deep_backtrack() {
        // Every "natural" early choice leaves 5 and 6 together.
        let h = history(&[(5, 6), (1, 5), (1, 6), (2, 5), (2, 6)]);
        let round = pair(&field(6), &h, BUDGET).unwrap();

        assert_eq!(ids(&round), vec![(1, 2), (3, 5), (4, 6)]);
    }

    #[test]
    fn test_no_valid_pairing() {
        // Complete round robin among four players.
        let h = history(&[(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
        let err = pair(&field(4), &h, BUDGET).unwrap_err();

        assert!(matches!(err, PairingError::NoValidPairing));
    }

    #[test]
    fn test_odd_field_gives_lowest_possible_bye() {
        let round = pair(&field(5), &MatchHistory::new(), BUDGET).unwrap();

        assert_eq!(ids(&round), vec![(1, 2), (3, 4)]);
        assert_eq!(round.bye.map(|s| s.id.get()), Some(5));
    }

    #[test]
    fn test_odd_field_moves_bye_up_when_needed() {
        // 4 has met everyone else, so it sits out instead of 5.
        let h = history(&[(1, 4), (2, 4), (3, 4), (4, 5)]);
        let round = pair(&field(5), &h, BUDGET).unwrap();

        assert_eq!(ids(&round), vec![(1, 2), (3, 5)]);
        assert_eq!(round.bye.map(|s| s.id.get()), Some(4));
    }

    #[test]
    fn test_budget_exceeded() {
        let err = pair(&field(4), &history(&[(3, 4)]), 1).unwrap_err();

        assert!(matches!(err, PairingError::SearchBudgetExceeded(1)));
    }

    #[test]
    fn test_large_field_does_not_exhaust_stack() {
        let ranks = field(50_001);
        let round = pair(&ranks, &MatchHistory::new(), BUDGET).unwrap();

        assert_eq!(round.pairings.len(), 25_000);
        assert_eq!(round.pairings[24_999].ids(), (PlayerId::new(49_999), PlayerId::new(50_000)));
        assert_eq!(round.bye.map(|s| s.id.get()), Some(50_001));
    }

    #[test]
    fn test_empty_field() {
        let round = pair(&[], &MatchHistory::new(), BUDGET).unwrap();
        assert_eq!(round, PairingRound::default());
    }
}
