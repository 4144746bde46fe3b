//! Greedy nearest-unplayed pairing.
//!
//! The top remaining player is paired with the closest player below it in
//! the standings that it has not met yet. Earlier commitments are never
//! revisited, so a late anchor can run out of fresh opponents; it is then
//! paired with the player directly below it and the rematch is counted.

use tracing::{debug, warn};

use crate::models::{Pairing, PairingRound, Standing};

use super::HistoryOracle;

pub(crate) fn pair<O>(ranks: &[Standing], oracle: &O) -> PairingRound
where
    O: HistoryOracle + ?Sized,
{
    let mut remaining: Vec<&Standing> = ranks.iter().collect();
    let mut round = PairingRound::default();

    while remaining.len() > 1 {
        let anchor = remaining.remove(0);

        let offset = match remaining
            .iter()
            .position(|candidate| !oracle.has_played(anchor.id, candidate.id))
        {
            Some(offset) => offset,
            None => {
                warn!(
                    "No unplayed opponent left for player {} ({}); forcing rematch",
                    anchor.id, anchor.name
                );
                round.rematches += 1;
                0
            }
        };

        let opponent = remaining.remove(offset);
        debug!(
            "Paired {} with {} ({} places down)",
            anchor.id,
            opponent.id,
            offset + 1
        );
        round.pairings.push(Pairing::new(anchor, opponent));
    }

    round.bye = remaining.pop().cloned();
    round
}
