//! Tournament operations over the JSONL files.

use tracing::{debug, info};

use crate::config::PairingConfig;
use crate::models::{MatchRecord, PairingRound, Player, PlayerId, Standing};
use crate::pairing::{pair_round, MatchHistory};
use crate::standings::compute_standings;

use super::{JsonlReader, JsonlWriter, StorageConfig, StorageError};

/// Player registry and match log for one tournament.
///
/// Every operation opens the files it needs and releases them before
/// returning; pairing loads the whole history once up front.
#[derive(Debug, Clone)]
pub struct TournamentStore {
    config: StorageConfig,
}

impl TournamentStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// All registered players, in registration order.
    pub fn players(&self) -> Result<Vec<Player>, StorageError> {
        JsonlReader::new(self.config.players_path()).read_all()
    }

    /// The complete match log.
    pub fn matches(&self) -> Result<Vec<MatchRecord>, StorageError> {
        JsonlReader::new(self.config.matches_path()).read_all()
    }

    /// Register a new player. The name need not be unique.
    pub fn register_player(&self, name: &str) -> Result<Player, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyName);
        }

        let player = Player::new(self.next_player_id()?, name.to_string());
        JsonlWriter::new(self.config.players_path()).append(&player)?;

        info!("Registered player {} ({})", player.id, player.name);
        Ok(player)
    }

    /// Number of registered players.
    pub fn count_players(&self) -> Result<usize, StorageError> {
        Ok(self.players()?.len())
    }

    /// Remove every player. Returns how many were removed.
    pub fn delete_players(&self) -> Result<usize, StorageError> {
        let removed = self.count_players()?;
        JsonlWriter::<Player>::new(self.config.players_path()).write_all(&[])?;

        info!("Deleted {} players", removed);
        Ok(removed)
    }

    /// Remove every match record. Returns how many were removed.
    pub fn delete_matches(&self) -> Result<usize, StorageError> {
        let removed = self.matches()?.len();
        JsonlWriter::<MatchRecord>::new(self.config.matches_path()).write_all(&[])?;

        info!("Deleted {} matches", removed);
        Ok(removed)
    }

    /// Record the outcome of a single match.
    pub fn report_match(
        &self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord, StorageError> {
        if winner == loser {
            return Err(StorageError::SelfMatch(winner));
        }

        let players = self.players()?;
        for id in [winner, loser] {
            if !players.iter().any(|p| p.id == id) {
                return Err(StorageError::UnknownPlayer(id));
            }
        }

        let record = MatchRecord::new(winner, loser);
        JsonlWriter::new(self.config.matches_path()).append(&record)?;

        info!("Recorded match: {} beat {}", winner, loser);
        Ok(record)
    }

    /// Current standings, best record first.
    pub fn player_standings(&self) -> Result<Vec<Standing>, StorageError> {
        Ok(compute_standings(&self.players()?, &self.matches()?))
    }

    /// Who has played whom, loaded from the match log.
    pub fn match_history(&self) -> Result<MatchHistory, StorageError> {
        Ok(MatchHistory::from_matches(&self.matches()?))
    }

    /// Pair the next round from the current standings.
    pub fn swiss_pairings(&self, pairing: &PairingConfig) -> Result<PairingRound, StorageError> {
        let players = self.players()?;
        let matches = self.matches()?;

        let standings = compute_standings(&players, &matches);
        let history = MatchHistory::from_matches(&matches);
        debug!(
            "Pairing {} players against {} distinct past pairings",
            standings.len(),
            history.len()
        );

        Ok(pair_round(&standings, &history, pairing)?)
    }

    /// One past the highest id in either file, so ids stay unique even
    /// after players are deleted while their matches remain. Both files are
    /// read strictly: a skipped line could hide the highest id.
    fn next_player_id(&self) -> Result<PlayerId, StorageError> {
        let players: Vec<Player> = JsonlReader::new(self.config.players_path()).read_strict()?;
        let matches: Vec<MatchRecord> =
            JsonlReader::new(self.config.matches_path()).read_strict()?;

        let highest = players
            .iter()
            .map(|p| p.id)
            .chain(matches.iter().flat_map(|m| [m.winner, m.loser]))
            .max();

        match highest {
            None => Ok(PlayerId::new(1)),
            Some(id) => id.next().ok_or(StorageError::IdsExhausted),
        }
    }
}
