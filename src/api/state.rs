use std::sync::Arc;

use crate::config::PairingConfig;
use crate::storage::TournamentStore;

#[derive(Clone)]
pub struct AppState {
    /// Writers take the write lock so match reports and registrations
    /// never interleave with a pairing read.
    pub store: Arc<tokio::sync::RwLock<TournamentStore>>,
    pub pairing: Arc<PairingConfig>,
    pub cors_origin: String,
}
