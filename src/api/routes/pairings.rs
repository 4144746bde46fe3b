use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::config::PairingConfig;
use crate::models::{Pairing, Standing};
use crate::pairing::PairingStrategy;

#[derive(Debug, Deserialize)]
pub struct PairingsParams {
    /// Overrides the configured strategy for this request.
    pub strategy: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PairingsResponse {
    pub strategy: PairingStrategy,
    pub pairings: Vec<Pairing>,
    pub bye: Option<Standing>,
    pub rematches: u32,
}

pub async fn get_pairings(
    State(state): State<AppState>,
    Query(params): Query<PairingsParams>,
) -> Result<Json<PairingsResponse>, ApiError> {
    let mut config: PairingConfig = (*state.pairing).clone();
    if let Some(strategy) = params.strategy.as_deref() {
        config.strategy = strategy.parse().map_err(ApiError::BadRequest)?;
    }

    let store = state.store.read().await;
    let round = store.swiss_pairings(&config)?;

    Ok(Json(PairingsResponse {
        strategy: config.strategy,
        pairings: round.pairings,
        bye: round.bye,
        rematches: round.rematches,
    }))
}
