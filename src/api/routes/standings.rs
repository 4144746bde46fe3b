use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Standing;

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub standings: Vec<Standing>,
}

pub async fn get_standings(
    State(state): State<AppState>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(StandingsResponse {
        standings: store.player_standings()?,
    }))
}
