use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::routes::players::DeletedResponse;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{MatchRecord, PlayerId};

#[derive(Debug, Deserialize)]
pub struct ReportMatchRequest {
    pub winner: PlayerId,
    pub loser: PlayerId,
}

pub async fn report_match(
    State(state): State<AppState>,
    Json(req): Json<ReportMatchRequest>,
) -> Result<(StatusCode, Json<MatchRecord>), ApiError> {
    let store = state.store.write().await;
    let record = store.report_match(req.winner, req.loser)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_matches(
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let store = state.store.write().await;
    Ok(Json(DeletedResponse {
        deleted: store.delete_matches()?,
    }))
}
