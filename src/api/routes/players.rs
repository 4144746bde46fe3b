use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Player;

#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: usize,
}

pub async fn register_player(
    State(state): State<AppState>,
    Json(req): Json<RegisterPlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let store = state.store.write().await;
    let player = store.register_player(&req.name)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn count_players(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(CountResponse {
        count: store.count_players()?,
    }))
}

pub async fn delete_players(
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let store = state.store.write().await;
    Ok(Json(DeletedResponse {
        deleted: store.delete_players()?,
    }))
}
