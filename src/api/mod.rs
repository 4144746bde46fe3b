//! REST API endpoints.
//!
//! Axum-based HTTP API for registering players, reporting matches,
//! and reading standings and next-round pairings.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::pairing::PairingError;
use crate::storage::StorageError;

use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::UnknownPlayer(_) => ApiError::NotFound(e.to_string()),
            StorageError::SelfMatch(_) | StorageError::EmptyName => {
                ApiError::BadRequest(e.to_string())
            }
            StorageError::Pairing(inner) => inner.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<PairingError> for ApiError {
    fn from(e: PairingError) -> Self {
        ApiError::Conflict(e.to_string())
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route(
            "/api/players",
            post(routes::players::register_player).delete(routes::players::delete_players),
        )
        .route("/api/players/count", get(routes::players::count_players))
        .route(
            "/api/matches",
            post(routes::matches::report_match).delete(routes::matches::delete_matches),
        )
        .route("/api/standings", get(routes::standings::get_standings))
        .route("/api/pairings", get(routes::pairings::get_pairings))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}; allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;

    #[test]
    fn test_storage_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(StorageError::UnknownPlayer(PlayerId::new(9))),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::SelfMatch(PlayerId::new(1))),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::EmptyName),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(StorageError::Pairing(PairingError::NoValidPairing)),
            ApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_error_status_codes() {
        let resp = ApiError::Conflict("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(testing::setup_test_state(tmp.path()));

        let (status, _) = testing::get_json(app, "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
