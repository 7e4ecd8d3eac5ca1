//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks the asset store can be read

use crate::services::asset_service::AssetService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// `GET /healthz`
///
/// Liveness only. Answers 200 without touching the store.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Loads the backing store once. HTTP 200 with the asset count when that
/// works, HTTP 503 with the error otherwise. A missing or unparsable file
/// counts as ready (it reads as an empty collection).
pub async fn readyz(State(service): State<AssetService>) -> impl IntoResponse {
    match service.count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ok".into(),
                assets: Some(count),
                error: None,
            }),
        ),
        Err(err) => {
            tracing::warn!("readiness check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "error".into(),
                    assets: None,
                    error: Some(err.to_string()),
                }),
            )
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    assets: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}
