use crate::services::asset_service::AssetError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Message returned for any lookup of an id that is not in the collection.
pub const NOT_FOUND_MESSAGE: &str = "Asset not found";

/// Message returned for create/update payloads that cannot be used.
pub const INVALID_DATA_MESSAGE: &str = "Invalid data";

/// HTTP-facing error: a status code and the message rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    /// Shortcut for 400 Bad Request
    pub fn invalid_data() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_DATA_MESSAGE)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::NotFound(_) => AppError::not_found(),
            AssetError::InvalidInput => AppError::invalid_data(),
            AssetError::IdsExhausted(max_id) => {
                tracing::error!("cannot allocate an asset id above {}", max_id);
                AppError::internal(format!("no asset id left after {}", max_id))
            }
            AssetError::Store(err) => {
                tracing::error!("asset store failure: {}", err);
                AppError::internal(err.to_string())
            }
        }
    }
}

/// Bodies that are missing, not JSON, or the wrong shape are all invalid input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        AppError::invalid_data()
    }
}
