use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error response type
///
/// Every failing endpoint returns this shape, regardless of which
/// status code it carries.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps each failure class to the HTTP status the CRUD contract
/// requires: malformed ids and missing records are 404, rejected bodies
/// and failed writes are 400, failed reads are 404.
#[derive(Debug)]
pub enum ApiError {
    /// Path id fails the syntactic UUID check
    MalformedId(String),
    /// Well-formed id with no matching record
    NotFound(Uuid),
    /// Request body failed to deserialize into the whitelisted shape
    InvalidBody(String),
    /// Store failure on a read path (list, fetch)
    ReadFailed(anyhow::Error),
    /// Store failure on a write path (create, update, delete)
    WriteFailed(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::MalformedId(id) => (
                StatusCode::NOT_FOUND,
                format!("Invalid employee id: '{}'", id),
            ),
            ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "Employee not found".to_string())
            }
            ApiError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", detail),
            ),
            ApiError::ReadFailed(err) => {
                (StatusCode::NOT_FOUND, format!("Store error: {}", err))
            }
            ApiError::WriteFailed(err) => {
                (StatusCode::BAD_REQUEST, format!("Store error: {}", err))
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}
