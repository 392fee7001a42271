use crate::error::{ApiError, ErrorResponse};
use crate::models::ListResponse;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET /employees handler - List all employee records
///
/// No ordering is guaranteed.
#[utoipa::path(
    get,
    path = routes::EMPLOYEES,
    responses(
        (status = 200, description = "All employee records", body = ListResponse),
        (status = 404, description = "Store read failure", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let employees = state
        .store
        .list_all()
        .await
        .map_err(ApiError::ReadFailed)?;

    tracing::info!("Listed {} employees", employees.len());
    Ok((StatusCode::OK, Json(ListResponse { employees })))
}
