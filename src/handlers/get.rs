use crate::error::{ApiError, ErrorResponse};
use crate::models::EmployeeResponse;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use uuid::Uuid;

/// GET /employees/:id handler - Fetch an employee record by id
///
/// A syntactically invalid id is rejected with 404 before the store is
/// touched; a well-formed id with no matching record is also 404.
#[utoipa::path(
    get,
    path = routes::EMPLOYEE_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the employee record")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Malformed id, record not found, or store read failure", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    let id = Uuid::parse_str(&id_str).map_err(|_| ApiError::MalformedId(id_str.clone()))?;

    match state.store.find(id).await.map_err(ApiError::ReadFailed)? {
        Some(employee) => {
            tracing::info!("Fetched employee with id: {}", id);
            Ok((StatusCode::OK, Json(EmployeeResponse { employee })))
        }
        None => {
            tracing::info!("Employee not found with id: {}", id);
            Err(ApiError::NotFound(id))
        }
    }
}
