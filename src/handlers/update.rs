use crate::error::{ApiError, ErrorResponse};
use crate::models::{EmployeeResponse, UpdateEmployee};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use uuid::Uuid;

/// PUT /employees/:id handler - Partially update an employee record
///
/// Only `name`, `department`, and `salary` are accepted from the body;
/// unknown fields are silently discarded and omitted fields keep their
/// current value. The response carries the post-update record.
#[utoipa::path(
    put,
    path = routes::EMPLOYEE_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the employee record")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Ill-typed request body or store write failure", body = ErrorResponse),
        (status = 404, description = "Malformed id or record not found", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<UpdateEmployee>, JsonRejection>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    let id = Uuid::parse_str(&id_str).map_err(|_| ApiError::MalformedId(id_str.clone()))?;

    let Json(changes) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    match state
        .store
        .update(id, changes)
        .await
        .map_err(ApiError::WriteFailed)?
    {
        Some(employee) => {
            tracing::info!("Updated employee with id: {}", id);
            Ok((StatusCode::OK, Json(EmployeeResponse { employee })))
        }
        None => {
            tracing::info!("Employee not found with id: {}", id);
            Err(ApiError::NotFound(id))
        }
    }
}
