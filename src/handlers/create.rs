use crate::error::{ApiError, ErrorResponse};
use crate::models::{Employee, NewEmployee};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

/// POST /employees handler - Create an employee record
///
/// The store assigns the id; the response is the created record itself,
/// not wrapped in an envelope.
#[utoipa::path(
    post,
    path = routes::EMPLOYEES,
    request_body = NewEmployee,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 400, description = "Malformed or ill-typed request body", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(new) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    let employee = state
        .store
        .insert(new)
        .await
        .map_err(ApiError::WriteFailed)?;

    tracing::info!("Created employee with id: {}", employee.id);
    Ok((StatusCode::OK, Json(employee)))
}
