use crate::error::{ApiError, ErrorResponse};
use crate::models::EmployeeResponse;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use uuid::Uuid;

/// DELETE /employees/:id handler - Remove an employee record
///
/// The response carries the record as it stood before deletion.
#[utoipa::path(
    delete,
    path = routes::EMPLOYEE_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the employee record")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = EmployeeResponse),
        (status = 400, description = "Store write failure", body = ErrorResponse),
        (status = 404, description = "Malformed id or record not found", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    let id = Uuid::parse_str(&id_str).map_err(|_| ApiError::MalformedId(id_str.clone()))?;

    match state
        .store
        .delete(id)
        .await
        .map_err(ApiError::WriteFailed)?
    {
        Some(employee) => {
            tracing::info!("Deleted employee with id: {}", id);
            Ok((StatusCode::OK, Json(EmployeeResponse { employee })))
        }
        None => {
            tracing::info!("Employee not found with id: {}", id);
            Err(ApiError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_router;
    use crate::config::Config;
    use crate::models::Employee;
    use crate::store::EmployeeStore;
    use axum::{Router, body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn setup_test_app() -> Router {
        unsafe {
            std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
        }

        let config = Config {
            spanner_emulator_host: Some("localhost:9010".to_string()),
            spanner_project: "test-project".to_string(),
            spanner_instance: "delete-endpoint-test".to_string(),
            spanner_database: "delete-endpoint-test-db".to_string(),
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
        };

        let store = EmployeeStore::from_config(&config)
            .await
            .expect("Failed to create employee store");

        let state = AppState {
            store,
            config: Arc::new(config),
        };

        build_router(state)
    }

    async fn post_employee(app: &Router, name: &str, department: &str, salary: f64) -> Employee {
        let body = serde_json::json!({
            "name": name,
            "department": department,
            "salary": salary
        });

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/employees")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_delete_endpoint_returns_deleted_record() {
        let app = setup_test_app().await;

        let created = post_employee(&app, "Ana", "Eng", 90000.0).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/employees/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: EmployeeResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response_json.employee, created);

        // A subsequent fetch returns 404
        let get_response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/employees/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(get_response.status(), StatusCode::NOT_FOUND);

        unsafe {
            std::env::remove_var("SPANNER_EMULATOR_HOST");
        }
    }

    #[tokio::test]
    async fn test_delete_endpoint_twice() {
        let app = setup_test_app().await;

        let created = post_employee(&app, "Ben", "Eng", 80000.0).await;

        let first = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/employees/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/employees/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::NOT_FOUND);

        unsafe {
            std::env::remove_var("SPANNER_EMULATOR_HOST");
        }
    }

    #[tokio::test]
    async fn test_delete_endpoint_malformed_id() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/employees/123abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        unsafe {
            std::env::remove_var("SPANNER_EMULATOR_HOST");
        }
    }

    #[tokio::test]
    async fn test_delete_endpoint_not_found() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/employees/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        unsafe {
            std::env::remove_var("SPANNER_EMULATOR_HOST");
        }
    }
}
