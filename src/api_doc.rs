use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{Employee, EmployeeResponse, ListResponse, NewEmployee, UpdateEmployee};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "employees-api",
        version = "1.0.0",
        description = "A minimal employee CRUD API backed by Google Cloud Spanner"
    ),
    paths(
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            UpdateEmployee,
            EmployeeResponse,
            ListResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "employees", description = "Employee record operations")
    )
)]
pub struct ApiDoc;
