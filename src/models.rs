use serde::{Deserialize, Serialize};

/// An employee record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: String,
    pub salary: f64,
}

/// Request body for creating an employee
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub salary: f64,
}

/// Request body for updating an employee
///
/// Only these three fields are accepted; anything else submitted in the
/// body is silently discarded. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
}

impl UpdateEmployee {
    /// True when no whitelisted field was submitted
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.department.is_none() && self.salary.is_none()
    }
}

/// Response wrapper for the single-employee endpoints
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct EmployeeResponse {
    pub employee: Employee,
}

/// Response wrapper for the list endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListResponse {
    pub employees: Vec<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_ignores_unknown_fields() {
        let body = serde_json::json!({
            "department": "Sales",
            "id": "should-be-ignored",
            "role": "should-be-ignored"
        });

        let update: UpdateEmployee = serde_json::from_value(body).unwrap();
        assert_eq!(update.department.as_deref(), Some("Sales"));
        assert!(update.name.is_none());
        assert!(update.salary.is_none());
    }

    #[test]
    fn test_update_empty_body() {
        let update: UpdateEmployee = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_new_employee_rejects_non_numeric_salary() {
        let body = serde_json::json!({
            "name": "Ana",
            "department": "Eng",
            "salary": "ninety thousand"
        });

        let result: Result<NewEmployee, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }
}
