//! Employee API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use super::{ApiResult, MessageResponse};
use crate::errors::AppError;
use crate::models::{Employee, EmployeeInput};
use crate::validation;
use crate::AppState;

pub const CREATED_MESSAGE: &str = "Employee added successfully!";
pub const UPDATED_MESSAGE: &str = "Employee updated successfully!";
pub const DELETED_MESSAGE: &str = "Employee deleted successfully!";

/// POST /submit-form - Create a new employee.
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<MessageResponse<Employee>> {
    let Json(input) = payload?;

    let employee = validation::validate(&input, validation::today()).map_err(|errors| {
        tracing::debug!("Rejected new employee: {:?}", errors);
        AppError::Validation(errors)
    })?;

    let created = state.repo.create_employee(&employee).await?;
    Ok(MessageResponse::with_data(CREATED_MESSAGE, created))
}

/// GET /api/employees - List all employees.
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.repo.list_employees().await?;
    Ok(Json(employees))
}

/// GET /api/employees/:id - Get a single employee.
pub async fn get_employee(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Employee>> {
    let Path(id) = path?;
    state
        .repo
        .get_employee(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
}

/// PUT /api/employees/:id - Replace an employee's fields.
pub async fn update_employee(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<MessageResponse<Employee>> {
    let Path(id) = path?;
    let Json(input) = payload?;

    let employee = validation::validate(&input, validation::today()).map_err(|errors| {
        tracing::debug!("Rejected update of employee {}: {:?}", id, errors);
        AppError::Validation(errors)
    })?;

    let updated = state.repo.update_employee(id, &employee).await?;
    Ok(MessageResponse::with_data(UPDATED_MESSAGE, updated))
}

/// DELETE /api/employees/:id - Delete an employee.
pub async fn delete_employee(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<MessageResponse<()>> {
    let Path(id) = path?;
    state.repo.delete_employee(id).await?;
    Ok(MessageResponse::message_only(DELETED_MESSAGE))
}
