//! Database repository for employee CRUD operations.
//!
//! Uses prepared statements throughout. The conflict pre-check exists to give
//! callers a clear message; the UNIQUE constraints decide the outcome of races.

use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, CONFLICT_MESSAGE};
use crate::models::{Department, Employee, NewEmployee, UnknownDepartment};

const EMPLOYEE_COLUMNS: &str = "id, firstname, lastname, employee_id, email, phone_number, \
     department, date_of_joining, role";

/// Database repository for all data operations.
///
/// Owns the connection pool for the lifetime of the server; call
/// [`Repository::close`] once no more requests will be served.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the underlying pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ==================== UNIQUENESS ====================

    /// Whether any record other than `exclude_id` already uses `employee_id` or `email`.
    pub async fn check_conflict(
        &self,
        employee_id: &str,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let row = sqlx::query(
            r#"SELECT EXISTS(
                   SELECT 1 FROM employee_details
                   WHERE (employee_id = ?1 OR email = ?2)
                     AND (?3 IS NULL OR id <> ?3)
               ) AS conflict"#,
        )
        .bind(employee_id)
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        let conflict: i64 = row.try_get("conflict")?;
        Ok(conflict != 0)
    }

    // ==================== EMPLOYEE OPERATIONS ====================

    /// List all employees in creation order.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee_details ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(employee_from_row).collect()
    }

    /// Get an employee by ID.
    pub async fn get_employee(&self, id: i64) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee_details WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(employee_from_row).transpose()
    }

    /// Create a new employee.
    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, AppError> {
        if self
            .check_conflict(&employee.employee_id, &employee.email, None)
            .await?
        {
            return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
        }

        let result = sqlx::query(
            "INSERT INTO employee_details (firstname, lastname, employee_id, email, phone_number, department, date_of_joining, role) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&employee.firstname)
        .bind(&employee.lastname)
        .bind(&employee.employee_id)
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(employee.department.as_str())
        .bind(employee.date_of_joining)
        .bind(&employee.role)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::info!("Created employee {} ({})", id, employee.employee_id);

        Ok(employee.clone().with_id(id))
    }

    /// Overwrite every mutable field of an existing employee.
    pub async fn update_employee(
        &self,
        id: i64,
        employee: &NewEmployee,
    ) -> Result<Employee, AppError> {
        if self
            .check_conflict(&employee.employee_id, &employee.email, Some(id))
            .await?
        {
            return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
        }

        let result = sqlx::query(
            r#"UPDATE employee_details SET
                firstname = ?, lastname = ?, employee_id = ?, email = ?,
                phone_number = ?, department = ?, date_of_joining = ?, role = ?
            WHERE id = ?"#,
        )
        .bind(&employee.firstname)
        .bind(&employee.lastname)
        .bind(&employee.employee_id)
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(employee.department.as_str())
        .bind(employee.date_of_joining)
        .bind(&employee.role)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        tracing::info!("Updated employee {}", id);
        Ok(employee.clone().with_id(id))
    }

    /// Delete an employee.
    pub async fn delete_employee(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employee_details WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        tracing::info!("Deleted employee {}", id);
        Ok(())
    }
}

// ==================== ROW MAPPING ====================

fn employee_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Employee, AppError> {
    let department: Department = row
        .try_get::<String, _>("department")?
        .parse()
        .map_err(|UnknownDepartment(value)| {
            AppError::Database(format!("Unknown department stored: {}", value))
        })?;

    Ok(Employee {
        id: row.try_get("id")?,
        firstname: row.try_get("firstname")?,
        lastname: row.try_get("lastname")?,
        employee_id: row.try_get("employee_id")?,
        email: row.try_get("email")?,
        phone_number: row.try_get("phone_number")?,
        department,
        date_of_joining: row.try_get("date_of_joining")?,
        role: row.try_get("role")?,
    })
}
