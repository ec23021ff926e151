//! Field-level validation rules for employee records.
//!
//! The rules are pure: the reference date is passed in rather than read from
//! the clock, so the same input always yields the same verdict. Each field is
//! checked independently and every failing field is reported.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Department, EmployeeInput, NewEmployee};

/// Field name (as it appears in JSON) mapped to a human-readable message.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub const MAX_EMPLOYEE_ID_LEN: usize = 10;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Message constants, shared with tests and the HTTP layer.
pub mod messages {
    pub const FIRSTNAME_REQUIRED: &str = "First Name is required.";
    pub const EMPLOYEE_ID_REQUIRED: &str = "Employee ID is required.";
    pub const EMPLOYEE_ID_TOO_LONG: &str = "Employee ID must be 10 characters or less.";
    pub const EMAIL_REQUIRED: &str = "Email is required.";
    pub const EMAIL_INVALID: &str = "Invalid email format.";
    pub const PHONE_REQUIRED: &str = "Phone number is required.";
    pub const PHONE_INVALID: &str = "Phone number must be a 10-digit number.";
    pub const DEPARTMENT_REQUIRED: &str = "Please select a department.";
    pub const DEPARTMENT_INVALID: &str =
        "Department must be one of: HR, Engineering, Marketing, Finance, Sales.";
    pub const DATE_REQUIRED: &str = "Date of Joining is required.";
    pub const DATE_INVALID: &str = "Date of Joining must be a valid date (yyyy-mm-dd).";
    pub const DATE_IN_FUTURE: &str = "Date of Joining cannot be a future date.";
    pub const ROLE_REQUIRED: &str = "Role is required.";
}

use messages::*;

/// The server's current calendar date, used as the reference for `dateOfJoining`.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Check an input and convert it into typed employee data.
///
/// On failure the error map holds one message per failing field. Values are
/// checked and kept exactly as submitted, so a browser form running the same
/// rules reaches the same verdict.
pub fn validate(input: &EmployeeInput, today: NaiveDate) -> Result<NewEmployee, FieldErrors> {
    let mut errors = FieldErrors::new();

    let firstname = collect(&mut errors, "firstname", required(&input.firstname, FIRSTNAME_REQUIRED));
    let employee_id = collect(&mut errors, "employeeId", check_employee_id(&input.employee_id));
    let email = collect(&mut errors, "email", check_email(&input.email));
    let phone_number = collect(&mut errors, "phoneNumber", check_phone_number(&input.phone_number));
    let department = collect(&mut errors, "department", check_department(&input.department));
    let date_of_joining = collect(
        &mut errors,
        "dateOfJoining",
        check_date_of_joining(&input.date_of_joining, today),
    );
    let role = collect(&mut errors, "role", required(&input.role, ROLE_REQUIRED));

    match (firstname, employee_id, email, phone_number, department, date_of_joining, role) {
        (
            Some(firstname),
            Some(employee_id),
            Some(email),
            Some(phone_number),
            Some(department),
            Some(date_of_joining),
            Some(role),
        ) => Ok(NewEmployee {
            firstname,
            lastname: input.lastname.clone(),
            employee_id,
            email,
            phone_number,
            department,
            date_of_joining,
            role,
        }),
        _ => Err(errors),
    }
}

fn collect<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    result: Result<T, &'static str>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(field, message.to_string());
            None
        }
    }
}

fn required(value: &str, message: &'static str) -> Result<String, &'static str> {
    if value.is_empty() {
        Err(message)
    } else {
        Ok(value.to_string())
    }
}

fn check_employee_id(value: &str) -> Result<String, &'static str> {
    let id = required(value, EMPLOYEE_ID_REQUIRED)?;
    if id.chars().count() > MAX_EMPLOYEE_ID_LEN {
        return Err(EMPLOYEE_ID_TOO_LONG);
    }
    Ok(id)
}

fn check_email(value: &str) -> Result<String, &'static str> {
    let email = required(value, EMAIL_REQUIRED)?;
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(EMAIL_INVALID);
    }
    Ok(email)
}

fn check_phone_number(value: &str) -> Result<String, &'static str> {
    let phone = required(value, PHONE_REQUIRED)?;
    if !PHONE_PATTERN.is_match(&phone) {
        return Err(PHONE_INVALID);
    }
    Ok(phone)
}

fn check_department(value: &str) -> Result<Department, &'static str> {
    required(value, DEPARTMENT_REQUIRED)?
        .parse()
        .map_err(|_| DEPARTMENT_INVALID)
}

fn check_date_of_joining(value: &str, today: NaiveDate) -> Result<NaiveDate, &'static str> {
    let raw = required(value, DATE_REQUIRED)?;
    let date = NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| DATE_INVALID)?;
    if date > today {
        return Err(DATE_IN_FUTURE);
    }
    Ok(date)
}
