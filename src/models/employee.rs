//! Employee model and the request body it is built from.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Departments an employee can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    HR,
    Engineering,
    Marketing,
    Finance,
    Sales,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::HR,
        Department::Engineering,
        Department::Marketing,
        Department::Finance,
        Department::Sales,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::HR => "HR",
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::Finance => "Finance",
            Department::Sales => "Sales",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}

/// A persisted employee record.
///
/// `date_of_joining` serializes as `yyyy-mm-dd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub employee_id: String,
    pub email: String,
    pub phone_number: String,
    pub department: Department,
    pub date_of_joining: NaiveDate,
    pub role: String,
}

/// Raw request body for creating or updating an employee.
///
/// Every field defaults to an empty string so that omissions surface as
/// field-level validation messages rather than JSON decoding failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeInput {
    pub firstname: String,
    pub lastname: String,
    pub employee_id: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub date_of_joining: String,
    pub role: String,
}

/// Validated employee data, ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub firstname: String,
    pub lastname: String,
    pub employee_id: String,
    pub email: String,
    pub phone_number: String,
    pub department: Department,
    pub date_of_joining: NaiveDate,
    pub role: String,
}

impl NewEmployee {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            firstname: self.firstname,
            lastname: self.lastname,
            employee_id: self.employee_id,
            email: self.email,
            phone_number: self.phone_number,
            department: self.department,
            date_of_joining: self.date_of_joining,
            role: self.role,
        }
    }
}
