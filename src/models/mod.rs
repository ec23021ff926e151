//! Data models for the employee records application.
//!
//! Field names serialize in camelCase to match the browser client's form fields.

mod employee;

pub use employee::*;
