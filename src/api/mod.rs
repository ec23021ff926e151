//! REST API module.
//!
//! Contains the employee routes and handlers consumed by the browser client.

mod employees;

pub use employees::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response body for mutating operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

impl MessageResponse<()> {
    pub fn message_only(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for MessageResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type for handlers.
pub type ApiResult<T> = Result<T, crate::errors::AppError>;
