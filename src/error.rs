// Request-level errors and their JSON renderings

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::utils::dates::InvalidPeriod;

/// One rejected query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid parameters")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    InvalidPeriod(#[from] InvalidPeriod),

    #[error("Failed to fetch affiliate data")]
    Upstream(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match self {
            AppError::Validation(errors) => json!({
                "success": false,
                "message": message,
                "errors": errors,
            }),
            AppError::InvalidPeriod(_) => json!({
                "success": false,
                "message": message,
            }),
            AppError::Upstream(cause) => {
                error!("Error fetching affiliate data: {:#}", cause);
                json!({
                    "success": false,
                    "message": message,
                    "error": format!("{:#}", cause),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
