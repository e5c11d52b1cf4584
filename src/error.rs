//! Typed errors and HTTP mapping.

use crate::service::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    DuplicateFavorite(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

/// JSON error body. Every error carries `msg`; validation failures also list the offending fields.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub msg: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid: Vec<String>,
}

impl ErrorBody {
    fn msg(msg: impl Into<String>) -> Self {
        ErrorBody {
            msg: msg.into(),
            missing: Vec::new(),
            invalid: Vec::new(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::DuplicateFavorite(_)
            | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => ErrorBody {
                msg: errors.to_string(),
                missing: errors.missing,
                invalid: errors.invalid,
            },
            AppError::Db(sqlx::Error::RowNotFound) => ErrorBody::msg("Not found"),
            err @ (AppError::Db(_) | AppError::Internal(_)) => {
                tracing::error!(error = %err, "request failed");
                ErrorBody::msg("Internal server error")
            }
            other => ErrorBody::msg(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
