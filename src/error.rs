//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. Every variant maps to one HTTP status and every error body is
//! rendered in the response envelope shape, so clients parse failures the
//! same way they parse successes.
//!
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`
//! and `bcrypt::BcryptError` let handlers bubble errors with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or unresolvable bearer token (HTTP 401).
    Unauthorized(String),
    /// Login rejected; absent user and wrong password are deliberately
    /// indistinguishable (HTTP 422, generic message).
    InvalidCredentials,
    /// Refresh token unknown or past its expiry; the two cases share one
    /// response (HTTP 401).
    InvalidRefreshToken,
    /// Ownership violation on a todo mutation (HTTP 403). Existence is not
    /// hidden, only the mutation is denied.
    Forbidden,
    /// Malformed request outside the validator's reach (HTTP 400).
    BadRequest(String),
    /// Requested resource absent or soft-deleted (HTTP 404).
    NotFound(String),
    /// Failed input validation, carrying field-level messages (HTTP 422).
    Validation(ValidationErrors),
    /// Error originating from database operations (HTTP 500).
    DatabaseError(String),
    /// Any other unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidCredentials => write!(f, "The provided credentials are incorrect."),
            AppError::InvalidRefreshToken => write!(f, "Invalid or expired refresh token"),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation Error: {}", errors),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) | AppError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredentials | AppError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Unauthorized(_) => ApiResponse::failure("Unauthenticated."),
            AppError::InvalidCredentials => ApiResponse::failure_with(
                "The provided credentials are incorrect.",
                json!({ "email": ["The provided credentials are incorrect."] }),
            ),
            AppError::InvalidRefreshToken => {
                ApiResponse::failure("Invalid or expired refresh token")
            }
            AppError::Forbidden => ApiResponse::failure("Forbidden"),
            AppError::BadRequest(msg) => ApiResponse::failure(msg.clone()),
            AppError::NotFound(msg) => ApiResponse::failure(msg.clone()),
            AppError::Validation(errors) => ApiResponse::failure_with(
                "The given data was invalid.",
                serde_json::to_value(errors).unwrap_or(serde_json::Value::Null),
            ),
            // Database detail stays in the logs, not in the response.
            AppError::DatabaseError(msg) | AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                ApiResponse::failure("Internal server error")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        AppError::Validation(errors)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
