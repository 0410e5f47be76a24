//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type returned by the stores,
//! the services, and the HTTP handlers. Every failure mode of the API maps to
//! one variant, and each variant maps to exactly one HTTP status.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers and
//! middleware can return it directly. `From` implementations exist for the
//! library errors the crate encounters (`sqlx`, `validator`, `jsonwebtoken`,
//! `bcrypt`, and tokio's `JoinError`), which lets every layer use `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Convenience alias used by the stores and services.
pub type AppResult<T> = Result<T, AppError>;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A required field is missing, empty, or malformed (HTTP 400).
    Validation(String),
    /// A unique value (the email address) is already taken (HTTP 400).
    Conflict(String),
    /// The task id does not belong to the authenticated user (HTTP 400).
    NotFound(String),
    /// A list query had nothing to return (HTTP 404).
    NoTasks(String),
    /// Login with an unknown email or a wrong password (HTTP 400).
    Authentication(String),
    /// The bearer token is missing, invalid, expired, or names a user that
    /// no longer exists (HTTP 401).
    Unauthorized(String),
    /// A failed operation reported to the client with a fixed message (HTTP 500).
    OperationFailed(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error from the database driver (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::NoTasks(msg) => write!(f, "No Tasks: {}", msg),
            AppError::Authentication(msg) => write!(f, "Authentication Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::OperationFailed(msg) => write!(f, "Operation Failed: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// The client-facing message. Server-side variants never leak their detail.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg)
            | AppError::NoTasks(msg)
            | AppError::Authentication(msg)
            | AppError::Unauthorized(msg)
            | AppError::OperationFailed(msg) => msg.as_str(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                "Internal server error"
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Conflict(_)
            | AppError::NotFound(_)
            | AppError::Authentication(_) => StatusCode::BAD_REQUEST,
            AppError::NoTasks(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::OperationFailed(_)
            | AppError::InternalServerError(_)
            | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        // Empty-list and server failures answer with `message`, the rest with `error`.
        let body = match self {
            AppError::NoTasks(_)
            | AppError::OperationFailed(_)
            | AppError::InternalServerError(_)
            | AppError::DatabaseError(_) => json!({ "message": self.public_message() }),
            _ => json!({ "error": self.public_message() }),
        };

        HttpResponse::build(status).json(body)
    }
}

/// Unique violations become `Conflict` (the only unique column is `users.email`);
/// everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Email already exists".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}
