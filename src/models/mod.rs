pub mod task;
pub mod user;

pub use task::{Task, TaskFields, TaskInput};
pub use user::{NewUser, RegisterRequest, User, UserResponse};

use crate::error::AppError;

/// Rejects a missing or whitespace-only field; the value itself is kept as sent.
pub(crate) fn required(field: Option<String>, message: &str) -> Result<String, AppError> {
    field
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}
