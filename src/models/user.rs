use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::required;
use crate::error::AppError;

const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// A registered account as persisted in the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// bcrypt hash; never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(input: NewUser, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            firstname: input.firstname,
            lastname: input.lastname,
            email: input.email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Registration body as sent by the client. Every field is optional here so
/// that a missing field surfaces as a validation error rather than a JSON
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A registration request with every field present.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    pub password: String,
}

impl TryFrom<RegisterRequest> for NewUser {
    type Error = AppError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        let new_user = NewUser {
            firstname: required(request.firstname, ALL_FIELDS_REQUIRED)?,
            lastname: required(request.lastname, ALL_FIELDS_REQUIRED)?,
            email: normalize_email(&required(request.email, ALL_FIELDS_REQUIRED)?),
            password: required(request.password, ALL_FIELDS_REQUIRED)?,
        };
        new_user.validate()?;
        Ok(new_user)
    }
}

/// Emails are compared case-insensitively, so they are stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The public view of a user returned by `POST /api/register`.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
