//! Authentication primitives and the HTTP gate.
//!
//! `password` and `token` wrap bcrypt and jsonwebtoken; `middleware` rejects
//! requests without a valid bearer token; `extractors` hands the resolved
//! user to handlers.

pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

/// Body returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    /// The JWT to send as `Authorization: Bearer <token>`.
    pub token: String,
}
