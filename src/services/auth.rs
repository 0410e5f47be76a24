use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenKeys;
use crate::error::{AppError, AppResult};
use crate::models::user::normalize_email;
use crate::models::User;
use crate::store::UserStore;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login body. Missing fields are treated as bad credentials.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Verifies credentials, issues bearer tokens, and resolves tokens back to users.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: TokenKeys,
    bcrypt_cost: u32,
    /// Compared against when the email is unknown, hashed at the same cost as
    /// real passwords so both paths take as long.
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: TokenKeys, bcrypt_cost: u32) -> Self {
        Self {
            users,
            keys,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Checks `email`/`password` and returns a signed token for the user.
    pub async fn login_user(&self, email: &str, password: &str) -> AppResult<String> {
        let invalid = || AppError::Authentication(INVALID_CREDENTIALS.into());

        let Some(user) = self.users.find_user_by_email(&normalize_email(email)).await? else {
            let dummy_hash = self
                .dummy_hash
                .get_or_try_init(|| hash_password("invalid-credentials", self.bcrypt_cost))
                .await?;
            verify_password(password, dummy_hash).await?;
            return Err(invalid());
        };

        if !verify_password(password, &user.password_hash).await? {
            return Err(invalid());
        }

        log::info!("User {} logged in", user.id);
        self.keys.generate_token(user.id)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<String> {
        match (request.email, request.password) {
            (Some(email), Some(password)) => self.login_user(&email, &password).await,
            _ => Err(AppError::Authentication(INVALID_CREDENTIALS.into())),
        }
    }

    /// Resolves a bearer token to the user it was issued for.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.keys.verify_token(token)?;
        self.users
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))
    }
}
