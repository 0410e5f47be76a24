use std::sync::Arc;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::models::{user::normalize_email, NewUser, RegisterRequest, User};
use crate::store::UserStore;

/// Onboards new accounts.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Rejects a taken email, validates the rest of the request, hashes the
    /// password, and persists the user.
    ///
    /// A taken email wins over missing fields. The `email_exists` check only
    /// short-circuits the expensive hash; the store's unique constraint decides
    /// races between concurrent registrations.
    pub async fn register_user(&self, request: RegisterRequest) -> AppResult<User> {
        if let Some(email) = request.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if self.users.email_exists(&normalize_email(email)).await? {
                return Err(AppError::Conflict("Email already exists".into()));
            }
        }

        let new_user = NewUser::try_from(request)?;

        let password_hash = hash_password(&new_user.password, self.bcrypt_cost).await?;
        let user = self.users.insert_user(User::new(new_user, password_hash)).await?;

        log::info!("Registered user {}", user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn request(firstname: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            firstname: Some(firstname.to_string()),
            lastname: Some("Liddell".to_string()),
            email: Some(email.to_string()),
            password: Some("pw".to_string()),
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new()), 4)
    }

    #[actix_rt::test]
    async fn test_register_hashes_password() {
        let user = service().register_user(request("Alice", "a@x.com")).await.unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_ne!(user.password_hash, "pw");
        assert!(bcrypt::verify("pw", &user.password_hash).unwrap());
    }

    #[actix_rt::test]
    async fn test_duplicate_email_conflicts_regardless_of_other_fields() {
        let service = service();
        service.register_user(request("Alice", "a@x.com")).await.unwrap();

        for (firstname, email) in [("Alice", "a@x.com"), ("Bob", "a@x.com"), ("Carol", " A@X.COM")] {
            match service.register_user(request(firstname, email)).await {
                Err(AppError::Conflict(msg)) => assert_eq!(msg, "Email already exists"),
                other => panic!("expected conflict for {}, got {:?}", email, other),
            }
        }
    }

    #[actix_rt::test]
    async fn test_taken_email_is_reported_before_missing_fields() {
        let service = service();
        service.register_user(request("Alice", "a@x.com")).await.unwrap();

        let incomplete = RegisterRequest {
            lastname: None,
            password: None,
            ..request("Bob", "A@x.com")
        };

        match service.register_user(incomplete).await {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Email already exists"),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_missing_fields_are_rejected() {
        let incomplete = RegisterRequest {
            firstname: None,
            ..request("Alice", "a@x.com")
        };

        match service().register_user(incomplete).await {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "All fields are required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
