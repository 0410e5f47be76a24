use crate::{
    auth::AuthResponse,
    error::AppError,
    models::{RegisterRequest, UserResponse},
    services::{auth::LoginRequest, AuthService, UserService},
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Creates an account and returns it without the password hash.
#[post("/register")]
pub async fn register(
    users: web::Data<UserService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = users.register_user(register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Registration successful",
        "user": UserResponse::from(user)
    })))
}

/// Login user
///
/// Checks the credentials and returns a bearer token.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth.login(login_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token,
    }))
}
