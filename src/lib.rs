#![doc = "The `todoapi` library crate."]
#![doc = ""]
#![doc = "A multi-user to-do list API: account registration, bearer-token login, and"]
#![doc = "ownership-scoped task management over PostgreSQL or an in-memory store."]
#![doc = "The binary (`main.rs`) loads `Config`, builds an `AppState`, and serves it."]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use app::AppState;
pub use config::Config;
pub use error::AppError;
