//! Application assembly shared by the binary and the integration tests.

use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::auth::{AuthMiddleware, TokenKeys};
use crate::config::Config;
use crate::error::AppError;
use crate::routes;
use crate::services::{AuthService, TaskService, UserService};
use crate::store::{MemoryStore, PgStore, Store};

/// Name of the store backend, exposed by the health check.
#[derive(Debug, Clone, Copy)]
pub struct StoreInfo {
    pub backend: &'static str,
}

/// The services every worker shares.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub users: web::Data<UserService>,
    pub tasks: web::Data<TaskService>,
    pub store: web::Data<StoreInfo>,
}

impl AppState {
    /// Wires the services onto one store backend.
    pub fn new<S: Store + 'static>(store: S, config: &Config) -> Self {
        let store = Arc::new(store);
        let info = StoreInfo {
            backend: store.backend(),
        };

        Self {
            auth: web::Data::new(AuthService::new(
                store.clone(),
                TokenKeys::from_config(config),
                config.bcrypt_cost,
            )),
            users: web::Data::new(UserService::new(store.clone(), config.bcrypt_cost)),
            tasks: web::Data::new(TaskService::new(store)),
            store: web::Data::new(info),
        }
    }

    /// Connects to PostgreSQL when `DATABASE_URL` is configured, otherwise
    /// falls back to the in-memory store.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        match &config.database_url {
            Some(url) => {
                let store = PgStore::connect(url).await?;
                log::info!("Using PostgreSQL store");
                Ok(Self::new(store, config))
            }
            None => {
                log::warn!("DATABASE_URL not set; using in-memory store, data will not persist");
                Ok(Self::new(MemoryStore::new(), config))
            }
        }
    }

    /// Registers shared data, the health check, and the guarded `/api` scope.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.users.clone())
            .app_data(self.tasks.clone())
            .app_data(self.store.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(self.auth.clone()))
                    .configure(routes::config),
            );
    }
}

/// Malformed or non-JSON bodies are reported as validation errors.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Invalid JSON body: {}", err)).into()
}
