pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;
use uuid::Uuid;

use crate::error::AppError;

/// Registers the `/api` routes. Expects to be mounted under a scope guarded
/// by `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register).service(auth::login).service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::get_completed_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::mark_task_as_done)
            .service(tasks::delete_task),
    );
}

/// A path segment that is not a UUID cannot name any task.
pub(crate) fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Task not found".into()))
}
