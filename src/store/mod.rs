//! Persistence seams for users and tasks.
//!
//! Every task operation takes the owner's id alongside the task id, so a task
//! can only be resolved inside the context of the user that owns it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Task, TaskFields, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user. Fails with `AppError::Conflict` when the email is taken.
    async fn insert_user(&self, user: User) -> AppResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Looks a user up by an already normalized email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> AppResult<bool>;
}

/// Task store. All lookups are scoped by `owner_id`.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: Task) -> AppResult<Task>;

    /// Tasks of one owner, oldest first, optionally filtered on `done`.
    async fn list_tasks(&self, owner_id: Uuid, done: Option<bool>) -> AppResult<Vec<Task>>;

    async fn count_tasks(&self, owner_id: Uuid) -> AppResult<i64>;

    /// Replaces title and description. `None` when the owner has no such task.
    async fn update_task(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        fields: TaskFields,
    ) -> AppResult<Option<Task>>;

    /// Sets `done = true`. `None` when the owner has no such task.
    async fn mark_done(&self, owner_id: Uuid, task_id: Uuid) -> AppResult<Option<Task>>;

    /// Removes the task record and returns it. `None` when the owner has no such task.
    async fn delete_task(&self, owner_id: Uuid, task_id: Uuid) -> AppResult<Option<Task>>;
}

/// A backend that provides both stores.
pub trait Store: UserStore + TaskStore {
    /// Short backend name reported by the health check.
    fn backend(&self) -> &'static str;
}
