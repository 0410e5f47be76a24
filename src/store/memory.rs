use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, TaskStore, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskFields, User};

/// In-memory implementation of both stores, used when no database is
/// configured and throughout the test suites.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        // Plays the role of the `UNIQUE (email)` constraint.
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: Task) -> AppResult<Task> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, owner_id: Uuid, done: Option<bool>) -> AppResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|task| task.owner_id == owner_id)
            .filter(|task| done.map_or(true, |done| task.done == done))
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn count_tasks(&self, owner_id: Uuid) -> AppResult<i64> {
        let tasks = self.tasks.read().await;
        let count = tasks.values().filter(|task| task.owner_id == owner_id).count();
        Ok(count as i64)
    }

    async fn update_task(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        fields: TaskFields,
    ) -> AppResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .get_mut(&task_id)
            .filter(|task| task.owner_id == owner_id)
            .map(|task| {
                task.title = fields.title;
                task.description = fields.description;
                task.updated_at = Utc::now();
                task.clone()
            }))
    }

    async fn mark_done(&self, owner_id: Uuid, task_id: Uuid) -> AppResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .get_mut(&task_id)
            .filter(|task| task.owner_id == owner_id)
            .map(|task| {
                if !task.done {
                    task.done = true;
                    task.updated_at = Utc::now();
                }
                task.clone()
            }))
    }

    async fn delete_task(&self, owner_id: Uuid, task_id: Uuid) -> AppResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        match tasks.get(&task_id) {
            Some(task) if task.owner_id == owner_id => Ok(tasks.remove(&task_id)),
            _ => Ok(None),
        }
    }
}

impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }
}
