use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskFields, TaskInput, User};
use crate::store::TaskStore;

const TASK_NOT_FOUND: &str = "Task not found";

/// Ownership-scoped task operations. A task id is only ever resolved inside
/// the given user's tasks; ownership is the permission check.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    pub async fn add_task(&self, user: &User, input: TaskInput) -> AppResult<Task> {
        let fields = TaskFields::try_from(input)?;
        let task = self.tasks.insert_task(Task::new(fields, user.id)).await?;
        log::debug!("User {} added task {}", user.id, task.id);
        Ok(task)
    }

    /// Deletes the task record itself, not only the user's reference to it.
    pub async fn delete_task(&self, user: &User, task_id: Uuid) -> AppResult<Task> {
        let task = self
            .tasks
            .delete_task(user.id, task_id)
            .await?
            .ok_or_else(not_found)?;
        log::debug!("User {} deleted task {}", user.id, task.id);
        Ok(task)
    }

    /// Idempotent: an already completed task is returned unchanged.
    pub async fn mark_task_as_done(&self, user: &User, task_id: Uuid) -> AppResult<Task> {
        self.tasks
            .mark_done(user.id, task_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Replaces title and description; both must be present and non-empty.
    pub async fn update_task(
        &self,
        user: &User,
        task_id: Uuid,
        input: TaskInput,
    ) -> AppResult<Task> {
        let fields = TaskFields::try_from(input)?;
        self.tasks
            .update_task(user.id, task_id, fields)
            .await?
            .ok_or_else(not_found)
    }

    /// The user's tasks whose `done` flag equals `completed`.
    pub async fn get_all_tasks(&self, user: &User, completed: bool) -> AppResult<Vec<Task>> {
        self.tasks.list_tasks(user.id, Some(completed)).await
    }

    pub async fn get_completed_tasks(&self, user: &User) -> AppResult<Vec<Task>> {
        self.get_all_tasks(user, true).await
    }

    pub async fn count_tasks(&self, user: &User) -> AppResult<i64> {
        self.tasks.count_tasks(user.id).await
    }
}

fn not_found() -> AppError {
    AppError::NotFound(TASK_NOT_FOUND.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn user(email: &str) -> User {
        User::new(
            NewUser {
                firstname: "Test".to_string(),
                lastname: "User".to_string(),
                email: email.to_string(),
                password: String::new(),
            },
            "hash".to_string(),
        )
    }

    fn input(title: &str, description: &str) -> TaskInput {
        TaskInput {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
        }
    }

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryStore::new()))
    }

    #[actix_rt::test]
    async fn test_new_task_is_open_until_marked_done() {
        let service = service();
        let alice = user("a@x.com");
        let task = service.add_task(&alice, input("buy milk", "2%")).await.unwrap();
        assert!(!task.done);

        let open = service.get_all_tasks(&alice, false).await.unwrap();
        assert_eq!(open, vec![task.clone()]);
        assert!(service.get_completed_tasks(&alice).await.unwrap().is_empty());

        let done = service.mark_task_as_done(&alice, task.id).await.unwrap();
        assert!(done.done);
        assert!(service.get_all_tasks(&alice, false).await.unwrap().is_empty());
        assert_eq!(service.get_completed_tasks(&alice).await.unwrap(), vec![done]);
    }

    #[actix_rt::test]
    async fn test_mark_done_is_idempotent() {
        let service = service();
        let alice = user("a@x.com");
        let task = service.add_task(&alice, input("t", "d")).await.unwrap();

        let first = service.mark_task_as_done(&alice, task.id).await.unwrap();
        let second = service.mark_task_as_done(&alice, task.id).await.unwrap();

        assert_eq!(first, second);
        assert!(second.done);
    }

    #[actix_rt::test]
    async fn test_add_task_requires_both_fields() {
        let service = service();
        let alice = user("a@x.com");

        let missing = TaskInput {
            title: Some("t".to_string()),
            description: None,
        };
        assert!(matches!(
            service.add_task(&alice, missing).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(service.count_tasks(&alice).await.unwrap(), 0);
    }

    #[actix_rt::test]
    async fn test_update_replaces_both_fields_and_rejects_empty() {
        let service = service();
        let alice = user("a@x.com");
        let task = service.add_task(&alice, input("old", "old")).await.unwrap();

        let updated = service
            .update_task(&alice, task.id, input("new title", "new description"))
            .await
            .unwrap();
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.description, "new description");

        let result = service.update_task(&alice, task.id, input("", "x")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let open = service.get_all_tasks(&alice, false).await.unwrap();
        assert_eq!(open[0].title, "new title");
    }

    #[actix_rt::test]
    async fn test_deleted_task_is_gone() {
        let service = service();
        let alice = user("a@x.com");
        let task = service.add_task(&alice, input("t", "d")).await.unwrap();

        let deleted = service.delete_task(&alice, task.id).await.unwrap();
        assert_eq!(deleted.id, task.id);
        assert!(service.get_all_tasks(&alice, false).await.unwrap().is_empty());

        for result in [
            service.delete_task(&alice, task.id).await,
            service.mark_task_as_done(&alice, task.id).await,
            service.update_task(&alice, task.id, input("t", "d")).await,
        ] {
            match result {
                Err(AppError::NotFound(msg)) => assert_eq!(msg, TASK_NOT_FOUND),
                other => panic!("expected not found, got {:?}", other),
            }
        }
    }

    #[actix_rt::test]
    async fn test_other_users_cannot_touch_a_task() {
        let service = service();
        let alice = user("a@x.com");
        let mallory = user("m@x.com");
        let task = service.add_task(&alice, input("private", "d")).await.unwrap();

        assert!(service.get_all_tasks(&mallory, false).await.unwrap().is_empty());
        assert!(matches!(
            service.mark_task_as_done(&mallory, task.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.update_task(&mallory, task.id, input("x", "y")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_task(&mallory, task.id).await,
            Err(AppError::NotFound(_))
        ));

        let untouched = service.get_all_tasks(&alice, false).await.unwrap();
        assert_eq!(untouched, vec![task]);
    }
}
