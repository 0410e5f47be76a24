use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::required;
use crate::error::AppError;

const TITLE_AND_DESCRIPTION_REQUIRED: &str = "Title and description are required";

/// A to-do item. Owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Whether the task has been completed.
    pub done: bool,
    /// The owning user. Ownership is never exposed to clients.
    #[serde(skip)]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, not yet completed `Task` owned by `owner_id`.
    pub fn new(fields: TaskFields, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            done: false,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Task body for create and update requests, as sent by the client.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A complete title/description pair. Updates replace both fields, so the
/// same type serves creation and replacement.
#[derive(Debug, Clone, Validate)]
pub struct TaskFields {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
}

impl TryFrom<TaskInput> for TaskFields {
    type Error = AppError;

    fn try_from(input: TaskInput) -> Result<Self, Self::Error> {
        let fields = TaskFields {
            title: required(input.title, TITLE_AND_DESCRIPTION_REQUIRED)?,
            description: required(input.description, TITLE_AND_DESCRIPTION_REQUIRED)?,
        };
        fields.validate()?;
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: Option<&str>, description: Option<&str>) -> TaskInput {
        TaskInput {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_task_creation() {
        let owner = Uuid::new_v4();
        let fields = TaskFields::try_from(input(Some("buy milk"), Some("2%"))).unwrap();

        let task = Task::new(fields, owner);
        assert_eq!(task.title, "buy milk");
        assert_eq!(task.description, "2%");
        assert_eq!(task.owner_id, owner);
        assert!(!task.done);
    }

    #[test]
    fn test_task_validation() {
        assert!(TaskFields::try_from(input(Some("title"), Some("description"))).is_ok());

        for (title, description) in [
            (None, Some("description")),
            (Some("title"), None),
            (Some(""), Some("description")),
            (Some("title"), Some("  ")),
        ] {
            match TaskFields::try_from(input(title, description)) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, TITLE_AND_DESCRIPTION_REQUIRED),
                other => panic!("expected validation error, got {:?}", other),
            }
        }

        let long_title = "a".repeat(201);
        assert!(matches!(
            TaskFields::try_from(input(Some(&long_title), Some("description"))),
            Err(AppError::Validation(_))
        ));

        let long_description = "b".repeat(1001);
        assert!(matches!(
            TaskFields::try_from(input(Some("title"), Some(&long_description))),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_owner_is_not_serialized() {
        let owner = Uuid::new_v4();
        let fields = TaskFields::try_from(input(Some("title"), Some("description"))).unwrap();
        let json = serde_json::to_value(Task::new(fields, owner)).unwrap();

        assert!(json.get("owner_id").is_none());
        assert_eq!(json["done"], false);
    }
}
