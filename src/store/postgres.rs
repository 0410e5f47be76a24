use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, TaskStore, UserStore};
use crate::error::AppResult;
use crate::models::{Task, TaskFields, User};

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    firstname TEXT NOT NULL,
    lastname TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const CREATE_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    done BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const CREATE_TASKS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS tasks_owner_id_idx ON tasks (owner_id, created_at)";

const USER_COLUMNS: &str = "id, firstname, lastname, email, password_hash, created_at";
const TASK_COLUMNS: &str = "id, title, description, done, owner_id, created_at, updated_at";

/// PostgreSQL implementation of both stores.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to `database_url` and creates the schema if it is missing.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> AppResult<()> {
        for statement in [CREATE_USERS, CREATE_TASKS, CREATE_TASKS_OWNER_INDEX] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: User) -> AppResult<User> {
        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.firstname)
            .bind(&user.lastname)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let (exists,) =
            sqlx::query_as::<_, (bool,)>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, task: Task) -> AppResult<Task> {
        let sql = format!(
            "INSERT INTO tasks ({TASK_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {TASK_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.done)
            .bind(task.owner_id)
            .bind(task.created_at)
            .bind(task.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn list_tasks(&self, owner_id: Uuid, done: Option<bool>) -> AppResult<Vec<Task>> {
        // A NULL filter matches every task of the owner.
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE owner_id = $1 AND ($2::BOOLEAN IS NULL OR done = $2) \
             ORDER BY created_at, id"
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(done)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn count_tasks(&self, owner_id: Uuid) -> AppResult<i64> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM tasks WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_task(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        fields: TaskFields,
    ) -> AppResult<Option<Task>> {
        let sql = format!(
            "UPDATE tasks SET title = $3, description = $4, updated_at = NOW() \
             WHERE owner_id = $1 AND id = $2 RETURNING {TASK_COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(task_id)
            .bind(fields.title)
            .bind(fields.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn mark_done(&self, owner_id: Uuid, task_id: Uuid) -> AppResult<Option<Task>> {
        // Already-done tasks keep their updated_at.
        let sql = format!(
            "UPDATE tasks SET done = TRUE, \
             updated_at = CASE WHEN done THEN updated_at ELSE NOW() END \
             WHERE owner_id = $1 AND id = $2 RETURNING {TASK_COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_task(&self, owner_id: Uuid, task_id: Uuid) -> AppResult<Option<Task>> {
        let sql = format!("DELETE FROM tasks WHERE owner_id = $1 AND id = $2 RETURNING {TASK_COLUMNS}");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }
}

impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }
}
