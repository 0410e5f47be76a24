use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput},
    routes::parse_task_id,
    services::TaskService,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;

fn task_response(message: &str, task: Task) -> serde_json::Value {
    json!({ "message": message, "task": task })
}

/// Lists the authenticated user's incomplete tasks.
///
/// ## Responses:
/// - `200 OK`: `{message, tasks}` with every task whose `done` is false.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: the user has no tasks at all, or none are incomplete.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let no_tasks = || AppError::NoTasks("No tasks found for the user".into());

    if tasks.count_tasks(&user).await? == 0 {
        return Err(no_tasks());
    }

    let todo = tasks.get_all_tasks(&user, false).await?;
    if todo.is_empty() {
        return Err(no_tasks());
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Tasks retrieved successfully",
        "tasks": todo
    })))
}

/// Lists the authenticated user's completed tasks.
///
/// ## Responses:
/// - `200 OK`: `{message, tasks}`.
/// - `404 Not Found`: no completed tasks.
#[get("/completed-tasks")]
pub async fn get_completed_tasks(
    tasks: web::Data<TaskService>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let completed = tasks.get_completed_tasks(&user).await?;
    if completed.is_empty() {
        return Err(AppError::NoTasks(
            "No completed tasks found for the user".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Completed tasks retrieved successfully",
        "tasks": completed
    })))
}

/// Creates a task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-empty, at most 200 characters.
/// - `description`: required, non-empty, at most 1000 characters.
///
/// ## Responses:
/// - `201 Created`: `{message, task}` with `done` set to false.
/// - `500 Internal Server Error`: `{message: "Failed to add task"}` when a field
///   is missing or invalid, or the store failed.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .add_task(&user, task_data.into_inner())
        .await
        .map_err(|e| {
            log::error!("Adding a task for user {} failed: {}", user.id, e);
            AppError::OperationFailed("Failed to add task".into())
        })?;
    Ok(HttpResponse::Created().json(task_response("Task added successfully", task)))
}

/// Replaces the title and description of one of the user's tasks.
///
/// Both fields are required; there is no partial update.
#[put("/{task_id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_id: web::Path<String>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&task_id)?;
    let task = tasks
        .update_task(&user, task_id, task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task_response("Task updated successfully", task)))
}

/// Marks one of the user's tasks as done. Repeating the call is harmless.
#[patch("/{task_id}/done")]
pub async fn mark_task_as_done(
    tasks: web::Data<TaskService>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&task_id)?;
    let task = tasks.mark_task_as_done(&user, task_id).await?;
    Ok(HttpResponse::Ok().json(task_response("Task marked as done", task)))
}

/// Deletes one of the user's tasks and returns it.
#[delete("/{task_id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&task_id)?;
    let task = tasks.delete_task(&user, task_id).await?;
    Ok(HttpResponse::Ok().json(task_response("Task deleted successfully", task)))
}
