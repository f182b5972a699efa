use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CreateTaskRequest, TaskFilter, UpdateTaskRequest};
use super::repo_types::Task;
use super::services::{validate_new_task, validate_task_changes};
use crate::{
    error::AppError,
    events::{dto::MessageResponse, repo_types::Event},
    extract::{IdPath, JsonBody, QueryParams},
    state::AppState,
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/:id/tasks",
            get(list_event_tasks).post(create_task),
        )
        .route(
            "/tasks/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/tasks/:id/toggle", patch(toggle_task))
}

#[instrument(skip(state, payload))]
pub async fn create_task(
    State(state): State<AppState>,
    IdPath(event_id): IdPath,
    JsonBody(payload): JsonBody<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let new_task = validate_new_task(event_id, payload)?;

    let mut tx = state.db.begin().await?;
    if Event::find(&mut *tx, event_id).await?.is_none() {
        return Err(AppError::not_found("Event not found"));
    }
    let task = Task::create(&mut *tx, &new_task).await?;
    tx.commit().await?;

    info!(task_id = %task.id, %event_id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(skip(state))]
pub async fn list_event_tasks(
    State(state): State<AppState>,
    IdPath(event_id): IdPath,
    QueryParams(filter): QueryParams<TaskFilter>,
) -> Result<Json<Vec<Task>>, AppError> {
    let mut tx = state.db.begin().await?;
    if Event::find(&mut *tx, event_id).await?.is_none() {
        return Err(AppError::not_found("Event not found"));
    }
    let tasks = Task::list_for_event(&mut *tx, event_id, filter.completed).await?;
    tx.commit().await?;
    Ok(Json(tasks))
}

#[instrument(skip(state))]
pub async fn get_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Task>, AppError> {
    let task = Task::find(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;
    Ok(Json(task))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let changes = validate_task_changes(payload)?;

    let mut tx = state.db.begin().await?;
    let task = Task::update(&mut *tx, id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;
    tx.commit().await?;

    info!(task_id = %id, "task updated");
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn toggle_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Task>, AppError> {
    let mut tx = state.db.begin().await?;
    let task = Task::toggle(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;
    tx.commit().await?;

    info!(task_id = %id, completed = task.completed, "task toggled");
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    if !Task::delete(&mut *tx, id).await? {
        return Err(AppError::not_found("Task not found"));
    }
    tx.commit().await?;

    info!(task_id = %id, "task deleted");
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".into(),
    }))
}
