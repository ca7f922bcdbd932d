use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::MutexGuard;
use tracing::info;

use super::AppState;
use super::errors::AppError;
use crate::db::Database;
use crate::models::Task;

fn lock_db(state: &AppState) -> Result<MutexGuard<'_, Database>, AppError> {
    state
        .db
        .lock()
        .map_err(|e| AppError::Internal(format!("database lock poisoned: {e}")))
}

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let db = lock_db(&state)?;
    let tasks = db.list_tasks().map_err(AppError::Internal)?;
    Ok(Json(tasks))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let Json(mut task) = body?;
    if task.title().trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    task.fill_defaults();
    let db = lock_db(&state)?;
    let created = db.insert_task(&task).map_err(AppError::Internal)?;
    info!(id = ?created.id(), "created task");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let db = lock_db(&state)?;
    db.get_task(&id)
        .map_err(AppError::Internal)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("task not found: {id}")))
}

/// PUT /tasks/{id}: full-record overwrite.
pub async fn replace_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let Json(task) = body?;
    let db = lock_db(&state)?;
    if db.get_task(&id).map_err(AppError::Internal)?.is_none() {
        return Err(AppError::NotFound(format!("task not found: {id}")));
    }
    let stored = db.replace_task(&id, &task).map_err(AppError::Internal)?;
    info!(%id, "replaced task");
    Ok(Json(stored))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let db = lock_db(&state)?;
    if db.delete_task(&id).map_err(AppError::Internal)? {
        info!(%id, "deleted task");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("task not found: {id}")))
    }
}
