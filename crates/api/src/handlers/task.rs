//! Handlers for `/tasks`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskboard_core::types::DbId;
use taskboard_db::models::TaskRequest;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::TaskListParams;
use crate::state::AppState;

/// GET /api/v1/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let page = state.tasks.list_tasks(&params.into()).await?;
    Ok(Json(page))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = state.tasks.get_task_by_id(id).await?;
    Ok(Json(task))
}

/// POST /api/v1/tasks
///
/// Fails with 404 when `categoryId` does not name an existing category.
pub async fn create_task(
    State(state): State<AppState>,
    AppJson(input): AppJson<TaskRequest>,
) -> AppResult<impl IntoResponse> {
    let task = state.tasks.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/v1/tasks/{id}
///
/// Replaces name, description, status and category in one go.
pub async fn update_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<TaskRequest>,
) -> AppResult<impl IntoResponse> {
    let task = state.tasks.update_task(id, input).await?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.tasks.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
