//! Handlers for `/categories`.
//!
//! Ids are taken from the path as raw strings so that a non-numeric id
//! reaches the service as "missing" and is reported like any other invalid id.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_db::models::{CreateCategory, UpdateCategory};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::CategoryListParams;
use crate::state::AppState;

fn parse_id(raw: &str) -> Option<DbId> {
    raw.trim().parse().ok()
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryListParams>,
) -> AppResult<impl IntoResponse> {
    let page = state.categories.list_categories(&params.into()).await?;
    Ok(Json(page))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories.get_category_by_id(parse_id(&id)).await?;
    Ok(Json(category))
}

/// POST /api/v1/categories
///
/// `name` must be present and non-blank.
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let category = state.categories.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
///
/// Partial update: omitted or null fields keep their stored value.
pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = state
        .categories
        .update_category(parse_id(&id), input)
        .await?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    state.categories.delete_category(parse_id(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
