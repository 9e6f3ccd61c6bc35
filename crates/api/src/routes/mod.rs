pub mod category;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tasks                 list, create
/// /tasks/{id}            get, update, delete
///
/// /categories            list, create
/// /categories/{id}       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tasks", task::router())
        .nest("/categories", category::router())
}
