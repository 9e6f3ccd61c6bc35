use std::sync::Arc;

use taskboard_db::memory::MemoryStore;
use taskboard_db::pg_store::{PgCategoryStore, PgTaskStore};
use taskboard_db::DbPool;

use crate::config::ServerConfig;
use crate::services::{CategoryService, TaskService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. `None` when running on the in-memory store.
    pub pool: Option<DbPool>,
    pub tasks: Arc<TaskService>,
    pub categories: Arc<CategoryService>,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn with_pool(pool: DbPool, config: &ServerConfig) -> Self {
        let mode = config.sort_field_mode;
        let task_store = Arc::new(PgTaskStore::new(pool.clone()));
        let category_store = Arc::new(PgCategoryStore::new(pool.clone()));

        Self {
            pool: Some(pool),
            tasks: Arc::new(TaskService::new(task_store, category_store.clone(), mode)),
            categories: Arc::new(CategoryService::new(category_store, mode)),
        }
    }

    /// State backed by a fresh [`MemoryStore`]. Data lives as long as the process.
    pub fn in_memory(config: &ServerConfig) -> Self {
        let mode = config.sort_field_mode;
        let store = Arc::new(MemoryStore::new());

        Self {
            pool: None,
            tasks: Arc::new(TaskService::new(store.clone(), store.clone(), mode)),
            categories: Arc::new(CategoryService::new(store, mode)),
        }
    }
}
