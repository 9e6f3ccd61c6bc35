//! PostgreSQL implementations of the store traits.
//!
//! Thin adapters that hold a pool and delegate to the zero-sized
//! repositories in [`crate::repositories`].

use async_trait::async_trait;
use taskboard_core::pagination::{Page, PageRequest};
use taskboard_core::types::DbId;

use crate::models::{Category, NewCategory, NewTask, Task};
use crate::repositories::{CategoryRepo, TaskRepo};
use crate::store::{CategoryStore, EntityStore, TaskStore};
use crate::DbPool;

/// Category store backed by the `categories` table.
#[derive(Clone)]
pub struct PgCategoryStore {
    pool: DbPool,
}

impl PgCategoryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Category> for PgCategoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        CategoryRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, new: NewCategory) -> Result<Category, sqlx::Error> {
        CategoryRepo::create(&self.pool, &new).await
    }

    async fn update(&self, entity: &Category) -> Result<Category, sqlx::Error> {
        CategoryRepo::update(&self.pool, entity)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error> {
        let deleted = CategoryRepo::delete(&self.pool, id).await?;
        if !deleted {
            tracing::debug!(category_id = id, "Delete matched no category row");
        }
        Ok(())
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Category>, sqlx::Error> {
        CategoryRepo::list(&self.pool, request).await
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn find_by_name(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> Result<Page<Category>, sqlx::Error> {
        CategoryRepo::find_by_name(&self.pool, name, request).await
    }
}

/// Task store backed by the `tasks` table.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: DbPool,
}

impl PgTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Task> for PgTaskStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        TaskRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, new: NewTask) -> Result<Task, sqlx::Error> {
        TaskRepo::create(&self.pool, &new).await
    }

    async fn update(&self, entity: &Task) -> Result<Task, sqlx::Error> {
        TaskRepo::update(&self.pool, entity)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error> {
        let deleted = TaskRepo::delete(&self.pool, id).await?;
        if !deleted {
            tracing::debug!(task_id = id, "Delete matched no task row");
        }
        Ok(())
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Task>, sqlx::Error> {
        TaskRepo::list(&self.pool, request).await
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn find_by_name_containing_ignore_case(
        &self,
        text: &str,
        request: &PageRequest,
    ) -> Result<Page<Task>, sqlx::Error> {
        TaskRepo::find_by_name_containing_ignore_case(&self.pool, text, request).await
    }
}
