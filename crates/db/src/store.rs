//! Store traits the service layer is written against.
//!
//! [`EntityStore`] is the generic find/insert/update/delete/page contract;
//! [`TaskStore`] and [`CategoryStore`] add the entity-specific name finders.
//! Two implementations exist: [`crate::pg_store`] over PostgreSQL and
//! [`crate::memory::MemoryStore`].
//!
//! Every method reports failures as [`sqlx::Error`] so that callers handle
//! both stores the same way.

use async_trait::async_trait;
use taskboard_core::pagination::{Page, PageRequest};
use taskboard_core::types::DbId;

use crate::models::{Category, Task};

/// A persisted record with a store-assigned identity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Shape accepted by [`EntityStore::insert`].
    type New: Send + Sync + 'static;

    /// Name used in error messages and logs.
    const NAME: &'static str;
}

#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, sqlx::Error>;

    /// Insert a new record and return it with its assigned id.
    async fn insert(&self, new: E::New) -> Result<E, sqlx::Error>;

    /// Overwrite the stored record with the same id. Fails with
    /// [`sqlx::Error::RowNotFound`] when no such record exists.
    async fn update(&self, entity: &E) -> Result<E, sqlx::Error>;

    /// Delete by id. Deleting a missing id is a no-op.
    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error>;

    async fn find_all(&self, request: &PageRequest) -> Result<Page<E>, sqlx::Error>;
}

#[async_trait]
pub trait TaskStore: EntityStore<Task> {
    /// Tasks whose name contains `text`, ignoring case.
    async fn find_by_name_containing_ignore_case(
        &self,
        text: &str,
        request: &PageRequest,
    ) -> Result<Page<Task>, sqlx::Error>;
}

#[async_trait]
pub trait CategoryStore: EntityStore<Category> {
    /// Categories whose name equals `name` exactly.
    async fn find_by_name(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> Result<Page<Category>, sqlx::Error>;
}
