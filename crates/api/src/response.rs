//! Response shapes returned by the services and serialized by handlers.
//!
//! Entity responses and the paged envelope serialize with camelCase keys.

use serde::Serialize;
use taskboard_core::pagination::Page;
use taskboard_core::types::{DbId, Timestamp};

/// Paged envelope: `{ items, currentPage, totalPages, totalItems }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T: Serialize> {
    pub items: Vec<T>,
    /// Zero-based index of the returned page.
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

impl<T: Serialize> PagedResponse<T> {
    /// Copy a store page verbatim, including an empty one.
    pub fn from_page(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            current_page: page.number,
            total_pages,
            total_items: page.total_elements,
            items: page.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// A task with its category expanded in full.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub status: String,
    pub category: CategoryResponse,
}
