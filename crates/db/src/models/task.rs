//! Task model.
//!
//! A task always references exactly one category. Stores load the category
//! together with the task, so a [`Task`] carries the full [`Category`].

use serde::Deserialize;
use sqlx::FromRow;
use taskboard_core::pagination::SortFields;
use taskboard_core::types::{DbId, Timestamp};

use crate::models::category::Category;
use crate::store::Entity;

/// Client-facing sort fields for tasks and the columns behind them.
pub const TASK_SORT_FIELDS: SortFields = SortFields::new(&[
    ("id", "id"),
    ("name", "name"),
    ("description", "description"),
    ("status", "status"),
    ("category", "category_id"),
    ("categoryId", "category_id"),
    ("category_id", "category_id"),
]);

/// A row from the `tasks` table joined with its category.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// Free-text label such as `Pending` or `Completed`.
    pub status: String,
    pub category: Category,
}

impl Entity for Task {
    type New = NewTask;
    const NAME: &'static str = "Task";
}

/// Flat shape of a `tasks JOIN categories` row.
#[derive(Debug, FromRow)]
pub(crate) struct TaskRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub status: String,
    pub category_id: DbId,
    pub category_name: String,
    pub category_description: String,
    pub category_color: String,
    pub category_created_at: Timestamp,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            name: row.name,
            description: row.description,
            status: row.status,
            category: Category {
                id: row.category_id,
                name: row.category_name,
                description: row.category_description,
                color: row.category_color,
                created_at: row.category_created_at,
            },
        }
    }
}

/// Insert shape for a task. `id` is store-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub status: String,
    pub category_id: DbId,
}

/// DTO for creating or updating a task.
///
/// Updates overwrite every field; an omitted text field is written as an
/// empty string rather than skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    pub category_id: DbId,
}
