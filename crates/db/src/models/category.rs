//! Category model.

use serde::Deserialize;
use sqlx::FromRow;
use taskboard_core::pagination::SortFields;
use taskboard_core::types::{DbId, Timestamp};
use validator::{Validate, ValidationError};

use crate::store::Entity;

/// Client-facing sort fields for categories and the columns behind them.
pub const CATEGORY_SORT_FIELDS: SortFields = SortFields::new(&[
    ("id", "id"),
    ("name", "name"),
    ("description", "description"),
    ("color", "color"),
    ("createdAt", "created_at"),
    ("created_at", "created_at"),
]);

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub created_at: Timestamp,
}

impl Entity for Category {
    type New = NewCategory;
    const NAME: &'static str = "Category";
}

/// Insert shape for a category. `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    /// Missing and blank names are both rejected by validation.
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "name is required!"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating a category. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
