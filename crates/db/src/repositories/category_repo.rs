//! Repository for the `categories` table.

use sqlx::PgPool;
use taskboard_core::pagination::{Page, PageRequest};
use taskboard_core::types::DbId;

use crate::models::category::{Category, NewCategory};
use crate::repositories::order_clause;

/// Column list for categories queries.
const COLUMNS: &str = "id, name, description, color, created_at";

/// Provides CRUD and paged lookups for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, color)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Overwrite name, description and color. `created_at` is never written.
    pub async fn update(pool: &PgPool, category: &Category) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                description = $3,
                color = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.description)
            .bind(&category.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of all categories.
    pub async fn list(pool: &PgPool, request: &PageRequest) -> Result<Page<Category>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM categories {} LIMIT $1 OFFSET $2",
            order_clause(&request.sort, None)
        );
        let rows = sqlx::query_as::<_, Category>(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, request, total))
    }

    /// One page of categories whose name equals `name` exactly.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
        request: &PageRequest,
    ) -> Result<Page<Category>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE name = $1")
            .bind(name)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE name = $1 {} LIMIT $2 OFFSET $3",
            order_clause(&request.sort, None)
        );
        let rows = sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, request, total))
    }
}
