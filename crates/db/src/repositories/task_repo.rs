//! Repository for the `tasks` table.
//!
//! Every read joins `categories` so a [`Task`] always carries its category.

use sqlx::PgPool;
use taskboard_core::pagination::{Page, PageRequest};
use taskboard_core::types::DbId;

use crate::models::task::{NewTask, Task, TaskRow};
use crate::repositories::{escape_like, order_clause};

/// Select list for `tasks t JOIN categories c`.
const JOINED_COLUMNS: &str = "\
    t.id, t.name, t.description, t.status, t.category_id, \
    c.name AS category_name, c.description AS category_description, \
    c.color AS category_color, c.created_at AS category_created_at";

/// Provides CRUD and paged lookups for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tasks t \
             JOIN categories c ON c.id = t.category_id \
             WHERE t.id = $1"
        );
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Task::from))
    }

    /// Insert a new task, returning it joined with its category.
    pub async fn create(pool: &PgPool, input: &NewTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "WITH inserted AS ( \
                INSERT INTO tasks (name, description, status, category_id) \
                VALUES ($1, $2, $3, $4) \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM inserted t \
             JOIN categories c ON c.id = t.category_id"
        );
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.category_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Overwrite name, description, status and category of a task.
    pub async fn update(pool: &PgPool, task: &Task) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "WITH updated AS ( \
                UPDATE tasks SET \
                    name = $2, \
                    description = $3, \
                    status = $4, \
                    category_id = $5 \
                WHERE id = $1 \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM updated t \
             JOIN categories c ON c.id = t.category_id"
        );
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(task.id)
            .bind(&task.name)
            .bind(&task.description)
            .bind(&task.status)
            .bind(task.category.id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Task::from))
    }

    /// Delete a task by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of all tasks.
    pub async fn list(pool: &PgPool, request: &PageRequest) -> Result<Page<Task>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tasks t \
             JOIN categories c ON c.id = t.category_id \
             {} LIMIT $1 OFFSET $2",
            order_clause(&request.sort, Some("t"))
        );
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows.into_iter().map(Task::from).collect(), request, total))
    }

    /// One page of tasks whose name contains `text`, ignoring case.
    pub async fn find_by_name_containing_ignore_case(
        pool: &PgPool,
        text: &str,
        request: &PageRequest,
    ) -> Result<Page<Task>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(text));

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE name ILIKE $1 ESCAPE '\\'")
                .bind(&pattern)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tasks t \
             JOIN categories c ON c.id = t.category_id \
             WHERE t.name ILIKE $1 ESCAPE '\\' \
             {} LIMIT $2 OFFSET $3",
            order_clause(&request.sort, Some("t"))
        );
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(&pattern)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows.into_iter().map(Task::from).collect(), request, total))
    }
}
