//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod task_repo;

pub use category_repo::CategoryRepo;
pub use task_repo::TaskRepo;

use taskboard_core::pagination::Sort;

/// Build an `ORDER BY` clause for a client-chosen sort.
///
/// The field is always emitted as a quoted identifier, so a field that is
/// not a column fails in PostgreSQL (undefined column) instead of being
/// spliced into the statement. Rows tie-break on `id` so pages are stable.
pub(crate) fn order_clause(sort: &Sort, alias: Option<&str>) -> String {
    let qualify = |column: &str| match alias {
        Some(alias) => format!("{alias}.{column}"),
        None => column.to_string(),
    };
    format!(
        "ORDER BY {} {}, {} ASC",
        qualify(&quote_ident(&sort.field)),
        sort.direction.as_sql(),
        qualify("id"),
    )
}

/// Quote a PostgreSQL identifier, doubling embedded quotes.
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Escape `LIKE` wildcards so user text matches literally.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
