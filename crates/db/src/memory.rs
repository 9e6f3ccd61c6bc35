//! In-memory implementation of the store traits.
//!
//! Used when no `DATABASE_URL` is configured and by the test suites. It
//! follows the PostgreSQL store's observable behaviour: ids come from a
//! per-table sequence and are never reused, the task -> category foreign
//! key is enforced in both directions, sorting on a field that is not a
//! column fails, and deleting a missing id is a no-op.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use taskboard_core::pagination::{Page, PageRequest, SortDirection};
use taskboard_core::types::{DbId, Timestamp};

use crate::models::{Category, NewCategory, NewTask, Task};
use crate::store::{CategoryStore, EntityStore, TaskStore};

const CATEGORY_COLUMNS: &[&str] = &["id", "name", "description", "color", "created_at"];
const TASK_COLUMNS: &[&str] = &["id", "name", "description", "status", "category_id"];

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";
const TASK_CATEGORY_FK: &str = "fk_tasks_category_id";

/// Task as stored: the category is held by id and joined on read.
#[derive(Debug, Clone)]
struct TaskRecord {
    id: DbId,
    name: String,
    description: String,
    status: String,
    category_id: DbId,
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<DbId, Category>,
    tasks: BTreeMap<DbId, TaskRecord>,
    category_seq: DbId,
    task_seq: DbId,
}

impl Tables {
    fn join(&self, record: &TaskRecord) -> Result<Task, sqlx::Error> {
        let category = self
            .categories
            .get(&record.category_id)
            .cloned()
            .ok_or_else(|| foreign_key_violation("tasks", record.category_id))?;
        Ok(Task {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            status: record.status.clone(),
            category,
        })
    }

    fn require_category(&self, category_id: DbId) -> Result<(), sqlx::Error> {
        if self.categories.contains_key(&category_id) {
            Ok(())
        } else {
            Err(foreign_key_violation("tasks", category_id))
        }
    }
}

/// Category and task tables behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Sorting and paging
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Int(i64),
    Text(&'a str),
    Time(Timestamp),
}

fn category_key<'a>(category: &'a Category, field: &str) -> Option<SortKey<'a>> {
    match field {
        "id" => Some(SortKey::Int(category.id)),
        "name" => Some(SortKey::Text(&category.name)),
        "description" => Some(SortKey::Text(&category.description)),
        "color" => Some(SortKey::Text(&category.color)),
        "created_at" => Some(SortKey::Time(category.created_at)),
        _ => None,
    }
}

fn task_key<'a>(task: &'a TaskRecord, field: &str) -> Option<SortKey<'a>> {
    match field {
        "id" => Some(SortKey::Int(task.id)),
        "name" => Some(SortKey::Text(&task.name)),
        "description" => Some(SortKey::Text(&task.description)),
        "status" => Some(SortKey::Text(&task.status)),
        "category_id" => Some(SortKey::Int(task.category_id)),
        _ => None,
    }
}

/// Sort `rows` per `request`, then cut out the requested page.
///
/// Ties break on id ascending, matching the SQL store's `ORDER BY`.
fn paginate<'r, T>(
    mut rows: Vec<&'r T>,
    request: &PageRequest,
    columns: &[&str],
    key: for<'a> fn(&'a T, &str) -> Option<SortKey<'a>>,
    id: fn(&T) -> DbId,
) -> Result<(Vec<&'r T>, i64), sqlx::Error> {
    let field = request.sort.field.as_str();
    if !columns.contains(&field) {
        return Err(sqlx::Error::ColumnNotFound(field.to_string()));
    }

    rows.sort_by(|a, b| {
        let ord = key(a, field).cmp(&key(b, field));
        let ord = match request.sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        ord.then_with(|| id(a).cmp(&id(b)))
    });

    let total = rows.len() as i64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(request.size).unwrap_or(usize::MAX);
    let page = rows.into_iter().skip(offset).take(size).collect();
    Ok((page, total))
}

fn category_page(
    rows: Vec<&Category>,
    request: &PageRequest,
) -> Result<Page<Category>, sqlx::Error> {
    let (page, total) = paginate(rows, request, CATEGORY_COLUMNS, category_key, |c| c.id)?;
    Ok(Page::new(page.into_iter().cloned().collect(), request, total))
}

fn task_page(
    tables: &Tables,
    rows: Vec<&TaskRecord>,
    request: &PageRequest,
) -> Result<Page<Task>, sqlx::Error> {
    let (page, total) = paginate(rows, request, TASK_COLUMNS, task_key, |t| t.id)?;
    let content = page
        .into_iter()
        .map(|record| tables.join(record))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(content, request, total))
}

// ---------------------------------------------------------------------------
// Category store
// ---------------------------------------------------------------------------

#[async_trait]
impl EntityStore<Category> for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        Ok(self.read().categories.get(&id).cloned())
    }

    async fn insert(&self, new: NewCategory) -> Result<Category, sqlx::Error> {
        let mut tables = self.write();
        tables.category_seq += 1;
        let category = Category {
            id: tables.category_seq,
            name: new.name,
            description: new.description,
            color: new.color,
            created_at: chrono::Utc::now(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, entity: &Category) -> Result<Category, sqlx::Error> {
        let mut tables = self.write();
        let stored = tables
            .categories
            .get_mut(&entity.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        stored.name = entity.name.clone();
        stored.description = entity.description.clone();
        stored.color = entity.color.clone();
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error> {
        let mut tables = self.write();
        if tables.tasks.values().any(|t| t.category_id == id) {
            return Err(foreign_key_violation("categories", id));
        }
        tables.categories.remove(&id);
        Ok(())
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Category>, sqlx::Error> {
        let tables = self.read();
        category_page(tables.categories.values().collect(), request)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_by_name(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> Result<Page<Category>, sqlx::Error> {
        let tables = self.read();
        let rows = tables.categories.values().filter(|c| c.name == name).collect();
        category_page(rows, request)
    }
}

// ---------------------------------------------------------------------------
// Task store
// ---------------------------------------------------------------------------

#[async_trait]
impl EntityStore<Task> for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let tables = self.read();
        tables.tasks.get(&id).map(|record| tables.join(record)).transpose()
    }

    async fn insert(&self, new: NewTask) -> Result<Task, sqlx::Error> {
        let mut tables = self.write();
        tables.require_category(new.category_id)?;
        tables.task_seq += 1;
        let record = TaskRecord {
            id: tables.task_seq,
            name: new.name,
            description: new.description,
            status: new.status,
            category_id: new.category_id,
        };
        let task = tables.join(&record)?;
        tables.tasks.insert(record.id, record);
        Ok(task)
    }

    async fn update(&self, entity: &Task) -> Result<Task, sqlx::Error> {
        let mut tables = self.write();
        tables.require_category(entity.category.id)?;
        let stored = tables
            .tasks
            .get_mut(&entity.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        stored.name = entity.name.clone();
        stored.description = entity.description.clone();
        stored.status = entity.status.clone();
        stored.category_id = entity.category.id;
        let record = stored.clone();
        tables.join(&record)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error> {
        self.write().tasks.remove(&id);
        Ok(())
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Task>, sqlx::Error> {
        let tables = self.read();
        task_page(&tables, tables.tasks.values().collect(), request)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn find_by_name_containing_ignore_case(
        &self,
        text: &str,
        request: &PageRequest,
    ) -> Result<Page<Task>, sqlx::Error> {
        let needle = text.to_lowercase();
        let tables = self.read();
        let rows = tables
            .tasks
            .values()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .collect();
        task_page(&tables, rows, request)
    }
}

// ---------------------------------------------------------------------------
// Constraint errors
// ---------------------------------------------------------------------------

/// A constraint violation reported the way PostgreSQL reports it.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct ConstraintViolation {
    message: String,
    constraint: &'static str,
    table: &'static str,
}

impl DatabaseError for ConstraintViolation {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(FOREIGN_KEY_VIOLATION))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn table(&self) -> Option<&str> {
        Some(self.table)
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::ForeignKeyViolation
    }
}

fn foreign_key_violation(table: &'static str, category_id: DbId) -> sqlx::Error {
    let message = match table {
        "categories" => format!(
            "update or delete on table \"categories\" violates foreign key constraint \
             \"{TASK_CATEGORY_FK}\" on table \"tasks\": key (id)=({category_id}) is still referenced"
        ),
        _ => format!(
            "insert or update on table \"tasks\" violates foreign key constraint \
             \"{TASK_CATEGORY_FK}\": key (category_id)=({category_id}) is not present"
        ),
    };
    sqlx::Error::Database(Box::new(ConstraintViolation {
        message,
        constraint: TASK_CATEGORY_FK,
        table,
    }))
}
