//! Task operations.
//!
//! Unlike categories, task ids are not range-checked and delete does not
//! look the task up first.

use std::sync::Arc;

use taskboard_core::error::CoreError;
use taskboard_core::pagination::{self, ListQuery, SortFieldMode, SortFields};
use taskboard_core::types::DbId;
use taskboard_db::models::task::TASK_SORT_FIELDS;
use taskboard_db::models::{Category, Task, TaskRequest};
use taskboard_db::store::{CategoryStore, Entity, TaskStore};

use crate::error::AppResult;
use crate::mapper;
use crate::response::{PagedResponse, TaskResponse};

pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    categories: Arc<dyn CategoryStore>,
    sort_fields: SortFields,
}

impl TaskService {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        categories: Arc<dyn CategoryStore>,
        sort_field_mode: SortFieldMode,
    ) -> Self {
        Self {
            tasks,
            categories,
            sort_fields: TASK_SORT_FIELDS.with_mode(sort_field_mode),
        }
    }

    /// One page of tasks. A non-empty search matches names by substring,
    /// ignoring case.
    pub async fn list_tasks(&self, query: &ListQuery) -> AppResult<PagedResponse<TaskResponse>> {
        let plan = pagination::resolve(query, &self.sort_fields)?;

        let page = match plan.filter.as_deref() {
            None => self.tasks.find_all(&plan.request).await?,
            Some(text) => {
                self.tasks
                    .find_by_name_containing_ignore_case(text, &plan.request)
                    .await?
            }
        };

        tracing::debug!(
            count = page.content.len(),
            total = page.total_elements,
            page = page.number,
            "Listed tasks"
        );
        Ok(PagedResponse::from_page(page.map(|t| mapper::task_response(&t))))
    }

    pub async fn get_task_by_id(&self, id: DbId) -> AppResult<TaskResponse> {
        let task = self.find_task(id).await?;
        Ok(mapper::task_response(&task))
    }

    /// Create a task under an existing category. Nothing is inserted when
    /// the category does not exist.
    pub async fn create_task(&self, input: TaskRequest) -> AppResult<TaskResponse> {
        self.find_category(input.category_id).await?;

        let task = self.tasks.insert(mapper::new_task(input)).await?;

        tracing::info!(
            task_id = task.id,
            category_id = task.category.id,
            "Task created"
        );
        Ok(mapper::task_response(&task))
    }

    /// Overwrite every mutable field of an existing task.
    ///
    /// The task is looked up before the category, so a missing task wins
    /// over a missing category.
    pub async fn update_task(&self, id: DbId, input: TaskRequest) -> AppResult<TaskResponse> {
        let mut task = self.find_task(id).await?;
        let category = self.find_category(input.category_id).await?;

        mapper::overwrite_task(input, category, &mut task);
        let updated = self.tasks.update(&task).await?;

        tracing::info!(task_id = id, "Task updated");
        Ok(mapper::task_response(&updated))
    }

    /// Delete by id without an existence check; the store decides what a
    /// missing id means.
    pub async fn delete_task(&self, id: DbId) -> AppResult<()> {
        self.tasks.delete_by_id(id).await?;

        tracing::info!(task_id = id, "Task deleted");
        Ok(())
    }

    async fn find_task(&self, id: DbId) -> AppResult<Task> {
        let task = self.tasks.find_by_id(id).await?.ok_or(CoreError::NotFound {
            entity: Task::NAME,
            id,
        })?;
        Ok(task)
    }

    async fn find_category(&self, id: DbId) -> AppResult<Category> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: Category::NAME,
                id,
            })?;
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use taskboard_core::pagination::{Page, PageRequest};
    use taskboard_db::memory::MemoryStore;
    use taskboard_db::models::{CreateCategory, NewTask};
    use taskboard_db::store::EntityStore;

    use crate::error::AppError;
    use crate::services::CategoryService;

    struct Fixture {
        tasks: TaskService,
        categories: CategoryService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            tasks: TaskService::new(store.clone(), store.clone(), SortFieldMode::Permissive),
            categories: CategoryService::new(store, SortFieldMode::Permissive),
        }
    }

    async fn category(fx: &Fixture, name: &str) -> DbId {
        fx.categories
            .create_category(CreateCategory {
                name: name.to_string(),
                description: String::new(),
            })
            .await
            .unwrap()
            .id
    }

    fn request(name: &str, status: &str, category_id: DbId) -> TaskRequest {
        TaskRequest {
            name: name.to_string(),
            description: format!("Description of {name}"),
            status: status.to_string(),
            category_id,
        }
    }

    /// Task store that counts inserts and forwards everything to an inner store.
    struct CountingStore {
        inner: MemoryStore,
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl EntityStore<Task> for CountingStore {
        async fn find_by_id(&self, id: DbId) -> Result<Option<Task>, sqlx::Error> {
            EntityStore::<Task>::find_by_id(&self.inner, id).await
        }

        async fn insert(&self, new: NewTask) -> Result<Task, sqlx::Error> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            EntityStore::<Task>::insert(&self.inner, new).await
        }

        async fn update(&self, entity: &Task) -> Result<Task, sqlx::Error> {
            EntityStore::<Task>::update(&self.inner, entity).await
        }

        async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error> {
            EntityStore::<Task>::delete_by_id(&self.inner, id).await
        }

        async fn find_all(&self, request: &PageRequest) -> Result<Page<Task>, sqlx::Error> {
            EntityStore::<Task>::find_all(&self.inner, request).await
        }
    }

    #[async_trait]
    impl TaskStore for CountingStore {
        async fn find_by_name_containing_ignore_case(
            &self,
            text: &str,
            request: &PageRequest,
        ) -> Result<Page<Task>, sqlx::Error> {
            self.inner
                .find_by_name_containing_ignore_case(text, request)
                .await
        }
    }

    // -- create ---------------------------------------------------------------

    #[tokio::test]
    async fn create_with_missing_category_never_inserts() {
        let counting = Arc::new(CountingStore {
            inner: MemoryStore::new(),
            inserts: AtomicUsize::new(0),
        });
        let svc = TaskService::new(
            counting.clone(),
            Arc::new(MemoryStore::new()),
            SortFieldMode::Permissive,
        );

        let result = svc.create_task(request("Task 1", "Pending", 42)).await;

        assert_matches!(
            result,
            Err(AppError::Core(CoreError::NotFound { entity: "Category", id: 42 }))
        );
        assert_eq!(counting.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_embeds_full_category() {
        let fx = fixture();
        let category_id = category(&fx, "Work").await;

        let created = fx
            .tasks
            .create_task(request("Task 1", "Pending", category_id))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.status, "Pending");
        assert_eq!(created.category.id, category_id);
        assert_eq!(created.category.name, "Work");
    }

    // -- update ---------------------------------------------------------------

    #[tokio::test]
    async fn update_overwrites_every_field() {
        let fx = fixture();
        let work = category(&fx, "Work").await;
        let home = category(&fx, "Home").await;
        let created = fx
            .tasks
            .create_task(request("Task 1", "Pending", work))
            .await
            .unwrap();

        let updated = fx
            .tasks
            .update_task(
                created.id,
                TaskRequest {
                    name: "Renamed".into(),
                    description: String::new(),
                    status: "Completed".into(),
                    category_id: home,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.description, "");
        assert_eq!(updated.status, "Completed");
        assert_eq!(updated.category.name, "Home");
    }

    #[tokio::test]
    async fn update_missing_task_reported_before_missing_category() {
        let fx = fixture();

        assert_matches!(
            fx.tasks.update_task(7, request("x", "Pending", 99)).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Task", id: 7 }))
        );
    }

    #[tokio::test]
    async fn update_with_missing_category_not_found() {
        let fx = fixture();
        let work = category(&fx, "Work").await;
        let created = fx
            .tasks
            .create_task(request("Task 1", "Pending", work))
            .await
            .unwrap();

        assert_matches!(
            fx.tasks
                .update_task(created.id, request("Task 1", "Pending", 99))
                .await,
            Err(AppError::Core(CoreError::NotFound { entity: "Category", id: 99 }))
        );
    }

    // -- delete ---------------------------------------------------------------

    #[tokio::test]
    async fn delete_missing_task_is_noop() {
        let fx = fixture();
        fx.tasks.delete_task(12345).await.unwrap();
    }

    // -- list -----------------------------------------------------------------

    #[tokio::test]
    async fn empty_store_lists_zero_pages() {
        let fx = fixture();

        let page = fx.tasks.list_tasks(&ListQuery::default()).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 0);
    }

    #[tokio::test]
    async fn search_matches_substring_ignoring_case() {
        let fx = fixture();
        let work = category(&fx, "Work").await;
        for name in ["Task 1", "task 2", "Chore"] {
            fx.tasks
                .create_task(request(name, "Pending", work))
                .await
                .unwrap();
        }

        let query = ListQuery {
            search: Some("Tas".into()),
            ..ListQuery::default()
        };
        let page = fx.tasks.list_tasks(&query).await.unwrap();

        assert_eq!(page.total_items, 2);
        let names: Vec<_> = page.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Task 1", "task 2"]);
    }

    #[tokio::test]
    async fn page_never_exceeds_size() {
        let fx = fixture();
        let work = category(&fx, "Work").await;
        for i in 0..7 {
            fx.tasks
                .create_task(request(&format!("t{i}"), "Pending", work))
                .await
                .unwrap();
        }

        for page in 0..3 {
            let query = ListQuery {
                page,
                page_size: 3,
                ..ListQuery::default()
            };
            let result = fx.tasks.list_tasks(&query).await.unwrap();
            assert!(result.items.len() <= 3);
            assert_eq!(result.current_page, page);
            assert_eq!(result.total_pages, 3);
            assert_eq!(result.total_items, 7);
        }
    }

    #[tokio::test]
    async fn sort_by_status_descending() {
        let fx = fixture();
        let work = category(&fx, "Work").await;
        for (name, status) in [("a", "Completed"), ("b", "Pending"), ("c", "InProgress")] {
            fx.tasks
                .create_task(request(name, status, work))
                .await
                .unwrap();
        }

        let query = ListQuery {
            sort_by: "status".into(),
            sort_order: "desc".into(),
            ..ListQuery::default()
        };
        let page = fx.tasks.list_tasks(&query).await.unwrap();

        let statuses: Vec<_> = page.items.iter().map(|t| t.status.as_str()).collect();
        assert_eq!(statuses, ["Pending", "InProgress", "Completed"]);
    }

    #[tokio::test]
    async fn invalid_paging_rejected() {
        let fx = fixture();
        let query = ListQuery {
            page_size: 0,
            ..ListQuery::default()
        };
        assert_matches!(
            fx.tasks.list_tasks(&query).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    // -- scenario -------------------------------------------------------------

    #[tokio::test]
    async fn category_task_lifecycle() {
        let fx = fixture();

        let work = fx
            .categories
            .create_category(CreateCategory {
                name: "Work".into(),
                description: "Work related tasks".into(),
            })
            .await
            .unwrap();
        assert_eq!(work.description, "Work related tasks");

        let created = fx
            .tasks
            .create_task(TaskRequest {
                name: "Task 1".into(),
                description: "Desc".into(),
                status: "Pending".into(),
                category_id: work.id,
            })
            .await
            .unwrap();
        assert_eq!(created.status, "Pending");
        assert_eq!(created.category, work);

        let updated = fx
            .tasks
            .update_task(
                created.id,
                TaskRequest {
                    name: "Task 1".into(),
                    description: "Desc".into(),
                    status: "Completed".into(),
                    category_id: work.id,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, "Completed");
        assert_eq!(updated.id, created.id);

        fx.tasks.delete_task(created.id).await.unwrap();
        assert_matches!(
            fx.tasks.get_task_by_id(created.id).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Task", .. }))
        );
    }
}
