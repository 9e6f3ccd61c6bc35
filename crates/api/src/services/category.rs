//! Category operations.

use std::sync::Arc;

use taskboard_core::error::{validate_id, CoreError};
use taskboard_core::pagination::{self, ListQuery, SortFieldMode, SortFields};
use taskboard_core::types::DbId;
use taskboard_db::models::category::CATEGORY_SORT_FIELDS;
use taskboard_db::models::{Category, CreateCategory, UpdateCategory};
use taskboard_db::store::{CategoryStore, Entity};

use crate::error::AppResult;
use crate::mapper;
use crate::response::{CategoryResponse, PagedResponse};

pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
    sort_fields: SortFields,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>, sort_field_mode: SortFieldMode) -> Self {
        Self {
            categories,
            sort_fields: CATEGORY_SORT_FIELDS.with_mode(sort_field_mode),
        }
    }

    /// Persist a new category.
    ///
    /// Any store failure is reported as [`CoreError::CreationFailed`] with the
    /// store error kept as its source.
    pub async fn create_category(&self, input: CreateCategory) -> AppResult<CategoryResponse> {
        tracing::debug!(name = %input.name, "Creating category");

        let category = self
            .categories
            .insert(mapper::new_category(input))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Error while saving category");
                CoreError::CreationFailed {
                    entity: Category::NAME,
                    source: Box::new(err),
                }
            })?;

        tracing::info!(category_id = category.id, "Category created");
        Ok(mapper::category_response(&category))
    }

    pub async fn get_category_by_id(&self, id: Option<DbId>) -> AppResult<CategoryResponse> {
        let id = validate_id(id)?;
        let category = self.find_existing(id).await?;
        Ok(mapper::category_response(&category))
    }

    /// Partial update: fields absent from `input` keep their stored value.
    pub async fn update_category(
        &self,
        id: Option<DbId>,
        input: UpdateCategory,
    ) -> AppResult<CategoryResponse> {
        let id = validate_id(id)?;
        let mut category = self.find_existing(id).await?;

        mapper::merge_category(input, &mut category);
        let updated = self.categories.update(&category).await?;

        tracing::info!(category_id = id, "Category updated");
        Ok(mapper::category_response(&updated))
    }

    /// Delete an existing category. A missing id fails with `NotFound`.
    pub async fn delete_category(&self, id: Option<DbId>) -> AppResult<()> {
        let id = validate_id(id)?;
        self.find_existing(id).await?;

        self.categories.delete_by_id(id).await?;

        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    /// One page of categories. A non-empty search matches names exactly.
    pub async fn list_categories(
        &self,
        query: &ListQuery,
    ) -> AppResult<PagedResponse<CategoryResponse>> {
        let plan = pagination::resolve(query, &self.sort_fields)?;

        let page = match plan.filter.as_deref() {
            None => self.categories.find_all(&plan.request).await?,
            Some(name) => self.categories.find_by_name(name, &plan.request).await?,
        };

        tracing::debug!(
            count = page.content.len(),
            total = page.total_elements,
            page = page.number,
            "Listed categories"
        );
        Ok(PagedResponse::from_page(page.map(|c| mapper::category_response(&c))))
    }

    async fn find_existing(&self, id: DbId) -> AppResult<Category> {
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
