//! Query parameter types for the list endpoints.
//!
//! Both resources accept search, sort and paging parameters, but under
//! different names: tasks use `size`, categories use `pageSize`.

use serde::Deserialize;
use taskboard_core::pagination::{
    ListQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_ORDER,
};

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn default_sort_order() -> String {
    DEFAULT_SORT_ORDER.to_string()
}

/// `GET /tasks?search=&sortBy=&sortOrder=&page=&size=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub search: Option<String>,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

impl From<TaskListParams> for ListQuery {
    fn from(params: TaskListParams) -> Self {
        ListQuery {
            search: params.search,
            sort_by: params.sort_by,
            sort_order: params.sort_order,
            page: params.page,
            page_size: params.size,
        }
    }
}

/// `GET /categories?page=&pageSize=&search=&sortBy=&sortOrder=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

impl From<CategoryListParams> for ListQuery {
    fn from(params: CategoryListParams) -> Self {
        ListQuery {
            search: Some(params.search),
            sort_by: params.sort_by,
            sort_order: params.sort_order,
            page: params.page,
            page_size: params.page_size,
        }
    }
}
