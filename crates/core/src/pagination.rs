//! Paged query resolution shared by every list endpoint.
//!
//! A list request arrives as loose parameters (search text, sort field,
//! sort direction, page index, page size). [`resolve`] validates them and
//! produces a [`FetchPlan`]: which finder to call (all rows, or rows
//! filtered by name) and the [`PageRequest`] to hand to the store. Stores
//! answer with a [`Page`], whose totals the API layer copies into its
//! response envelope.

use std::str::FromStr;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Zero-based index of the first page.
pub const DEFAULT_PAGE: i64 = 0;

/// Page size used when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Field list endpoints sort by when the caller does not provide one.
pub const DEFAULT_SORT_BY: &str = "name";

/// Sort direction used when the caller does not provide one.
pub const DEFAULT_SORT_ORDER: &str = "asc";

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    /// Case-insensitive `asc` / `desc`. Surrounding whitespace is not trimmed.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(CoreError::InvalidSortDirection(value.to_string()))
        }
    }
}

/// A resolved sort: physical field name plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// How sort fields outside the allow-list are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortFieldMode {
    /// Unknown fields pass through verbatim; the store rejects them later.
    #[default]
    Permissive,
    /// Unknown fields fail immediately with [`CoreError::UnknownSortField`].
    Strict,
}

impl FromStr for SortFieldMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(SortFieldMode::Permissive),
            "strict" => Ok(SortFieldMode::Strict),
            other => Err(format!(
                "Invalid sort field mode '{other}'. Must be one of: permissive, strict"
            )),
        }
    }
}

/// Allow-list of sortable fields for one entity, mapping the logical name a
/// client sends to the physical field the store sorts on.
#[derive(Debug, Clone, Copy)]
pub struct SortFields {
    fields: &'static [(&'static str, &'static str)],
    mode: SortFieldMode,
}

impl SortFields {
    /// Build a permissive allow-list.
    pub const fn new(fields: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            fields,
            mode: SortFieldMode::Permissive,
        }
    }

    pub const fn with_mode(self, mode: SortFieldMode) -> Self {
        Self {
            fields: self.fields,
            mode,
        }
    }

    /// Map a logical field to its physical name.
    pub fn resolve(&self, field: &str) -> Result<String, CoreError> {
        if let Some((_, physical)) = self.fields.iter().find(|(logical, _)| *logical == field) {
            return Ok((*physical).to_string());
        }
        match self.mode {
            SortFieldMode::Permissive => Ok(field.to_string()),
            SortFieldMode::Strict => Err(CoreError::UnknownSortField(field.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Page request / page
// ---------------------------------------------------------------------------

/// Which slice of an ordered result set to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Sort,
}

impl PageRequest {
    /// `page` must be zero or greater and `size` at least one. There is no
    /// upper bound on `size`.
    pub fn new(page: i64, size: i64, sort: Sort) -> Result<Self, CoreError> {
        if page < 0 {
            return Err(CoreError::Validation(
                "Page index must not be less than zero".to_string(),
            ));
        }
        if size < 1 {
            return Err(CoreError::Validation(
                "Page size must not be less than one".to_string(),
            ));
        }
        Ok(Self { page, size, sort })
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of an ordered result set, as returned by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// `ceil(total_elements / size)`. Zero when nothing matched.
    pub fn total_pages(&self) -> i64 {
        if self.size <= 0 {
            return 1;
        }
        if self.total_elements <= 0 {
            return 0;
        }
        (self.total_elements - 1) / self.size + 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Raw list parameters as received from a client.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort_by: String,
    pub sort_order: String,
    pub page: i64,
    pub page_size: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: DEFAULT_SORT_ORDER.to_string(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// What to fetch: a name filter (`None` means every row) and the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub filter: Option<String>,
    pub request: PageRequest,
}

/// Validate raw list parameters and build a [`FetchPlan`].
///
/// Checks run in order: sort direction, sort field (which must not be
/// blank), page bounds. An absent or empty search selects the unfiltered
/// fetch.
pub fn resolve(query: &ListQuery, fields: &SortFields) -> Result<FetchPlan, CoreError> {
    let direction: SortDirection = query.sort_order.parse()?;
    if query.sort_by.trim().is_empty() {
        return Err(CoreError::Validation(
            "Sort property must not be empty".to_string(),
        ));
    }
    let field = fields.resolve(&query.sort_by)?;
    let request = PageRequest::new(query.page, query.page_size, Sort { field, direction })?;

    let filter = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(FetchPlan { filter, request })
}
