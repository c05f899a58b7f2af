use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for paginating and sorting list endpoints.
///
/// # Pagination
/// `limit` is the page size and `offset` the index of the first item, for
/// example `?limit=10&offset=20` returns the third page of ten. A missing
/// `limit` falls back to the configured default; a `limit` of zero is
/// rejected.
///
/// # Sorting
/// Two formats are supported:
/// - **JSON array:** `sort=["name","DESC"]`
/// - **Plain column:** `sort=name&order=DESC`
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Maximum number of items to return.
    ///
    /// Example: `10`
    #[param(example = 10)]
    pub limit: Option<u64>,
    /// Number of items to skip.
    ///
    /// Example: `0`
    #[param(example = 0)]
    pub offset: Option<u64>,
    /// Sort column, or a JSON array `["column", "order"]`.
    ///
    /// Example: `["id", "ASC"]`
    #[param(example = r#"["id", "ASC"]"#)]
    pub sort: Option<String>,
    /// Sort order when `sort` is a plain column name (ASC or DESC).
    ///
    /// Example: `ASC`
    #[param(example = "ASC")]
    pub order: Option<String>,
}

impl ListQuery {
    /// Requested limit, defaulted and capped at `max_limit`
    #[must_use]
    pub fn limit_or(&self, default_limit: u64, max_limit: u64) -> u64 {
        self.limit.unwrap_or(default_limit).min(max_limit)
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}
