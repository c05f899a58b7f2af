use axum::http::header::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Page metadata attached to every list response.
///
/// `page` is 1-based and `total_pages` is `ceil(total_items / items_per_page)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u64,
    pub items_per_page: u64,
    pub page: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("the number of items per page must be greater than zero")]
    ZeroLimit,
}

pub struct PaginationFactory;

impl PaginationFactory {
    /// Derive page metadata from a total count and a limit/offset window.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroLimit`] when `limit` is zero.
    pub fn create(total_items: u64, offset: u64, limit: u64) -> Result<Pagination, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }

        Ok(Pagination {
            total_items,
            total_pages: total_items.div_ceil(limit),
            items_per_page: limit,
            page: offset / limit + 1,
        })
    }
}

/// `{data, metadata}` envelope used by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub metadata: Pagination,
}

impl<T> PaginatedResponse<T> {
    #[must_use]
    pub fn new(data: Vec<T>, metadata: Pagination) -> Self {
        Self { data, metadata }
    }
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build the `Content-Range` header for a list response.
///
/// # Arguments
///
/// * `offset` - The starting point of the range.
/// * `limit` - The maximum number of items to include in the range.
/// * `total_count` - The total number of items available.
/// * `resource_name` - The name of the resource being paginated.
#[must_use]
pub fn calculate_content_range(
    offset: u64,
    limit: u64,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let last = offset
        .saturating_add(limit)
        .saturating_sub(1)
        .min(total_count.saturating_sub(1));
    let safe_name = sanitize_resource_name(resource_name);

    let mut headers = HeaderMap::new();
    if let Ok(value) = format!("{safe_name} {offset}-{last}/{total_count}").parse() {
        headers.insert("Content-Range", value);
    }
    headers
}
