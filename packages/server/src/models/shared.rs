use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;
/// Highest page number accepted; larger values are clamped.
pub const MAX_PAGE: u64 = 10_000;

/// Pagination metadata included in list responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 10)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 5)]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: PageRequest, total: u64) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total,
            total_pages: total.div_ceil(page.per_page),
        }
    }
}

/// Query parameters shared by all paged listings.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, 1-based, at most 10000. Defaults to 1.
    pub page: Option<u64>,
    /// Items per page, 1-100. Defaults to 10.
    pub per_page: Option<u64>,
}

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Zero-based page index as expected by the paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl From<&PageQuery> for PageRequest {
    fn from(query: &PageQuery) -> Self {
        Self {
            page: query.page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: query
                .per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate an optional free-text field against a character ceiling.
pub fn validate_optional_len(
    value: Option<&str>,
    field: &str,
    max: usize,
) -> Result<(), AppError> {
    if let Some(value) = value
        && value.chars().count() > max
    {
        return Err(AppError::Validation(format!(
            "{field} must not exceed {max} characters"
        )));
    }
    Ok(())
}

/// Trim an optional string, mapping blank values to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
