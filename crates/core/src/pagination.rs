//! Page arithmetic for public listings.

use serde::Serialize;

use crate::error::CoreError;

pub const DEFAULT_PER_PAGE: i64 = 12;
pub const MAX_PER_PAGE: i64 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Build from optional query values, applying defaults and clamping
    /// `per_page` to `1..=MAX_PER_PAGE`. A page below 1 is rejected.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::Validation("page: must be at least 1".into()));
        }
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    /// Compute metadata for `request` over `total` items.
    ///
    /// An empty listing has one (empty) page. Asking for a page past the
    /// last one is a validation error.
    pub fn compute(request: PageRequest, total: i64) -> Result<Self, CoreError> {
        let total_pages = if total <= 0 {
            1
        } else {
            (total + request.per_page - 1) / request.per_page
        };
        if request.page > total_pages {
            return Err(CoreError::Validation(format!(
                "page: {} is out of range (last page is {total_pages})",
                request.page
            )));
        }
        Ok(Self {
            total: total.max(0),
            page: request.page,
            per_page: request.per_page,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        })
    }
}
