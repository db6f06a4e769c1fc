//! Page-number pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] is parsed from the `page`/`limit` query parameters of a
//! request and tells a repository which slice of an ordered result set to
//! load. The loaded slice and the total item count are then wrapped in a
//! [`Page`] whose [`PageInfo`] is serialised next to the items.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(Some(2), Some(10)).expect("valid request");
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["k", "l"], request, 12);
//! assert_eq!(page.info().total_pages, 2);
//! assert!(!page.info().has_next_page);
//! assert!(page.info().has_prev_page);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page used when the client omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client omits `limit`.
pub const DEFAULT_LIMIT: u32 = 20;
/// Upper bound applied to client-supplied page sizes.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised while interpreting pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    InvalidPage,
    /// A page must contain at least one item.
    #[error("limit must be at least 1")]
    InvalidLimit,
}

/// Validated page-number request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from optional query parameters.
    ///
    /// Missing values fall back to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`];
    /// limits above [`MAX_LIMIT`] are clamped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` or `limit` is zero.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page == 0 {
            return Err(PageRequestError::InvalidPage);
        }
        if limit == 0 {
            return Err(PageRequestError::InvalidLimit);
        }
        Ok(Self {
            page,
            limit: limit.min(MAX_LIMIT),
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before the first item of this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Navigation metadata serialised alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// One-based page number that was served.
    pub current_page: u32,
    /// Number of pages needed to cover every item.
    pub total_pages: u64,
    /// Total number of items matching the query.
    pub total_items: u64,
    /// Requested page size.
    pub items_per_page: u32,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_prev_page: bool,
}

impl PageInfo {
    /// Derive navigation metadata for `request` given the total item count.
    #[must_use]
    pub fn for_request(request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(u64::from(request.limit));
        let current_page = request.page;
        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page: request.limit,
            has_next_page: u64::from(current_page) < total_pages,
            has_prev_page: current_page > 1,
        }
    }
}

/// One page of items plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    info: PageInfo,
}

impl<T> Page<T> {
    /// Wrap the items loaded for `request`.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            info: PageInfo::for_request(request, total_items),
        }
    }

    /// Items on this page in repository order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Navigation metadata.
    #[must_use]
    pub const fn info(&self) -> &PageInfo {
        &self.info
    }

    /// Convert every item while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }

    /// Split the page into its items and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageInfo) {
        (self.items, self.info)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for request parsing and page metadata.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_parameters_use_defaults() {
        let request = PageRequest::new(None, None).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(Some(0), Some(10), PageRequestError::InvalidPage)]
    #[case(Some(1), Some(0), PageRequestError::InvalidLimit)]
    fn zero_values_are_rejected(
        #[case] page: Option<u32>,
        #[case] limit: Option<u32>,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    fn oversized_limit_is_clamped() {
        let request = PageRequest::new(Some(3), Some(500)).expect("clamped");
        assert_eq!(request.limit(), MAX_LIMIT);
        assert_eq!(request.offset(), 200);
    }

    #[rstest]
    #[case(0, 1, 0, false, false)]
    #[case(20, 1, 1, false, false)]
    #[case(21, 1, 2, true, false)]
    #[case(45, 3, 3, false, true)]
    fn page_info_tracks_navigation(
        #[case] total: u64,
        #[case] page: u32,
        #[case] expected_pages: u64,
        #[case] has_next: bool,
        #[case] has_prev: bool,
    ) {
        let request = PageRequest::new(Some(page), None).expect("valid");
        let info = PageInfo::for_request(request, total);
        assert_eq!(info.total_pages, expected_pages);
        assert_eq!(info.has_next_page, has_next);
        assert_eq!(info.has_prev_page, has_prev);
    }

    #[rstest]
    fn page_info_serialises_in_camel_case() {
        let request = PageRequest::new(Some(1), Some(5)).expect("valid");
        let value = serde_json::to_value(PageInfo::for_request(request, 7)).expect("json");
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["itemsPerPage"], 5);
        assert_eq!(value["hasNextPage"], true);
    }

    #[rstest]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::default(), 2).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.info().total_items, 2);
    }
}
