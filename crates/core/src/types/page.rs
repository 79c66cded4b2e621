//! Limit-offset pagination.

use serde::{Deserialize, Serialize};

/// Errors from validating a [`PageRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageRequestError {
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one row.
    #[error("pageSize must be at least 1")]
    ZeroPageSize,
}

/// A validated page request.
///
/// Page numbers start at 1. There is no upper bound on the page size.
///
/// ```
/// use backoffice_core::PageRequest;
///
/// let page = PageRequest::new(Some(3), Some(20)).unwrap();
/// assert_eq!(page.offset(), 40);
/// assert_eq!(page.limit(), 20);
///
/// assert_eq!(PageRequest::new(None, None).unwrap(), PageRequest::default());
/// assert!(PageRequest::new(Some(0), None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Page used when none is requested.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when none is requested.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Build a page request, filling in defaults for absent values.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `page_size` is zero.
    pub const fn new(page: Option<u32>, page_size: Option<u32>) -> Result<Self, PageRequestError> {
        let page = match page {
            Some(0) => return Err(PageRequestError::ZeroPage),
            Some(page) => page,
            None => Self::DEFAULT_PAGE,
        };
        let page_size = match page_size {
            Some(0) => return Err(PageRequestError::ZeroPageSize),
            Some(size) => size,
            None => Self::DEFAULT_PAGE_SIZE,
        };
        Ok(Self { page, page_size })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// SQL `LIMIT`.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size as i64
    }

    /// SQL `OFFSET`: `(page - 1) * page_size`, saturating at `i64::MAX`.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1).saturating_mul(self.page_size as i64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    /// Compute metadata for `total` matching rows.
    ///
    /// `total_pages` is `ceil(total / page_size)`, so an empty result has zero
    /// pages.
    #[must_use]
    pub const fn new(request: PageRequest, total: i64) -> Self {
        let size = request.page_size as i64;
        let total = if total < 0 { 0 } else { total };
        Self {
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages: (total + size - 1) / size,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Assemble a page from fetched rows and the total count.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            data,
            meta: PageMeta::new(request, total),
        }
    }

    /// Convert every row, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::new(None, None).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.page_size(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_zero_rejected() {
        assert_eq!(
            PageRequest::new(Some(0), Some(5)),
            Err(PageRequestError::ZeroPage)
        );
        assert_eq!(
            PageRequest::new(Some(1), Some(0)),
            Err(PageRequestError::ZeroPageSize)
        );
    }

    #[test]
    fn test_no_upper_bound_on_page_size() {
        let page = PageRequest::new(Some(2), Some(100_000)).unwrap();
        assert_eq!(page.limit(), 100_000);
        assert_eq!(page.offset(), 100_000);
    }

    #[test]
    fn test_offset_saturates_for_huge_requests() {
        let page = PageRequest::new(Some(u32::MAX), Some(u32::MAX)).unwrap();
        assert_eq!(page.limit(), i64::from(u32::MAX));
        assert_eq!(page.offset(), i64::MAX);

        let meta = PageMeta::new(page, 3);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.page, u32::MAX);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let request = PageRequest::new(Some(1), Some(10)).unwrap();
        for (total, pages) in [(0, 0), (1, 1), (9, 1), (10, 1), (11, 2), (20, 2), (21, 3)] {
            assert_eq!(PageMeta::new(request, total).total_pages, pages, "total={total}");
        }
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PageMeta::new(PageRequest::new(Some(2), Some(5)).unwrap(), 12);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "pageSize": 5, "total": 12, "totalPages": 3})
        );
    }

    #[test]
    fn test_map_keeps_meta() {
        let request = PageRequest::default();
        let page = Page::new(vec![1, 2, 3], request, 3).map(|n| n * 2);
        assert_eq!(page.data, vec![2, 4, 6]);
        assert_eq!(page.meta.total, 3);
    }
}
