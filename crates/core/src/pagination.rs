//! Offset pagination for listing endpoints.
//!
//! A [`PageRequest`] carries the client's `page` and optional `limit`. Once the
//! total number of matching rows is known, [`PageMeta::for_request`] produces
//! the metadata returned alongside the rows, or rejects pages past the end.
//!
//! Without a `limit` there is a single page holding every row.
//!
//! # Descriptor rules
//!
//! With `offset = (page - 1) * limit` and `end = offset + limit`
//! (both zero-limit when no limit is given):
//!
//! - `current` is present when `end < totalRow`
//! - `next` is present when `end < totalRow` and `end != 0`
//! - `prev` is present when `offset > 0`
//!
//! `current` follows the legacy wire contract: it is omitted on the last page.

use serde::{Deserialize, Serialize};

/// Errors raised while building or checking a page request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// `page` or `limit` was zero.
    #[error("{param} must be a positive integer")]
    NotPositive {
        /// Name of the offending query parameter.
        param: &'static str,
    },
    /// The requested page lies beyond the last page.
    #[error("Page not found")]
    OutOfRange {
        /// Requested page.
        page: u32,
        /// Number of pages available.
        total_page: u64,
    },
}

/// A validated `page`/`limit` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: Option<u32>,
}

impl PageRequest {
    /// Build a request, defaulting `page` to 1 and leaving `limit` unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotPositive`] if either value is zero.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(PageError::NotPositive { param: "page" });
        }
        if limit == Some(0) {
            return Err(PageError::NotPositive { param: "limit" });
        }
        Ok(Self { page, limit })
    }

    /// Requested page, 1-indexed.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page, `None` when unbounded.
    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Number of rows to skip (SQL `OFFSET`).
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit.unwrap_or(0))
    }

    /// Offset of the first row after this page.
    #[must_use]
    pub fn end(&self) -> u64 {
        self.offset() + u64::from(self.limit.unwrap_or(0))
    }

    fn descriptor(&self, page: u32) -> PageDescriptor {
        PageDescriptor {
            page,
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
        }
    }
}

/// Parameters of a page adjacent to (or equal to) the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub page: u32,
    pub limit: Option<u32>,
}

/// Pagination metadata returned with a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Matching rows across all pages.
    pub total_row: u64,
    /// Number of pages (1 when unbounded).
    pub total_page: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PageDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageDescriptor>,
}

impl PageMeta {
    /// Compute metadata for `request` given the total number of matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] if `request.page()` exceeds the page
    /// count. With a limit and zero matching rows the page count is 0, so
    /// every page is out of range.
    pub fn for_request(request: &PageRequest, total_row: u64) -> Result<Self, PageError> {
        let total_page = request
            .limit
            .map_or(1, |limit| total_row.div_ceil(u64::from(limit)));

        if u64::from(request.page) > total_page {
            return Err(PageError::OutOfRange {
                page: request.page,
                total_page,
            });
        }

        let offset = request.offset();
        let end = request.end();
        let has_more = end < total_row;

        Ok(Self {
            total_row,
            total_page,
            current: has_more.then(|| request.descriptor(request.page)),
            next: (has_more && end != 0).then(|| request.descriptor(request.page + 1)),
            prev: (offset > 0).then(|| request.descriptor(request.page - 1)),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn limited(page: u32, limit: u32) -> PageRequest {
        PageRequest::new(Some(page), Some(limit)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = PageRequest::new(None, None).unwrap();
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), None);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(
            PageRequest::new(Some(0), None),
            Err(PageError::NotPositive { param: "page" })
        );
        assert_eq!(
            PageRequest::new(Some(1), Some(0)),
            Err(PageError::NotPositive { param: "limit" })
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(limited(1, 10).offset(), 0);
        assert_eq!(limited(2, 10).offset(), 10);
        assert_eq!(limited(3, 25).offset(), 50);
        assert_eq!(limited(3, 25).end(), 75);
    }

    #[test]
    fn test_middle_page_of_twelve() {
        let meta = PageMeta::for_request(&limited(2, 5), 12).unwrap();
        assert_eq!(meta.total_row, 12);
        assert_eq!(meta.total_page, 3);
        assert_eq!(
            meta.prev,
            Some(PageDescriptor {
                page: 1,
                limit: Some(5)
            })
        );
        assert_eq!(
            meta.next,
            Some(PageDescriptor {
                page: 3,
                limit: Some(5)
            })
        );
        assert_eq!(
            meta.current,
            Some(PageDescriptor {
                page: 2,
                limit: Some(5)
            })
        );
    }

    #[test]
    fn test_last_page_has_no_next_or_current() {
        let meta = PageMeta::for_request(&limited(3, 5), 12).unwrap();
        assert!(meta.next.is_none());
        assert!(meta.current.is_none());
        assert_eq!(meta.prev.map(|p| p.page), Some(2));
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let meta = PageMeta::for_request(&limited(1, 5), 12).unwrap();
        assert!(meta.prev.is_none());
        assert_eq!(meta.next.map(|p| p.page), Some(2));
    }

    #[test]
    fn test_exact_fit_has_no_next() {
        let meta = PageMeta::for_request(&limited(2, 5), 10).unwrap();
        assert_eq!(meta.total_page, 2);
        assert!(meta.next.is_none());
    }

    #[test]
    fn test_unbounded_is_single_page() {
        let req = PageRequest::default();
        let meta = PageMeta::for_request(&req, 40).unwrap();
        assert_eq!(meta.total_page, 1);
        assert!(meta.prev.is_none());
        assert!(meta.next.is_none());
        assert_eq!(
            meta.current,
            Some(PageDescriptor {
                page: 1,
                limit: None
            })
        );

        let empty = PageMeta::for_request(&req, 0).unwrap();
        assert_eq!(empty.total_page, 1);
        assert!(empty.current.is_none());
    }

    #[test]
    fn test_unbounded_second_page_not_found() {
        let req = PageRequest::new(Some(2), None).unwrap();
        assert_eq!(
            PageMeta::for_request(&req, 40),
            Err(PageError::OutOfRange {
                page: 2,
                total_page: 1
            })
        );
    }

    #[test]
    fn test_page_past_end_not_found() {
        let err = PageMeta::for_request(&limited(4, 5), 12).unwrap_err();
        assert_eq!(err.to_string(), "Page not found");
    }

    #[test]
    fn test_empty_result_with_limit_not_found() {
        assert!(matches!(
            PageMeta::for_request(&limited(1, 5), 0),
            Err(PageError::OutOfRange { total_page: 0, .. })
        ));
    }

    #[test]
    fn test_wire_shape() {
        let meta = PageMeta::for_request(&limited(3, 5), 12).unwrap();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalRow": 12,
                "totalPage": 3,
                "prev": { "page": 2, "limit": 5 }
            })
        );
    }
}
