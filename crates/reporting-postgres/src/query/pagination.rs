//! Offset-based pagination.

use serde::Serialize;

/// Maximum number of items per page.
pub const MAX_LIMIT: i64 = 1000;

/// Offset pagination parameters for listing queries.
///
/// The limit is always within `1..=MAX_LIMIT` and the offset never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    limit: i64,
    offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance, clamping out-of-range values.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Creates pagination from a 1-based page number and page size.
    ///
    /// Offsets past `i64::MAX` saturate.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_LIMIT);
        Self {
            limit: page_size,
            offset: (page - 1).saturating_mul(page_size),
        }
    }

    /// Maximum number of records to return.
    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of records to skip.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns the current 1-based page number.
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit).saturating_add(1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}
