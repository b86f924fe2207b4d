//! Pagination utilities for listing operations
//!
//! Callers hand over raw, possibly non-positive page/size values; `normalize`
//! turns them into the 1-based page and size the repositories expect.

/// Page used when the caller supplies a non-positive page.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the caller supplies a non-positive size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Raw pagination parameters as received from a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: i64,
    /// items per page
    pub size: i64,
}

impl Pagination {
    pub fn new(page: i64, size: i64) -> Self { Self { page, size } }

    /// Replace non-positive values with defaults and return `(page, size)`.
    ///
    /// There is deliberately no upper bound on `size`.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page <= 0 { DEFAULT_PAGE } else { self.page as u64 };
        let size = if self.size <= 0 { DEFAULT_PAGE_SIZE } else { self.size as u64 };
        (page, size)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE as i64, size: DEFAULT_PAGE_SIZE as i64 } }
}
