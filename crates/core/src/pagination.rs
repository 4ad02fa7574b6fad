//! Page arithmetic for listing endpoints (`?page=&recordPerPage=`).

use serde::Serialize;

/// Records per page when the client sends nothing usable.
pub const DEFAULT_RECORD_PER_PAGE: u64 = 10;

/// Upper bound on records per page.
pub const MAX_RECORD_PER_PAGE: u64 = 100;

/// A resolved, always-valid page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// 1-based page number.
    pub page: u64,
    pub record_per_page: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            record_per_page: DEFAULT_RECORD_PER_PAGE,
        }
    }
}

impl Page {
    /// Build a page from raw query values.
    ///
    /// Missing or non-positive values fall back to the defaults (page 1,
    /// 10 records); `record_per_page` is capped at [`MAX_RECORD_PER_PAGE`].
    pub fn new(page: Option<i64>, record_per_page: Option<i64>) -> Self {
        let record_per_page = match record_per_page {
            Some(n) if n >= 1 => (n as u64).min(MAX_RECORD_PER_PAGE),
            _ => DEFAULT_RECORD_PER_PAGE,
        };
        let page = match page {
            Some(n) if n >= 1 => n as u64,
            _ => 1,
        };
        Self {
            page,
            record_per_page,
        }
    }

    /// Number of records to skip before this page starts.
    pub fn start_index(&self) -> u64 {
        (self.page - 1).saturating_mul(self.record_per_page)
    }

    /// Slice an in-memory collection down to this page.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.start_index()).unwrap_or(usize::MAX);
        items
            .iter()
            .skip(start)
            .take(self.record_per_page as usize)
            .cloned()
            .collect()
    }
}
