use serde::Serialize;

use crate::shared::constants::TICKET_PAGE_SIZE;

// =============================================================================
// PAGINATION
// =============================================================================

/// A resolved page window over `total_count` rows.
///
/// The requested page is clamped into `[1, max(1, total_pages)]`, so the
/// offset is never negative and an out-of-range page lands on the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn resolve(requested_page: i64, page_size: i64, total_count: i64) -> Self {
        let page_size = page_size.max(1);
        let total_count = total_count.max(0);
        let total_pages = (total_count + page_size - 1) / page_size;
        let page = requested_page.clamp(1, total_pages.max(1));

        Self {
            page,
            page_size,
            total_count,
            total_pages,
        }
    }

    /// Ticket list window with the fixed page size
    pub fn for_tickets(requested_page: i64, total_count: i64) -> Self {
        Self::resolve(requested_page, TICKET_PAGE_SIZE, total_count)
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
