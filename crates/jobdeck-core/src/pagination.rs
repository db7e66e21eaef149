//! Page cursor bookkeeping for the windowed job listing.

use serde::Serialize;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Current page, fixed page size, and the server-reported total.
///
/// `page` is 1-based and never drops below 1. It is not clamped when
/// `total_items` shrinks; callers that need a valid window use
/// [`PaginationState::clamp_to_last_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    page: u32,
    page_size: u32,
    total_items: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// Start on page 1 with no known items. A zero page size is treated as 1.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// `ceil(total_items / page_size)`, at least 1.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        let pages = self.total_items.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// True while the current window ends before `total_items`.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total_items
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Advance one page. Returns `true` if the page changed.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page, stopping at 1. Returns `true` if the page changed.
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page` (values below 1 become 1). Returns `true` if the page
    /// changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = page != self.page;
        self.page = page;
        changed
    }

    /// Return to page 1. Returns `true` if the page changed.
    pub fn reset_page(&mut self) -> bool {
        self.go_to(1)
    }

    /// Record the total reported by the last successful query.
    pub fn set_total(&mut self, total_items: u64) {
        self.total_items = total_items;
    }

    /// Pull `page` back into `[1, last_page]`. Returns `true` if it moved.
    pub fn clamp_to_last_page(&mut self) -> bool {
        let last = self.last_page();
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }

    /// 1-based index range of the current window, for "showing X–Y of Z".
    #[must_use]
    pub fn window(&self) -> Option<(u64, u64)> {
        let start = u64::from(self.page - 1) * u64::from(self.page_size) + 1;
        if start > self.total_items {
            return None;
        }
        let end = (start + u64::from(self.page_size) - 1).min(self.total_items);
        Some((start, end))
    }
}
