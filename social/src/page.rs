//! Range pagination and the fetch-and-append / live-prepend list.
//!
//! DESIGN
//! ======
//! `Feed<T>` is the locally held view of a server list. Fetched pages land
//! through [`Feed::apply_page`]; pushed inserts land through
//! [`Feed::push_live`]. The two paths do not de-duplicate against each other,
//! so a record that arrives by push while its page is in flight shows twice.
//! Callers that care can compare ids themselves.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

pub const COMMUNITY_PAGE_SIZE: u32 = 10;
pub const POST_PAGE_SIZE: u32 = 10;
pub const COMMENT_PAGE_SIZE: u32 = 20;

/// A 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Page numbers below 1 are treated as 1; a zero limit as 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit: limit.max(1) }
    }

    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self::new(1, limit)
    }

    /// Inclusive item range `(from, to)`.
    #[must_use]
    pub fn range(&self) -> (u64, u64) {
        let from = u64::from(self.page.max(1) - 1) * u64::from(self.limit);
        (from, from + u64::from(self.limit.max(1)) - 1)
    }

    /// Value for the `Range` request header, e.g. `10-19`.
    #[must_use]
    pub fn range_header(&self) -> String {
        let (from, to) = self.range();
        format!("{from}-{to}")
    }

    #[must_use]
    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.limit)
    }
}

/// Total row count from a `Content-Range` header (`0-9/42`, `*/0`).
///
/// Returns `None` when the header is malformed or the total is `*`.
#[must_use]
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}

/// One fetched page plus the server-reported total.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

/// Accumulated list shown by a feed view.
#[derive(Clone, Debug, PartialEq)]
pub struct Feed<T> {
    items: Vec<T>,
    total: u64,
    limit: u32,
    loaded_pages: u32,
}

impl<T> Feed<T> {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self { items: Vec::new(), total: 0, limit: limit.max(1), loaded_pages: 0 }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn loaded_pages(&self) -> u32 {
        self.loaded_pages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        (self.items.len() as u64) < self.total
    }

    /// Request for the page after the last one applied.
    #[must_use]
    pub fn next_request(&self) -> PageRequest {
        PageRequest::new(self.loaded_pages + 1, self.limit)
    }

    /// Merge a fetched page. Page 1 replaces the list; later pages append.
    pub fn apply_page(&mut self, request: PageRequest, page: Page<T>) {
        if request.page <= 1 {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.total = page.total;
        self.loaded_pages = request.page.max(1);
    }

    /// Prepend a pushed insert and bump the total.
    pub fn push_live(&mut self, item: T) {
        self.items.insert(0, item);
        self.total += 1;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0;
        self.loaded_pages = 0;
    }
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self::new(POST_PAGE_SIZE)
    }
}
