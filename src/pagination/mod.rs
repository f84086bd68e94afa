//! Local pagination of an already-fetched result list.

/// Splits a fetched sequence into fixed-size pages.
///
/// Pages are numbered from 1. Replacing the items always returns to page 1,
/// even when the new items equal the old ones.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    per_page: usize,
    page: usize,
}

impl<T> Paginator<T> {
    /// Create an empty paginator. A page size of zero is treated as one.
    pub fn new(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            per_page: per_page.max(1),
            page: 1,
        }
    }

    pub fn with_items(per_page: usize, items: Vec<T>) -> Self {
        let mut paginator = Self::new(per_page);
        paginator.items = items;
        paginator
    }

    /// Swap in a new result set and reset to the first page.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages, `ceil(len / per_page)`; zero for an empty list.
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.per_page)
    }

    /// Whether page controls are worth showing.
    pub fn has_multiple_pages(&self) -> bool {
        self.items.len() > self.per_page
    }

    /// Move to `page`, clamped into the valid range. Returns the page set.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.page_count().max(1));
        self.page
    }

    /// Items on the current page.
    pub fn current(&self) -> &[T] {
        self.page_slice(self.page).unwrap_or(&[])
    }

    /// Items on a given 1-based page.
    pub fn page_slice(&self, page: usize) -> Option<&[T]> {
        if page == 0 || page > self.page_count() {
            return None;
        }
        let start = (page - 1) * self.per_page;
        let end = (start + self.per_page).min(self.items.len());
        Some(&self.items[start..end])
    }

    /// All pages in order.
    pub fn pages(&self) -> std::slice::Chunks<'_, T> {
        self.items.chunks(self.per_page)
    }
}
