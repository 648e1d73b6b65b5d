//! Fixed-size pagination.
//!
//! # Invariants
//! - Pages are 1-based; `total_pages` is at least 1, even for empty input.
//! - Page requests are clamped into `1..=total_pages`.
//! - A current page left past the end by a shrinking list resets to page 1
//!   on the next `paginate` call.

use crate::config::DEFAULT_PAGE_SIZE;

/// Number of pages needed for `item_count` items, never less than 1.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a requested page into `1..=total_pages`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Returns `items[(page-1)*size .. page*size]`, truncated to the input.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// One computed page plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Length of the full list the page was cut from.
    pub total_items: usize,
    pub can_go_next: bool,
    pub can_go_prev: bool,
}

impl<T> Page<T> {
    /// 1-based position of the first row on this page within the full list.
    pub fn first_row_number(&self) -> usize {
        (self.current_page - 1) * self.page_size + 1
    }
}

/// Current-page state for one paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// Creates a paginator on page 1. A zero `page_size` is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Moves to `page`, clamped against a list of `item_count` items.
    ///
    /// Returns the page actually selected.
    pub fn go_to_page(&mut self, page: usize, item_count: usize) -> usize {
        self.current_page = clamp_page(page, total_pages(item_count, self.page_size));
        self.current_page
    }

    pub fn next_page(&mut self, item_count: usize) -> usize {
        self.go_to_page(self.current_page.saturating_add(1), item_count)
    }

    pub fn prev_page(&mut self, item_count: usize) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1), item_count)
    }

    /// Cuts the current page out of `items`.
    pub fn paginate<T: Clone>(&mut self, items: &[T]) -> Page<T> {
        let total_pages = total_pages(items.len(), self.page_size);
        if self.current_page > total_pages {
            self.current_page = 1;
        }

        Page {
            items: page_slice(items, self.current_page, self.page_size).to_vec(),
            current_page: self.current_page,
            total_pages,
            page_size: self.page_size,
            total_items: items.len(),
            can_go_next: self.current_page < total_pages,
            can_go_prev: self.current_page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, page_slice, total_pages, Paginator};

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn page_requests_clamp_into_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn slices_are_truncated_to_input() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(page_slice(&items, 1, 5), [1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&items, 3, 5), [11, 12]);
        assert!(page_slice(&items, 4, 5).is_empty());
        assert!(page_slice(&items, usize::MAX, 5).is_empty());
    }

    #[test]
    fn twelve_items_navigate_three_pages() {
        let items: Vec<u32> = (1..=12).collect();
        let mut paginator = Paginator::default();

        let page = paginator.paginate(&items);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, [1, 2, 3, 4, 5]);
        assert!(page.can_go_next);
        assert!(!page.can_go_prev);

        assert_eq!(paginator.go_to_page(5, items.len()), 3);
        let page = paginator.paginate(&items);
        assert_eq!(page.items, [11, 12]);
        assert_eq!(page.first_row_number(), 11);
        assert!(!page.can_go_next);
        assert!(page.can_go_prev);

        assert_eq!(paginator.go_to_page(0, items.len()), 1);
        assert_eq!(paginator.next_page(items.len()), 2);
        assert_eq!(paginator.prev_page(items.len()), 1);
        assert_eq!(paginator.prev_page(items.len()), 1);
    }

    #[test]
    fn shrinking_list_resets_to_first_page_on_recompute() {
        let items: Vec<u32> = (1..=12).collect();
        let mut paginator = Paginator::new(5);
        paginator.go_to_page(3, items.len());

        let remaining = &items[..4];
        assert_eq!(paginator.current_page(), 3);
        let page = paginator.paginate(remaining);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items, [1, 2, 3, 4]);
        assert!(!page.can_go_next);
        assert!(!page.can_go_prev);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let mut paginator = Paginator::new(5);
        let page = paginator.paginate::<u32>(&[]);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
