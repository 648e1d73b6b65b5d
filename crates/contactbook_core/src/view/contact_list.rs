//! Sorted, paged view over one user's contacts.

use super::pagination::{Page, Paginator};
use super::sorting::{sort_by_name, SortDirection};
use crate::model::contact::Contact;

/// A computed page of contacts.
pub type ContactPage = Page<Contact>;

/// View state for a contact list screen: sort direction plus current page.
///
/// Holds no contacts itself; each `compute` call derives the page from the
/// list passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactListView {
    direction: SortDirection,
    paginator: Paginator,
}

impl ContactListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            direction: SortDirection::default(),
            paginator: Paginator::new(page_size),
        }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// Flips the sort direction and returns the new one.
    pub fn toggle_sort(&mut self) -> SortDirection {
        self.direction = self.direction.toggled();
        self.direction
    }

    /// Selects `page`, clamped against a list of `item_count` contacts.
    pub fn go_to_page(&mut self, page: usize, item_count: usize) -> usize {
        self.paginator.go_to_page(page, item_count)
    }

    /// Steps one page forward; stays on the last page.
    pub fn next_page(&mut self, item_count: usize) -> usize {
        self.paginator.next_page(item_count)
    }

    /// Steps one page back; stays on page 1.
    pub fn prev_page(&mut self, item_count: usize) -> usize {
        self.paginator.prev_page(item_count)
    }

    /// Sorts `contacts` by name, then cuts out the current page.
    pub fn compute(&mut self, contacts: &[Contact]) -> ContactPage {
        let sorted = sort_by_name(contacts, self.direction);
        self.paginator.paginate(&sorted)
    }
}
