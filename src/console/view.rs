use crate::console::filter::filter_users;
use crate::console::paginate::{page_count, page_slice};
use crate::models::{RoleFilter, UserRecord};

/// Ephemeral view parameters: search text, role filter, and the current
/// page. Rebuilt from operator input and re-derived against the snapshot
/// on every render; the page size is fixed for the session.
#[derive(Debug, Clone)]
pub struct ViewState {
    search_text: String,
    role_filter: RoleFilter,
    current_page: usize,
    page_size: usize,
}

/// One derived page of the filtered collection.
#[derive(Debug)]
pub struct PageView<'a> {
    pub rows: Vec<&'a UserRecord>,
    pub page: usize,
    pub page_count: usize,
    /// Size of the filtered set (not of this page).
    pub total: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        ViewState {
            search_text: String::new(),
            role_filter: RoleFilter::All,
            current_page: 1,
            page_size,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn role_filter(&self) -> RoleFilter {
        self.role_filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the search text always snaps back to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = 1;
    }

    /// Changing the role filter always snaps back to page 1.
    pub fn set_role_filter(&mut self, filter: RoleFilter) {
        self.role_filter = filter;
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Filter, clamp the page to the shrunken (or grown) result set, and
    /// slice out the visible rows. The clamp lives here — the paginator
    /// itself stays pure and never clamps.
    pub fn visible<'a>(&mut self, users: &'a [UserRecord]) -> PageView<'a> {
        let filtered = filter_users(users, &self.search_text, self.role_filter);
        let pages = page_count(filtered.len(), self.page_size);
        if self.current_page > pages {
            self.current_page = 1;
        }
        let rows = page_slice(&filtered, self.page_size, self.current_page).to_vec();
        PageView {
            rows,
            page: self.current_page,
            page_count: pages,
            total: filtered.len(),
        }
    }
}
