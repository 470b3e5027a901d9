//! Page math for the data table.
//!
//! Pages are 1-based. The total page count is derived from the number of
//! filtered records, so an empty set has zero pages while the current page
//! stays at 1.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of rows shown per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    /// 20 rows per page.
    #[default]
    Twenty,
    /// 40 rows per page.
    Forty,
    /// 50 rows per page.
    Fifty,
    /// 100 rows per page.
    Hundred,
}

impl PageSize {
    /// All selectable page sizes, in display order.
    pub const ALL: [PageSize; 4] = [
        PageSize::Twenty,
        PageSize::Forty,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    /// The number of rows for this size.
    pub fn value(self) -> usize {
        match self {
            PageSize::Twenty => 20,
            PageSize::Forty => 40,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    /// Look up a page size by its row count.
    pub fn from_value(value: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.value() == value)
    }

    /// The next size in the cycle, wrapping back to 20.
    pub fn next(self) -> Self {
        match self {
            PageSize::Twenty => PageSize::Forty,
            PageSize::Forty => PageSize::Fifty,
            PageSize::Fifty => PageSize::Hundred,
            PageSize::Hundred => PageSize::Twenty,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::from_value(value)
            .ok_or_else(|| format!("page size must be one of 20, 40, 50 or 100 (got {})", value))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.value()
    }
}

/// A numbered page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    /// 1-based page number.
    pub number: usize,
    /// Whether this is the page currently shown.
    pub is_current: bool,
}

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: PageSize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Pagination {
    /// Start on page 1 with the given page size.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    /// The current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The active page size.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Change the page size. Always returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.reset();
    }

    /// Return to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Total pages for `len` filtered records: `ceil(len / page_size)`.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size.value())
    }

    /// Index range of the current page within `len` filtered records.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let size = self.page_size.value();
        let start = ((self.current_page - 1) * size).min(len);
        let end = (start + size).min(len);
        start..end
    }

    /// Jump to `page`, clamped into `[1, max(1, total_pages)]`.
    ///
    /// Returns true if the current page changed.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        let last = self.total_pages(len).max(1);
        let target = page.clamp(1, last);
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    /// Pull the current page back into range after the record count changed.
    pub fn clamp(&mut self, len: usize) {
        let last = self.total_pages(len).max(1);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    /// Whether the "previous" control is enabled.
    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the "next" control is enabled.
    pub fn can_go_next(&self, len: usize) -> bool {
        self.current_page < self.total_pages(len)
    }

    /// Move one page back. No-op on the first page.
    pub fn previous(&mut self) -> bool {
        if self.can_go_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Move one page forward. No-op on the last page.
    pub fn next(&mut self, len: usize) -> bool {
        if self.can_go_next(len) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// One button per page from 1 to the total page count.
    pub fn buttons(&self, len: usize) -> Vec<PageButton> {
        (1..=self.total_pages(len))
            .map(|number| PageButton {
                number,
                is_current: number == self.current_page,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_values() {
        let values: Vec<usize> = PageSize::ALL.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![20, 40, 50, 100]);
        assert_eq!(PageSize::default(), PageSize::Twenty);
    }

    #[test]
    fn test_page_size_from_value_rejects_unknown() {
        assert_eq!(PageSize::from_value(50), Some(PageSize::Fifty));
        assert_eq!(PageSize::from_value(25), None);
        assert!(PageSize::try_from(10).is_err());
    }

    #[test]
    fn test_page_size_cycle_wraps() {
        assert_eq!(PageSize::Hundred.next(), PageSize::Twenty);
        assert_eq!(PageSize::Twenty.next(), PageSize::Forty);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let pagination = Pagination::default();
        assert_eq!(pagination.total_pages(0), 0);
        assert_eq!(pagination.total_pages(20), 1);
        assert_eq!(pagination.total_pages(21), 2);
        assert_eq!(pagination.total_pages(45), 3);
    }

    #[test]
    fn test_bounds_on_last_page() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.bounds(45), 0..20);
        pagination.go_to(3, 45);
        assert_eq!(pagination.bounds(45), 40..45);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut pagination = Pagination::default();
        pagination.go_to(99, 45);
        assert_eq!(pagination.current_page(), 3);
        pagination.go_to(0, 45);
        assert_eq!(pagination.current_page(), 1);
        pagination.go_to(5, 0);
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        for size in PageSize::ALL {
            let mut pagination = Pagination::new(PageSize::Twenty);
            pagination.go_to(3, 250);
            pagination.set_page_size(size);
            assert_eq!(pagination.current_page(), 1);
            assert_eq!(pagination.total_pages(250), 250usize.div_ceil(size.value()));
        }
    }

    #[test]
    fn test_boundary_controls() {
        let mut pagination = Pagination::default();
        assert!(!pagination.can_go_previous());
        assert!(pagination.can_go_next(45));
        assert!(!pagination.previous());

        pagination.go_to(3, 45);
        assert!(pagination.can_go_previous());
        assert!(!pagination.can_go_next(45));
        assert!(!pagination.next(45));
        assert_eq!(pagination.current_page(), 3);
    }

    #[test]
    fn test_next_disabled_without_pages() {
        let pagination = Pagination::default();
        assert!(!pagination.can_go_next(0));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut pagination = Pagination::default();
        pagination.go_to(3, 45);
        pagination.clamp(30);
        assert_eq!(pagination.current_page(), 2);
        pagination.clamp(0);
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn test_buttons_cover_every_page() {
        let mut pagination = Pagination::default();
        pagination.go_to(2, 45);
        let buttons = pagination.buttons(45);
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0], PageButton { number: 1, is_current: false });
        assert!(buttons[1].is_current);
        assert!(pagination.buttons(0).is_empty());
    }
}
