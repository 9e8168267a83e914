//! Page arithmetic for the product list.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Most page links shown at once.
pub const MAX_PAGE_LINKS: usize = 5;

/// Selectable rows-per-page values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Twenty,
}

impl PageSize {
    pub const OPTIONS: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::Twenty];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::OPTIONS
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("unsupported page size {value} (expected 5, 10 or 20)"))
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

/// Current page, page size and page count over a list of `total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: PageSize,
    total_pages: usize,
    total_items: usize,
}

impl Pagination {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_pages: 0,
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Recount pages for `total_items`, pulling the current page back inside the range.
    pub fn recompute(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages = total_items.div_ceil(self.page_size.get());
        if self.current_page > self.total_pages && self.total_pages > 0 {
            self.current_page = self.total_pages;
        }
    }

    /// Back to the first page. Callers recompute afterwards.
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
        self.recompute(self.total_items);
    }

    /// Jump to `page` if it exists. Returns whether the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Index range of the current page within the item list.
    pub fn range(&self) -> Range<usize> {
        let size = self.page_size.get();
        let start = ((self.current_page - 1) * size).min(self.total_items);
        let end = (start + size).min(self.total_items);
        start..end
    }

    /// Page links to show: all pages when there are few, otherwise a window of up to
    /// [`MAX_PAGE_LINKS`] starting two pages before the current one.
    pub fn page_numbers(&self) -> Vec<usize> {
        if self.total_pages <= MAX_PAGE_LINKS {
            return (1..=self.total_pages).collect();
        }

        let start = self.current_page.saturating_sub(2).max(1);
        let end = (start + MAX_PAGE_LINKS - 1).min(self.total_pages);
        (start..=end).collect()
    }

    /// 1-based `(first, last, total)` of the visible rows; `None` when the list is empty.
    pub fn showing_range(&self) -> Option<(usize, usize, usize)> {
        let range = self.range();
        if range.is_empty() {
            return None;
        }
        Some((range.start + 1, range.end, self.total_items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(items: usize, size: PageSize) -> Pagination {
        let mut p = Pagination::new(size);
        p.recompute(items);
        p
    }

    #[test]
    fn fifteen_items_in_pages_of_five() {
        let mut p = paged(15, PageSize::Five);
        assert_eq!(p.total_pages(), 3);
        assert!(!p.previous());
        assert_eq!(p.current_page(), 1);
        assert!(p.next());
        assert_eq!(p.current_page(), 2);
        assert_eq!(p.range(), 5..10);
    }

    #[test]
    fn last_page_may_be_partial() {
        let mut p = paged(12, PageSize::Five);
        assert!(p.go_to(3));
        assert_eq!(p.range(), 10..12);
        assert_eq!(p.showing_range(), Some((11, 12, 12)));
        assert!(!p.next());
    }

    #[test]
    fn go_to_rejects_out_of_range_pages() {
        let mut p = paged(10, PageSize::Five);
        assert!(!p.go_to(0));
        assert!(!p.go_to(3));
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn shrinking_list_clamps_current_page() {
        let mut p = paged(20, PageSize::Five);
        p.go_to(4);
        p.recompute(11);
        assert_eq!(p.current_page(), 3);

        // Emptying the list leaves the page alone.
        p.recompute(0);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.current_page(), 3);
        assert_eq!(p.range(), 0..0);
        assert_eq!(p.showing_range(), None);
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut p = paged(40, PageSize::Five);
        p.go_to(6);
        p.set_page_size(PageSize::Twenty);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.total_pages(), 2);
    }

    #[test]
    fn page_numbers_show_all_when_few() {
        assert_eq!(paged(0, PageSize::Five).page_numbers(), Vec::<usize>::new());
        assert_eq!(paged(25, PageSize::Five).page_numbers(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn page_numbers_window_follows_current_page() {
        let mut p = paged(50, PageSize::Five);
        assert_eq!(p.page_numbers(), vec![1, 2, 3, 4, 5]);
        p.go_to(6);
        assert_eq!(p.page_numbers(), vec![4, 5, 6, 7, 8]);
        p.go_to(10);
        assert_eq!(p.page_numbers(), vec![8, 9, 10]);
    }

    #[test]
    fn page_size_accepts_only_known_values() {
        assert_eq!(PageSize::try_from(10), Ok(PageSize::Ten));
        assert!(PageSize::try_from(7).is_err());
        assert_eq!(usize::from(PageSize::Twenty), 20);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_size() -> impl Strategy<Value = PageSize> {
            prop_oneof![Just(PageSize::Five), Just(PageSize::Ten), Just(PageSize::Twenty)]
        }

        proptest! {
            /// Property: any page reachable by navigation is in range and its slice fits.
            #[test]
            fn navigation_stays_in_bounds(
                items in 0usize..500,
                size in any_size(),
                moves in proptest::collection::vec(0u8..3, 0..40),
            ) {
                let mut p = paged(items, size);
                for m in moves {
                    match m {
                        0 => { p.next(); }
                        1 => { p.previous(); }
                        _ => { p.go_to(p.total_pages()); }
                    }
                    prop_assert!(p.current_page() >= 1);
                    prop_assert!(p.current_page() <= p.total_pages().max(1));
                    prop_assert!(p.range().len() <= size.get());

                    let links = p.page_numbers();
                    prop_assert!(links.len() <= MAX_PAGE_LINKS);
                    if p.total_pages() > 0 {
                        prop_assert!(links.contains(&p.current_page()));
                    }
                }
            }
        }
    }
}
