//! Offset pagination for board listings.

use serde::{Deserialize, Serialize};

/// Listing page size used by every board.
pub const PAGE_SIZE: u32 = 10;

/// Zero-based page request with a fixed page size.
///
/// # Examples
/// ```
/// use titto_backend::domain::PageRequest;
///
/// let page = PageRequest::new(2);
/// assert_eq!(page.offset(), 20);
/// assert_eq!(page.limit(), 10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
}

impl PageRequest {
    /// Request the given zero-based page.
    #[must_use]
    pub const fn new(page: u32) -> Self {
        Self { page }
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        PAGE_SIZE
    }

    /// Number of items to skip.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64) * (PAGE_SIZE as u64)
    }

    /// Slice an already ordered collection down to this page.
    pub fn slice<T: Clone>(self, items: &[T]) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        items
            .iter()
            .skip(skip)
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect()
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Zero-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Matching items across all pages.
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Assemble a page for the given request.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.limit(),
            total_items,
        }
    }

    /// Transform the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0..10)]
    #[case(1, 10..20)]
    #[case(2, 20..25)]
    fn slice_returns_requested_window(#[case] page: u32, #[case] expected: std::ops::Range<u32>) {
        let items: Vec<u32> = (0..25).collect();
        let sliced = PageRequest::new(page).slice(&items);
        assert_eq!(sliced, expected.collect::<Vec<_>>());
    }

    #[rstest]
    fn slice_past_the_end_is_empty() {
        let items = vec![1, 2, 3];
        assert!(PageRequest::new(5).slice(&items).is_empty());
    }

    #[rstest]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::new(3), 32).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.page, 3);
        assert_eq!(page.page_size, PAGE_SIZE);
        assert_eq!(page.total_items, 32);
    }
}
