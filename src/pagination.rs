use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: u64 = 20;

/// Pagination descriptor as reported (or synthesized) from a billing API
/// list response.
///
/// This is a derived view, not an authoritative one: the client-side filter
/// can shrink the visible set below what the descriptor reports. Page
/// controls follow the descriptor regardless.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: Option<u64>,
    pub total_pages: Option<u64>,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl PageInfo {
    /// Descriptor for a bulk "all"-style response that carried no pagination
    /// metadata of its own.
    pub fn single_page(total: u64) -> Self {
        Self {
            total,
            per_page: total,
            current_page: 1,
            last_page: Some(1),
            total_pages: None,
            from: Some(1),
            to: Some(total),
        }
    }

    /// Number of pages. `total_pages` wins, `last_page` is the fallback, then
    /// a count derived from `total`/`per_page`.
    pub fn page_count(&self) -> u64 {
        self.total_pages
            .or(self.last_page)
            .unwrap_or_else(|| {
                if self.per_page > 0 {
                    self.total.div_ceil(self.per_page).max(1)
                } else {
                    1
                }
            })
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 0)
    }

    /// Replaces the items, keeping the computed page window.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            page: self.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_prefers_total_pages() {
        let info = PageInfo {
            total: 100,
            per_page: 10,
            current_page: 1,
            last_page: Some(3),
            total_pages: Some(5),
            ..PageInfo::default()
        };
        assert_eq!(info.page_count(), 5);
    }

    #[test]
    fn test_page_count_falls_back_to_last_page() {
        let info = PageInfo {
            total: 100,
            per_page: 10,
            current_page: 1,
            last_page: Some(3),
            total_pages: None,
            ..PageInfo::default()
        };
        assert_eq!(info.page_count(), 3);
    }

    #[test]
    fn test_page_count_derives_from_totals_when_unreported() {
        let info = PageInfo {
            total: 45,
            per_page: 20,
            current_page: 1,
            ..PageInfo::default()
        };
        assert_eq!(info.page_count(), 3);

        let info = PageInfo::default();
        assert_eq!(info.page_count(), 1);
    }

    #[test]
    fn test_single_page_descriptor() {
        let info = PageInfo::single_page(7);
        assert_eq!(info.total, 7);
        assert_eq!(info.per_page, 7);
        assert_eq!(info.current_page, 1);
        assert_eq!(info.from, Some(1));
        assert_eq!(info.to, Some(7));
        assert_eq!(info.page_count(), 1);
    }

    #[test]
    fn test_page_window() {
        let paginated = Paginated::new(vec![0u8; 0], 5, 10);
        assert_eq!(paginated.page, 5);
        assert!(paginated.pages.contains(&Some(1)));
        assert!(paginated.pages.contains(&Some(10)));
        assert!(paginated.pages.contains(&Some(5)));

        let paginated = Paginated::<u8>::empty();
        assert!(paginated.pages.is_empty());
        assert_eq!(paginated.page, 1);
    }
}
