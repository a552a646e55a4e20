//! Page window calculation shared by all list views.

use serde::Serialize;

/// Items fetched per page when the configuration does not say otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

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

/// Number of pages needed for `total` items.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Page links to render; `None` marks a gap.
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl<T> Paginated<T> {
    /// Wraps one fetched page, clamping `current_page` into `1..=total_pages`.
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let total_pages = total_pages(total, per_page);
        let current_page = current_page.clamp(1, total_pages.max(1));

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total,
            total_pages,
            prev: (current_page > 1).then(|| current_page - 1),
            next: (current_page < total_pages).then(|| current_page + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_no_pages() {
        let page: Paginated<u8> = Paginated::new(vec![], 3, 0, 20);
        assert!(page.pages.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.prev, None);
        assert_eq!(page.next, None);
    }

    #[test]
    fn clamps_current_page_into_bounds() {
        let zero: Paginated<u8> = Paginated::new(vec![], 0, 45, 20);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.total_pages, 3);

        let beyond: Paginated<u8> = Paginated::new(vec![], 9, 45, 20);
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.next, None);
        assert_eq!(beyond.prev, Some(2));
    }

    #[test]
    fn window_inserts_gaps_around_current_page() {
        let page: Paginated<u8> = Paginated::new(vec![], 10, 20 * 20, 20);
        assert_eq!(
            page.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn small_totals_list_every_page() {
        let page: Paginated<u8> = Paginated::new(vec![], 1, 41, 20);
        assert_eq!(page.pages, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(page.next, Some(2));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 5);
    }
}
