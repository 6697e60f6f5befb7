use serde::Serialize;

/// What is known about the size of a remote collection.
///
/// The order endpoints report an exact total; the rest only let us infer
/// bounds from how full the fetched page came back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum TotalCount {
    #[default]
    Unknown,
    AtLeast(usize),
    Exact(usize),
}

impl TotalCount {
    /// Infers a total from one fetched page.
    ///
    /// A short page pins the total exactly; a full page only proves that at
    /// least one more row exists beyond it.
    #[must_use]
    pub fn from_page(page: usize, limit: usize, fetched: usize) -> Self {
        let page = page.max(1);
        if fetched < limit {
            TotalCount::Exact((page - 1) * limit + fetched)
        } else {
            TotalCount::AtLeast(page * limit + 1)
        }
    }

    /// Number of pages implied by this count, never less than one.
    ///
    /// For `AtLeast` this is a lower bound; for `Unknown` there is nothing to
    /// navigate, so a single page is assumed.
    #[must_use]
    pub fn pages(&self, limit: usize) -> usize {
        let limit = limit.max(1);
        match self {
            TotalCount::Unknown => 1,
            TotalCount::AtLeast(n) | TotalCount::Exact(n) => n.div_ceil(limit).max(1),
        }
    }

}

/// Page numbers to render, with `None` marking a gap.
///
/// At most seven slots: short ranges list every page, long ranges keep the
/// first and last page visible and center a window on the current one.
fn page_links(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    if total_pages <= 7 {
        return (1..=total_pages).map(Some).collect();
    }

    if current_page <= 4 {
        let mut pages: Vec<Option<usize>> = (1..=5).map(Some).collect();
        pages.push(None);
        pages.push(Some(total_pages));
        return pages;
    }

    if current_page >= total_pages - 3 {
        let mut pages = vec![Some(1), None];
        pages.extend((total_pages - 4..=total_pages).map(Some));
        return pages;
    }

    let mut pages = vec![Some(1), None];
    pages.extend((current_page - 1..=current_page + 1).map(Some));
    pages.push(None);
    pages.push(Some(total_pages));
    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: TotalCount,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: TotalCount, limit: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = page_links(total.pages(limit), current_page);

        Self {
            items,
            pages,
            page: current_page,
            total,
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pages
            .iter()
            .rev()
            .find_map(|slot| *slot)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_page_pins_the_total() {
        assert_eq!(TotalCount::from_page(3, 12, 1), TotalCount::Exact(25));
        assert_eq!(TotalCount::from_page(1, 12, 0), TotalCount::Exact(0));
    }

    #[test]
    fn full_page_proves_at_least_one_more_row() {
        let total = TotalCount::from_page(1, 12, 12);
        assert_eq!(total, TotalCount::AtLeast(13));
        assert_eq!(total.pages(12), 2);
    }

    #[test]
    fn page_count_rounds_up_and_never_drops_to_zero() {
        assert_eq!(TotalCount::Exact(25).pages(12), 3);
        assert_eq!(TotalCount::Exact(24).pages(12), 2);
        assert_eq!(TotalCount::Exact(0).pages(12), 1);
        assert_eq!(TotalCount::Unknown.pages(12), 1);
    }

    #[test]
    fn short_ranges_list_every_page() {
        assert_eq!(page_links(3, 2), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            page_links(7, 4),
            (1..=7).map(Some).collect::<Vec<_>>()
        );
        assert_eq!(
            page_links(7, 7),
            (1..=7).map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn early_pages_share_one_leading_window() {
        let expected = vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(12)];
        assert_eq!(page_links(12, 1), expected);
        assert_eq!(page_links(12, 4), expected);
    }

    #[test]
    fn late_pages_share_one_trailing_window() {
        let expected = vec![Some(1), None, Some(8), Some(9), Some(10), Some(11), Some(12)];
        assert_eq!(page_links(12, 10), expected);
        assert_eq!(page_links(12, 12), expected);
    }

    #[test]
    fn middle_pages_are_centered_between_gaps() {
        assert_eq!(
            page_links(12, 6),
            vec![Some(1), None, Some(5), Some(6), Some(7), None, Some(12)]
        );
        assert_eq!(
            page_links(20, 11),
            vec![Some(1), None, Some(10), Some(11), Some(12), None, Some(20)]
        );
    }

    #[test]
    fn paginated_clamps_page_zero_to_one() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 0, TotalCount::Exact(25), 12);
        assert_eq!(paginated.page, 1);
        assert_eq!(paginated.total_pages(), 3);
    }
}
