//! Client-side pagination over an already fetched list.

pub const MAX_VISIBLE_PAGES: usize = 5;

/// One element of the page bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_items: usize,
    items_per_page: usize,
    current_page: usize,
    total_pages: usize,
}

impl Pagination {
    /// `current_page` is 1-based and clamped to the valid range.
    pub fn new(total_items: usize, items_per_page: usize, current_page: usize) -> Self {
        let items_per_page = items_per_page.max(1);
        let total_pages = total_items.div_ceil(items_per_page);
        let current_page = current_page.clamp(1, total_pages.max(1));
        Self {
            total_items,
            items_per_page,
            current_page,
            total_pages,
        }
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Nothing to render for a single page.
    pub fn should_render(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based index of the first item shown, 0 for an empty list.
    pub fn start_item(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.current_page - 1) * self.items_per_page + 1
        }
    }

    pub fn end_item(&self) -> usize {
        (self.current_page * self.items_per_page).min(self.total_items)
    }

    pub fn summary(&self) -> String {
        format!(
            "Mostrando {} a {} de {}",
            self.start_item(),
            self.end_item(),
            self.total_items
        )
    }

    /// At most five consecutive pages centered on the current one, shifted
    /// instead of centered near the edges.
    pub fn visible_pages(&self) -> Vec<usize> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        let mut start = self.current_page.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
        let end = (start + MAX_VISIBLE_PAGES - 1).min(self.total_pages);
        if end - start + 1 < MAX_VISIBLE_PAGES {
            start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
        }
        (start..=end).collect()
    }

    /// Visible window plus first/last shortcuts and ellipsis markers.
    pub fn items(&self) -> Vec<PageItem> {
        let visible = self.visible_pages();
        let (Some(&first), Some(&last)) = (visible.first(), visible.last()) else {
            return Vec::new();
        };

        let page = |number| PageItem::Page {
            number,
            current: number == self.current_page,
        };

        let mut items = Vec::with_capacity(visible.len() + 4);
        if first > 1 {
            items.push(page(1));
            if first > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend(visible.iter().map(|&n| page(n)));
        if last < self.total_pages {
            if last < self.total_pages - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(page(self.total_pages));
        }
        items
    }

    /// The current page's slice of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = ((self.current_page - 1) * self.items_per_page).min(items.len());
        let end = (start + self.items_per_page).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_of_47() {
        let p = Pagination::new(47, 10, 1);
        assert_eq!(p.total_pages(), 5);
        assert_eq!(p.visible_pages(), vec![1, 2, 3, 4, 5]);
        assert_eq!(p.summary(), "Mostrando 1 a 10 de 47");
        assert!(!p.has_previous());
        assert!(p.has_next());
    }

    #[test]
    fn test_last_page_of_47() {
        let p = Pagination::new(47, 10, 5);
        assert_eq!(p.visible_pages(), vec![1, 2, 3, 4, 5]);
        assert_eq!(p.summary(), "Mostrando 41 a 47 de 47");
        assert!(!p.has_next());
    }

    #[test]
    fn test_single_page_renders_nothing() {
        assert!(!Pagination::new(7, 10, 1).should_render());
        assert!(!Pagination::new(0, 10, 1).should_render());
        assert!(Pagination::new(11, 10, 1).should_render());
    }

    #[test]
    fn test_empty_list() {
        let p = Pagination::new(0, 6, 3);
        assert_eq!(p.current_page(), 1);
        assert!(p.visible_pages().is_empty());
        assert!(p.items().is_empty());
        assert_eq!(p.summary(), "Mostrando 0 a 0 de 0");
        assert!(p.slice::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        assert_eq!(Pagination::new(47, 10, 99).current_page(), 5);
        assert_eq!(Pagination::new(47, 10, 0).current_page(), 1);
    }

    #[test]
    fn test_window_shifts_at_edges() {
        assert_eq!(Pagination::new(200, 10, 1).visible_pages(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Pagination::new(200, 10, 10).visible_pages(), vec![8, 9, 10, 11, 12]);
        assert_eq!(Pagination::new(200, 10, 20).visible_pages(), vec![16, 17, 18, 19, 20]);
        assert_eq!(Pagination::new(200, 10, 19).visible_pages(), vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_items_with_shortcuts() {
        use PageItem::*;
        let p = Pagination::new(200, 10, 10);
        assert_eq!(
            p.items(),
            vec![
                Page { number: 1, current: false },
                Ellipsis,
                Page { number: 8, current: false },
                Page { number: 9, current: false },
                Page { number: 10, current: true },
                Page { number: 11, current: false },
                Page { number: 12, current: false },
                Ellipsis,
                Page { number: 20, current: false },
            ]
        );

        // window touching page 2 has no ellipsis before it
        let p = Pagination::new(70, 10, 4);
        assert_eq!(p.visible_pages(), vec![2, 3, 4, 5, 6]);
        assert_eq!(p.items()[0], Page { number: 1, current: false });
        assert_eq!(p.items()[1], Page { number: 2, current: false });
        assert_eq!(p.items().last(), Some(&Page { number: 7, current: false }));
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (1..=47).collect();
        assert_eq!(Pagination::new(47, 10, 2).slice(&items), &items[10..20]);
        assert_eq!(Pagination::new(47, 10, 5).slice(&items), &items[40..47]);
    }

    #[test]
    fn test_window_properties_exhaustive() {
        for total_items in 0usize..=120 {
            for per_page in 1usize..=12 {
                let total_pages = total_items.div_ceil(per_page);
                for current in 1..=total_pages.max(1) {
                    let p = Pagination::new(total_items, per_page, current);
                    let pages = p.visible_pages();
                    assert_eq!(pages.len(), total_pages.min(MAX_VISIBLE_PAGES));
                    if total_pages == 0 {
                        continue;
                    }
                    assert!(pages.contains(&current));
                    assert!(pages.windows(2).all(|w| w[1] == w[0] + 1));
                    assert!(pages[0] >= 1 && *pages.last().unwrap() <= total_pages);
                }
            }
        }
    }
}
