use crate::users::pagination::UserPage;

/// Record range and page numbers shown under the listing table.
/// Which page each control leads to is decided by `PagerController`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page: i64,
    pub count: i64,
    pub pages: i64,
    /// First record number shown (1-based), 0 when nothing is shown.
    pub from: i64,
    /// Last record number shown.
    pub to: i64,
}

impl PaginationView {
    pub fn new(page: i64, page_size: i64, count: i64, pages: i64) -> Self {
        let (from, to) = if count == 0 || page > pages {
            (0, 0)
        } else {
            let from = (page - 1).saturating_mul(page_size).saturating_add(1);
            let to = if page < pages {
                page.saturating_mul(page_size)
            } else {
                count
            };
            (from, to)
        };

        Self {
            page,
            count,
            pages,
            from,
            to,
        }
    }

    pub fn from_page(page: &UserPage) -> Self {
        Self::new(page.page, page.page_size, page.count, page.pages)
    }

    /// e.g. "6 to 10 of 12"
    pub fn summary(&self) -> String {
        format!("{} to {} of {}", self.from, self.to, self.count)
    }

    /// Page number buttons, `(number, is_current)`.
    pub fn page_numbers(&self) -> impl Iterator<Item = (i64, bool)> + '_ {
        (1..=self.pages).map(move |n| (n, n == self.page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page_summary() {
        let view = PaginationView::new(2, 5, 12, 3);
        assert_eq!(view.summary(), "6 to 10 of 12");
    }

    #[test]
    fn test_last_page_summary_uses_count() {
        let view = PaginationView::new(3, 5, 12, 3);
        assert_eq!(view.summary(), "11 to 12 of 12");
    }

    #[test]
    fn test_first_page_summary() {
        let view = PaginationView::new(1, 5, 12, 3);
        assert_eq!(view.summary(), "1 to 5 of 12");
    }

    #[test]
    fn test_empty_store() {
        let view = PaginationView::new(1, 5, 0, 0);
        assert_eq!(view.summary(), "0 to 0 of 0");
        assert_eq!(view.page_numbers().count(), 0);
    }

    #[test]
    fn test_past_the_end() {
        let view = PaginationView::new(7, 5, 12, 3);
        assert_eq!(view.summary(), "0 to 0 of 12");
    }

    #[test]
    fn test_page_numbers_mark_current() {
        let view = PaginationView::new(2, 5, 12, 3);
        let numbers: Vec<_> = view.page_numbers().collect();
        assert_eq!(numbers, vec![(1, false), (2, true), (3, false)]);
    }
}
