use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

/// Raw `?page=&per_page=` query string.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Sanitized page coordinates: `page >= 1`, `1 <= per_page <= MAX_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

impl From<PageQuery> for PageRequest {
    fn from(q: PageQuery) -> Self {
        Self::new(
            q.page.unwrap_or(1),
            q.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

pub fn page_count(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// One slice of an ordered listing.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, req: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: req.page,
            per_page: req.per_page,
            total,
            pages: page_count(total, req.per_page),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            pages: self.pages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    /// Anything but a case-insensitive `desc` sorts ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(d) if d.trim().eq_ignore_ascii_case("desc") => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_items_at_ten_per_page() {
        let total = 25;
        assert_eq!(page_count(total, 10), 3);

        let third = PageRequest::new(3, 10);
        assert_eq!(third.offset(), 20);
        let on_page = (0..total).skip(third.offset() as usize).take(third.limit() as usize);
        assert_eq!(on_page.count(), 5);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let req = PageRequest::new(7, 10);
        let items: Vec<i64> = (0..25)
            .skip(req.offset() as usize)
            .take(req.limit() as usize)
            .collect();
        let page = Page::new(items, req, 25);
        assert!(page.items.is_empty());
        assert_eq!(page.pages, 3);
        assert_eq!(page.page, 7);
    }

    #[test]
    fn page_and_size_are_clamped() {
        assert_eq!(PageRequest::new(0, 10).page, 1);
        assert_eq!(PageRequest::new(-4, 10).offset(), 0);
        assert_eq!(PageRequest::new(1, 0).per_page, 1);
        assert_eq!(PageRequest::new(1, 10_000).per_page, MAX_PER_PAGE);

        let req: PageRequest = PageQuery::default().into();
        assert_eq!(req, PageRequest::new(1, DEFAULT_PER_PAGE));
    }

    #[test]
    fn empty_listing_has_zero_pages() {
        let page: Page<()> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(page.pages, 0);
    }

    #[test]
    fn sort_direction_falls_back_to_ascending() {
        assert_eq!(SortDir::parse(Some("desc")), SortDir::Desc);
        assert_eq!(SortDir::parse(Some("DESC")), SortDir::Desc);
        assert_eq!(SortDir::parse(Some("sideways")), SortDir::Asc);
        assert_eq!(SortDir::parse(None), SortDir::Asc);
    }

    #[test]
    fn map_keeps_counts() {
        let page = Page::new(vec![1, 2], PageRequest::new(2, 2), 4).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.pages, 2);
    }
}
