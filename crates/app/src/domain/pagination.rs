//! Page requests and paged results.

/// Page used when none (or an invalid one) is requested.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when none (or an invalid one) is requested.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Largest page size a caller may ask for.
pub const MAX_PER_PAGE: u64 = 100;

/// A normalised page request. Out-of-range inputs are coerced, never
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Coerce raw `page`/`per_page` values into a valid request.
    ///
    /// Missing or non-positive values fall back to the defaults and
    /// `per_page` is capped at [`MAX_PER_PAGE`].
    #[must_use]
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page
            .and_then(|page| u64::try_from(page).ok())
            .filter(|page| *page >= 1)
            .unwrap_or(DEFAULT_PAGE);

        let per_page = per_page
            .and_then(|per_page| u64::try_from(per_page).ok())
            .filter(|per_page| *per_page >= 1)
            .map_or(DEFAULT_PER_PAGE, |per_page| per_page.min(MAX_PER_PAGE));

        Self { page, per_page }
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Row limit for the store query.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }

    /// Row offset for the store query: `(page - 1) * per_page`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        let offset = (self.page - 1).saturating_mul(self.per_page);

        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    /// Number of pages needed to hold `total` rows.
    #[must_use]
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of records plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub records: Vec<T>,
    pub total: u64,
}

impl<T> Paged<T> {
    #[must_use]
    pub fn empty(total: u64) -> Self {
        Self {
            records: Vec::new(),
            total,
        }
    }

    /// Convert every record, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            records: self.records.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let page = PageRequest::new(None, None);

        assert_eq!(page.page(), 1);
        assert_eq!(page.per_page(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn out_of_range_values_are_coerced() {
        let page = PageRequest::new(Some(0), Some(500));

        assert_eq!(page.page(), 1);
        assert_eq!(page.per_page(), 100);
    }

    #[test]
    fn negative_values_are_coerced() {
        let page = PageRequest::new(Some(-3), Some(-1));

        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn offset_is_page_minus_one_times_per_page() {
        let page = PageRequest::new(Some(3), Some(10));

        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let page = PageRequest::new(Some(i64::MAX), Some(100));

        assert_eq!(page.offset(), i64::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PageRequest::new(Some(1), Some(10));

        assert_eq!(page.total_pages(25), 3);
        assert_eq!(page.total_pages(20), 2);
        assert_eq!(page.total_pages(0), 0);
    }
}
