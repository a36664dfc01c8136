//! Page-number pagination shared by the GHC queue endpoints.
//!
//! Queue endpoints accept optional `page` and `perPage` query parameters.
//! [`PageRequest`] normalises them (defaults and bounds) before the request
//! reaches a service, and [`Page`] carries one slice of results back along
//! with the total row count so adapters can build their list envelopes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page served when the caller omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size served when the caller omits `perPage`.
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Rejections produced while normalising raw paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// `page` was zero, negative, or too large to represent.
    #[error("page must be a positive integer (got {0})")]
    PageOutOfRange(i64),
    /// `perPage` fell outside `1..=MAX_PER_PAGE`.
    #[error("perPage must be between 1 and {MAX_PER_PAGE} (got {0})")]
    PerPageOutOfRange(i64),
}

/// Validated paging parameters.
///
/// ## Invariants
/// - `page >= 1`.
/// - `1 <= per_page <= MAX_PER_PAGE`.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(Some(3), Some(25)).expect("valid paging");
/// assert_eq!(request.offset(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

/// Unvalidated wire shape; deserialising a [`PageRequest`] goes through
/// [`PageRequest::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageRequest {
    page: Option<i64>,
    per_page: Option<i64>,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.per_page)
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

impl PageRequest {
    /// Normalise raw query values, applying defaults for missing ones.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is out of range.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Result<Self, PageRequestError> {
        let page_number = match page {
            None => DEFAULT_PAGE,
            Some(raw) => u32::try_from(raw)
                .ok()
                .filter(|value| *value >= 1)
                .ok_or(PageRequestError::PageOutOfRange(raw))?,
        };
        let page_size = match per_page {
            None => DEFAULT_PER_PAGE,
            Some(raw) => u32::try_from(raw)
                .ok()
                .filter(|value| (1..=MAX_PER_PAGE).contains(value))
                .ok_or(PageRequestError::PerPageOutOfRange(raw))?,
        };
        Ok(Self {
            page: page_number,
            per_page: page_size,
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of rows on the page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of rows preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

/// One page of results together with the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The request that produced this page.
    pub request: PageRequest,
    /// Total rows matching the query across all pages.
    pub total_count: u64,
    /// Rows on this page.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page from a request, the total row count, and the rows served.
    #[must_use]
    pub const fn new(request: PageRequest, total_count: u64, items: Vec<T>) -> Self {
        Self {
            request,
            total_count,
            items,
        }
    }

    /// Number of pages needed to serve `total_count` rows.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.request.per_page))
    }

    /// Convert every row, giving up on the whole page if any row fails.
    pub fn try_map<U, F>(self, f: F) -> Option<Page<U>>
    where
        F: FnMut(T) -> Option<U>,
    {
        let items = self.items.into_iter().map(f).collect::<Option<Vec<_>>>()?;
        Some(Page {
            request: self.request,
            total_count: self.total_count,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for paging normalisation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_values_use_defaults() {
        let request = PageRequest::new(None, None).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 20);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(Some(0), None, PageRequestError::PageOutOfRange(0))]
    #[case(Some(-4), None, PageRequestError::PageOutOfRange(-4))]
    #[case(None, Some(0), PageRequestError::PerPageOutOfRange(0))]
    #[case(None, Some(101), PageRequestError::PerPageOutOfRange(101))]
    fn out_of_range_values_are_rejected(
        #[case] page: Option<i64>,
        #[case] per_page: Option<i64>,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, per_page), Err(expected));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(40, 2)]
    fn page_count_rounds_up(#[case] total: u64, #[case] expected: u64) {
        let page: Page<u8> = Page::new(PageRequest::default(), total, Vec::new());
        assert_eq!(page.page_count(), expected);
    }

    #[rstest]
    fn try_map_fails_when_any_item_fails() {
        let page = Page::new(PageRequest::default(), 2, vec![1_u8, 0]);
        let mapped = page.try_map(|value| (value > 0).then_some(value));
        assert!(mapped.is_none());
    }

    #[rstest]
    fn try_map_preserves_envelope() {
        let request = PageRequest::new(Some(2), Some(5)).expect("valid paging");
        let page = Page::new(request, 7, vec![1_u8, 2]);
        let mapped = page
            .try_map(|value| Some(u16::from(value) * 10))
            .expect("all items map");
        assert_eq!(mapped.request, request);
        assert_eq!(mapped.total_count, 7);
        assert_eq!(mapped.items, vec![10, 20]);
    }

    #[rstest]
    fn page_request_serialises_camel_case() {
        let value = serde_json::to_value(PageRequest::default()).expect("serialise");
        assert_eq!(value, serde_json::json!({"page": 1, "perPage": 20}));
    }

    #[rstest]
    #[case(serde_json::json!({"page": 0, "perPage": 20}), "page must be a positive integer")]
    #[case(serde_json::json!({"page": 1, "perPage": 500}), "perPage must be between 1 and 100")]
    fn deserialising_enforces_bounds(#[case] input: serde_json::Value, #[case] message: &str) {
        let err = serde_json::from_value::<PageRequest>(input).expect_err("out of range");
        assert!(err.to_string().contains(message), "unexpected error: {err}");
    }

    #[rstest]
    fn deserialising_applies_defaults() {
        let request: PageRequest =
            serde_json::from_value(serde_json::json!({"page": 3})).expect("valid paging");
        assert_eq!(request, PageRequest::new(Some(3), None).expect("valid paging"));
    }
}
