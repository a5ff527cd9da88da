//! Paging state and its URL query-string codec.
//!
//! Grid components track a zero-based page index while the backend is
//! 1-indexed on the wire. The `zero_based` flag records which convention a
//! [`PageQuery`] uses so the codec can convert exactly once, at encoding
//! time - never the reverse.

use url::form_urlencoded;

/// Paging state for a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Page index in the convention indicated by `zero_based`.
    pub page: u32,
    /// Rows per page, always > 0.
    pub page_size: u32,
    /// Optional sort field, passed through verbatim.
    pub order_by: Option<String>,
    /// Whether `page` is 0-indexed (grid convention) or 1-indexed (wire
    /// convention).
    pub zero_based: bool,
}

impl PageQuery {
    /// Default page size used across all list screens.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Default query in the grid convention: first page is 0.
    #[must_use]
    pub const fn zero_based() -> Self {
        Self {
            page: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
            order_by: None,
            zero_based: true,
        }
    }

    /// Default query in the wire convention: first page is 1.
    #[must_use]
    pub const fn one_based() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            order_by: None,
            zero_based: false,
        }
    }

    /// Set the page index.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the sort field.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// The page number as the backend expects it: 1-indexed.
    #[must_use]
    pub const fn wire_page(&self) -> u32 {
        if self.zero_based { self.page + 1 } else { self.page }
    }

    /// Encode as `page=..&pageSize=..[&orderBy=..]` plus any additional
    /// parameters, in the given order.
    ///
    /// Additional parameters with a `None` value are omitted entirely, not
    /// emitted as empty strings. Encoding the same input twice yields the
    /// same string.
    #[must_use]
    pub fn to_params(&self, additional: &[(&str, Option<&str>)]) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", &self.wire_page().to_string());
        serializer.append_pair("pageSize", &self.page_size.to_string());

        if let Some(order_by) = &self.order_by {
            serializer.append_pair("orderBy", order_by);
        }

        for (key, value) in additional {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }

        serializer.finish()
    }

    /// Encode with no additional parameters.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_params(&[])
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::zero_based()
    }
}

/// A paged query with a free-text search term.
///
/// Autocomplete inputs and filterable grids use this; the `search`
/// parameter is appended only when the term is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub page: PageQuery,
    pub search: String,
}

impl SearchQuery {
    /// Search query with the wire-convention page defaults.
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            page: PageQuery::one_based(),
            search: search.into(),
        }
    }

    /// Encode paging, additional parameters, then `search` when non-empty.
    #[must_use]
    pub fn to_params(&self, additional: &[(&str, Option<&str>)]) -> String {
        let mut params = self.page.to_params(additional);
        if !self.search.is_empty() {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            serializer.append_pair("search", &self.search);
            params.push('&');
            params.push_str(&serializer.finish());
        }
        params
    }

    /// Encode with no additional parameters.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_params(&[])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_based_emits_incremented_page() {
        let query = PageQuery::zero_based().page(3);
        assert_eq!(query.to_query_string(), "page=4&pageSize=10");
    }

    #[test]
    fn test_one_based_emits_page_unchanged() {
        let query = PageQuery::one_based().page(3);
        assert_eq!(query.to_query_string(), "page=3&pageSize=10");
    }

    #[test]
    fn test_order_by_included_when_set() {
        let query = PageQuery::one_based().order_by("studyDate");
        assert_eq!(query.to_query_string(), "page=1&pageSize=10&orderBy=studyDate");
    }

    #[test]
    fn test_additional_params_preserve_order_and_skip_none() {
        let query = PageQuery::one_based();
        let params = query.to_params(&[
            ("organizationName", Some("acme")),
            ("organizationId", None),
            ("country", Some("DE")),
        ]);
        assert_eq!(
            params,
            "page=1&pageSize=10&organizationName=acme&country=DE"
        );
    }

    #[test]
    fn test_encoding_is_stable() {
        let query = PageQuery::zero_based().page(2).order_by("name");
        let additional = [("filter", Some("a b"))];
        let first = query.to_params(&additional);
        let second = query.to_params(&additional);
        assert_eq!(first, second);
        assert_eq!(first, "page=3&pageSize=10&orderBy=name&filter=a+b");
    }

    #[test]
    fn test_search_appended_only_when_non_empty() {
        let query = SearchQuery::new("acme");
        assert_eq!(query.to_query_string(), "page=1&pageSize=10&search=acme");

        let empty = SearchQuery::new("");
        assert_eq!(empty.to_query_string(), "page=1&pageSize=10");
    }

    #[test]
    fn test_search_term_is_percent_encoded() {
        let query = SearchQuery::new("müller & söhne");
        let params = query.to_query_string();
        assert!(params.starts_with("page=1&pageSize=10&search="));
        // The ampersand inside the term must be escaped, leaving exactly the
        // two separator ampersands.
        assert_eq!(params.matches('&').count(), 2);
    }
}
