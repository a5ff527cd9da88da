//! Response envelopes returned by every backend call.
//!
//! The backend wraps each response in a `{success, data, error}` object.
//! `success == true` means `error` is absent; `success == false` means
//! `data` is absent and `error` carries a human-readable message. The
//! constructors below are the only way this crate produces envelopes, so
//! the invariant cannot be violated from safe call sites.

use serde::{Deserialize, Serialize};

/// A success-or-domain-failure wrapper around a backend response body.
///
/// Domain failures (HTTP 400 on a well-formed request) land here as
/// `success == false`; transport failures never produce an `Envelope` at
/// all - see `ApiError` in the client crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful response carrying a payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successful response without a payload (command acknowledgements).
    #[must_use]
    pub const fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Domain failure with a user-facing message.
    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Whether the call succeeded at the domain level.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.success
    }

    /// The failure message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Map the payload type, preserving success/error state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

/// A counted page of results.
///
/// Flattens an [`Envelope`] around `Vec<T>` and adds the paging metadata the
/// backend reports: `pagesCount = ceil(totalItems / pageSize)`. The backend
/// does not report an exact total, so [`Paged::row_count`] is an upper-bound
/// approximation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    #[serde(flatten)]
    pub envelope: Envelope<Vec<T>>,
    pub page_index: u32,
    pub page_size: u32,
    pub pages_count: u32,
}

impl<T> Paged<T> {
    /// Successful page of items.
    #[must_use]
    pub const fn ok(items: Vec<T>, page_index: u32, page_size: u32, pages_count: u32) -> Self {
        Self {
            envelope: Envelope::ok(items),
            page_index,
            page_size,
            pages_count,
        }
    }

    /// Failed page request; paging metadata is zeroed.
    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            envelope: Envelope::err(message),
            page_index: 0,
            page_size: 0,
            pages_count: 0,
        }
    }

    /// Whether the call succeeded at the domain level.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.envelope.success
    }

    /// The items on this page, empty when the call failed.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.envelope.data.as_deref().unwrap_or_default()
    }

    /// Upper bound on the total number of rows across all pages.
    ///
    /// Grid components use this to size their paginators; it overshoots by
    /// up to `page_size - 1` rows on the last page.
    #[must_use]
    pub const fn row_count(&self) -> u64 {
        self.pages_count as u64 * self.page_size as u64
    }
}

/// `ceil(total_items / page_size)`, the value the backend reports as
/// `pagesCount`.
#[must_use]
pub const fn pages_count(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    (total_items.div_ceil(page_size as u64)) as u32
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_has_no_error() {
        let env = Envelope::ok(42);
        assert!(env.success);
        assert_eq!(env.data, Some(42));
        assert!(env.error.is_none());
    }

    #[test]
    fn test_err_has_no_data() {
        let env: Envelope<i32> = Envelope::err("bad input");
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.error_message(), Some("bad input"));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let json = serde_json::to_string(&Envelope::ok("x")).unwrap();
        assert_eq!(json, r#"{"success":true,"data":"x"}"#);

        let json = serde_json::to_string(&Envelope::<String>::err("nope")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"nope"}"#);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let env: Envelope<String> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.success);
        assert!(env.data.is_none());
        assert!(env.error.is_none());
    }

    #[test]
    fn test_paged_wire_shape() {
        let page = Paged::ok(vec![1, 2, 3], 1, 10, 4);
        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"data":[1,2,3],"pageIndex":1,"pageSize":10,"pagesCount":4}"#
        );

        let parsed: Paged<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, page);
    }

    #[test]
    fn test_paged_items_empty_on_failure() {
        let page: Paged<i32> = Paged::err("search failed");
        assert!(page.items().is_empty());
        assert_eq!(page.envelope.error_message(), Some("search failed"));
    }

    #[test]
    fn test_row_count_is_upper_bound() {
        // 35 items at page size 10 -> 4 pages -> reported bound 40
        let count = pages_count(35, 10);
        assert_eq!(count, 4);
        let page: Paged<i32> = Paged::ok(vec![], 1, 10, count);
        assert_eq!(page.row_count(), 40);
    }

    #[test]
    fn test_pages_count_exact_multiple() {
        assert_eq!(pages_count(40, 10), 4);
        assert_eq!(pages_count(0, 10), 0);
        assert_eq!(pages_count(1, 10), 1);
        assert_eq!(pages_count(10, 0), 0);
    }
}
