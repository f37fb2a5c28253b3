//! Shared types: header-derived rate limit and quota state, and the two
//! pagination protocols used by list endpoints.

mod enums;

pub use enums::{DnsStatus, DomainStatus, ErrorCode, EventType, WebhookAuthType, WebhookStatus};

use crate::value_objects::Cursor;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Reads a header as an integer. `HeaderMap` lookups are case-insensitive
/// and `get` returns the first value when a header is multi-valued, so the
/// normalization happens once at this boundary. Non-numeric values coerce
/// to 0, matching the server's lenient integer headers.
fn header_int(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .map(|value| value.to_str().ok().and_then(|s| s.trim().parse().ok()).unwrap_or(0))
}

/// API rate limit state extracted from response headers.
///
/// Present on every API response (per-second request throttling, distinct
/// from the sending quota).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Requests allowed per window
    pub limit: u64,
    /// Requests remaining in the current window
    pub remaining: u64,
    /// Unix timestamp when the window resets
    pub reset: u64,
}

impl RateLimit {
    /// Parses the `X-RateLimit-*` headers. Returns `None` when the anchor
    /// header `X-RateLimit-Limit` is absent, never a zeroed-out value.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_int(headers, "X-RateLimit-Limit")?;

        Some(Self {
            limit,
            remaining: header_int(headers, "X-RateLimit-Remaining").unwrap_or(0),
            reset: header_int(headers, "X-RateLimit-Reset").unwrap_or(0),
        })
    }
}

/// Account-level sending quota extracted from response headers.
///
/// Present for free tier teams on send responses, both 200 and 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendingQuota {
    /// Emails allowed per month
    pub monthly_limit: u64,
    /// Emails remaining this month
    pub monthly_remaining: u64,
    /// Unix timestamp when the monthly quota resets
    pub monthly_reset: u64,
    /// Emails allowed per day
    pub daily_limit: u64,
    /// Emails remaining today
    pub daily_remaining: u64,
    /// Unix timestamp when the daily quota resets
    pub daily_reset: u64,
}

impl SendingQuota {
    /// Parses the `X-Monthly-*` / `X-Daily-*` headers. Returns `None` when
    /// neither `X-Monthly-Limit` nor `X-Daily-Limit` is present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let monthly_limit = header_int(headers, "X-Monthly-Limit");
        let daily_limit = header_int(headers, "X-Daily-Limit");

        if monthly_limit.is_none() && daily_limit.is_none() {
            return None;
        }

        Some(Self {
            monthly_limit: monthly_limit.unwrap_or(0),
            monthly_remaining: header_int(headers, "X-Monthly-Remaining").unwrap_or(0),
            monthly_reset: header_int(headers, "X-Monthly-Reset").unwrap_or(0),
            daily_limit: daily_limit.unwrap_or(0),
            daily_remaining: header_int(headers, "X-Daily-Remaining").unwrap_or(0),
            daily_reset: header_int(headers, "X-Daily-Reset").unwrap_or(0),
        })
    }

    /// Whether the monthly allowance is used up.
    pub fn is_monthly_quota_exhausted(&self) -> bool {
        self.monthly_remaining == 0
    }

    /// Whether the daily allowance is used up.
    pub fn is_daily_quota_exhausted(&self) -> bool {
        self.daily_remaining == 0
    }
}

/// Cursor-based pagination, used by email event listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// Cursor for the next page, absent on the last page
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// True iff a next page exists, i.e. the cursor is present.
    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Page-number pagination, used by template and project listings.
///
/// A distinct protocol from the cursor-based [`Pagination`]; the two are
/// deliberately not unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PagePagination {
    /// The page this response covers (1-based)
    pub current_page: u32,
    /// The final page number
    pub last_page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items across all pages
    pub total: u64,
}

impl PagePagination {
    /// True iff `current_page < last_page`.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }

    /// True iff this is not the first page.
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// The next page number, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.current_page + 1)
    }

    /// The previous page number, if any.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous_page().then(|| self.current_page - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                name.parse::<HeaderName>().unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn rate_limit_from_headers() {
        let map = headers(&[
            ("X-RateLimit-Limit", "3"),
            ("X-RateLimit-Remaining", "2"),
            ("X-RateLimit-Reset", "1740787201"),
        ]);

        let limit = RateLimit::from_headers(&map).unwrap();
        assert_eq!(limit.limit, 3);
        assert_eq!(limit.remaining, 2);
        assert_eq!(limit.reset, 1740787201);
    }

    #[test]
    fn rate_limit_absent_without_anchor_header() {
        let map = headers(&[("Content-Type", "application/json")]);
        assert!(RateLimit::from_headers(&map).is_none());
    }

    #[test]
    fn rate_limit_lookup_is_case_insensitive_and_takes_first_value() {
        let map = headers(&[
            ("x-ratelimit-limit", "3"),
            ("x-ratelimit-limit", "99"),
            ("X-RATELIMIT-REMAINING", "1"),
        ]);

        let limit = RateLimit::from_headers(&map).unwrap();
        assert_eq!(limit.limit, 3);
        assert_eq!(limit.remaining, 1);
        assert_eq!(limit.reset, 0);
    }

    #[test]
    fn quota_from_headers() {
        let map = headers(&[
            ("X-Monthly-Limit", "3000"),
            ("X-Monthly-Remaining", "1500"),
            ("X-Monthly-Reset", "1740787201"),
            ("X-Daily-Limit", "100"),
            ("X-Daily-Remaining", "0"),
            ("X-Daily-Reset", "1740700800"),
        ]);

        let quota = SendingQuota::from_headers(&map).unwrap();
        assert_eq!(quota.monthly_limit, 3000);
        assert_eq!(quota.daily_remaining, 0);
        assert!(quota.is_daily_quota_exhausted());
        assert!(!quota.is_monthly_quota_exhausted());
    }

    #[test]
    fn quota_present_with_only_daily_headers() {
        let map = headers(&[("X-Daily-Limit", "100"), ("X-Daily-Remaining", "42")]);

        let quota = SendingQuota::from_headers(&map).unwrap();
        assert_eq!(quota.monthly_limit, 0);
        assert_eq!(quota.daily_remaining, 42);
    }

    #[test]
    fn quota_absent_without_any_quota_headers() {
        let map = headers(&[("X-RateLimit-Limit", "3")]);
        assert!(SendingQuota::from_headers(&map).is_none());
    }

    #[test]
    fn cursor_pagination_has_more_iff_cursor_present() {
        let page: Pagination =
            serde_json::from_value(serde_json::json!({"next_cursor": "abc", "per_page": 25}))
                .unwrap();
        assert!(page.has_next_page());

        let last: Pagination =
            serde_json::from_value(serde_json::json!({"per_page": 25})).unwrap();
        assert!(!last.has_next_page());
    }

    #[test]
    fn page_pagination_predicates() {
        let page = PagePagination {
            current_page: 2,
            last_page: 5,
            per_page: 20,
            total: 93,
        };
        assert!(page.has_next_page());
        assert!(page.has_previous_page());
        assert_eq!(page.next_page(), Some(3));
        assert_eq!(page.previous_page(), Some(1));

        let last = PagePagination {
            current_page: 5,
            last_page: 5,
            per_page: 20,
            total: 93,
        };
        assert!(!last.has_next_page());
        assert_eq!(last.next_page(), None);
    }
}
