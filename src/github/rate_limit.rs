//! Rate limit information from GitHub API responses.
//!
//! GitHub reports quota usage on every response. The fetcher only logs and
//! reports these values; pacing between pages stays fixed.

use std::time::{SystemTime, UNIX_EPOCH};

use http::HeaderMap;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit information extracted from GitHub API response headers.
///
/// # Example
///
/// ```
/// use github_snapshot::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(5000, 4999, 1700000000);
/// assert!(!info.is_exhausted());
/// assert_eq!(info.remaining(), 4999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    limit: u32,
    /// Remaining requests in the current window.
    remaining: u32,
    /// Unix timestamp when the rate limit resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit info instance.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Reads `X-RateLimit-Limit`, `X-RateLimit-Remaining`, and
    /// `X-RateLimit-Reset`.
    ///
    /// Returns `None` unless all three headers are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_number(headers, LIMIT_HEADER)?;
        let remaining = header_number(headers, REMAINING_HEADER)?;
        let reset_at = header_number(headers, RESET_HEADER)?;
        Some(Self::new(limit, remaining, reset_at))
    }

    /// Returns the maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the Unix timestamp when the rate limit resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true if the rate limit has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Calculates seconds until the rate limit resets.
    ///
    /// Returns 0 if the reset time has already passed or if the system time
    /// cannot be determined.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0);

        self.reset_at.saturating_sub(now)
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use http::{HeaderMap, HeaderValue};
    use rstest::rstest;

    use super::RateLimitInfo;

    fn headers(entries: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn from_headers_reads_all_three_values() {
        let map = headers(&[
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1700000000"),
        ]);

        let info = RateLimitInfo::from_headers(&map).expect("headers should parse");
        assert_eq!(info, RateLimitInfo::new(60, 0, 1_700_000_000));
        assert!(info.is_exhausted());
    }

    #[rstest]
    #[case::missing_reset(&[("x-ratelimit-limit", "60"), ("x-ratelimit-remaining", "59")])]
    #[case::non_numeric(&[
        ("x-ratelimit-limit", "sixty"),
        ("x-ratelimit-remaining", "59"),
        ("x-ratelimit-reset", "1"),
    ])]
    #[case::none(&[])]
    fn from_headers_returns_none_for_incomplete_headers(
        #[case] entries: &[(&'static str, &'static str)],
    ) {
        assert_eq!(RateLimitInfo::from_headers(&headers(entries)), None);
    }

    #[test]
    fn seconds_until_reset_returns_zero_when_reset_has_passed() {
        let info = RateLimitInfo::new(5000, 0, 0);
        assert_eq!(info.seconds_until_reset(), 0);
    }

    #[test]
    fn seconds_until_reset_returns_positive_for_future_reset() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_secs();
        let info = RateLimitInfo::new(5000, 0, now + 60);

        let seconds = info.seconds_until_reset();
        assert!(
            (1..=60).contains(&seconds),
            "expected 1..=60 seconds until reset, got {seconds}"
        );
    }
}
