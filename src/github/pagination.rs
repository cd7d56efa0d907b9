//! Page-by-page retrieval of GitHub list endpoints.
//!
//! [`PaginatedFetcher`] walks a list endpoint from page 1, one blocking
//! request at a time, until GitHub returns an empty page, a non-success
//! status, or the page bound is reached. A fixed delay separates requests.
//! HTTP rejections do not fail the call; they end it early and are recorded
//! in [`FetchOutcome::stop`].

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::IngestError;
use super::gateway::ResourceGateway;
use super::models::Record;
use super::rate_limit::RateLimitInfo;

/// Items requested per page. GitHub's maximum for list endpoints.
pub const PER_PAGE: u8 = 100;

/// Default upper bound on pages fetched per endpoint.
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Default courtesy delay between consecutive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

const PAGE_KEY: &str = "page";
const PER_PAGE_KEY: &str = "per_page";

/// Extra query parameters for a list endpoint, such as `state=all`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces one parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns true when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// One page of a list endpoint to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    endpoint: String,
    params: QueryParams,
    page: u32,
    per_page: u8,
}

impl PageRequest {
    /// Describes page `page` of `endpoint`.
    #[must_use]
    pub fn new(endpoint: &str, params: &QueryParams, page: u32, per_page: u8) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            params: params.clone(),
            page,
            per_page,
        }
    }

    /// API path relative to the API base.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Query string pairs: the caller's parameters followed by `per_page`
    /// and `page`. Caller-supplied `page` or `per_page` keys are dropped.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .filter(|(key, _)| key.as_str() != PAGE_KEY && key.as_str() != PER_PAGE_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        pairs.push((PER_PAGE_KEY.to_owned(), self.per_page.to_string()));
        pairs.push((PAGE_KEY.to_owned(), self.page.to_string()));
        pairs
    }
}

/// What the gateway saw for one page request.
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    /// A 200 response decoded into records. An empty list marks the end of
    /// the data.
    Records {
        /// Records on this page, in API order.
        records: Vec<Record>,
        /// Quota headers on the response, when present.
        rate_limit: Option<RateLimitInfo>,
    },
    /// Any non-200 response.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// GitHub's error message, or the raw body when it has none.
        message: String,
        /// Quota headers on the response, when present.
        rate_limit: Option<RateLimitInfo>,
    },
}

/// Why a fetch call stopped requesting pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// GitHub returned an empty page.
    EndOfData,
    /// The page bound was reached while pages were still non-empty.
    PageLimit,
    /// GitHub rejected a page; later pages were never requested.
    Rejected {
        /// HTTP status code of the rejected page.
        status: u16,
        /// Error message returned with the rejection.
        message: String,
    },
}

/// Records accumulated by one fetch call and how the call ended.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Accumulated records in request order.
    pub records: Vec<Record>,
    /// HTTP requests issued, including the one that ended the call.
    pub requests: u32,
    /// Why pagination stopped.
    pub stop: StopReason,
    /// Most recent quota headers seen.
    pub rate_limit: Option<RateLimitInfo>,
}

impl FetchOutcome {
    /// False when a rejected page cut the collection short.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(self.stop, StopReason::Rejected { .. })
    }

    /// HTTP status of the rejected page, if any.
    #[must_use]
    pub const fn rejected_status(&self) -> Option<u16> {
        match &self.stop {
            StopReason::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Page bound and pacing applied by [`PaginatedFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    max_pages: u32,
    page_delay: Duration,
}

impl FetchPolicy {
    /// Creates a policy with an explicit page bound and delay.
    #[must_use]
    pub const fn new(max_pages: u32, page_delay: Duration) -> Self {
        Self {
            max_pages,
            page_delay,
        }
    }

    /// Default page bound used by [`PaginatedFetcher::fetch`].
    #[must_use]
    pub const fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Delay between consecutive pages.
    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        self.page_delay
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY)
    }
}

/// Sequential paginated fetcher over a [`ResourceGateway`].
pub struct PaginatedFetcher<'g, G: ResourceGateway + ?Sized> {
    gateway: &'g G,
    policy: FetchPolicy,
}

impl<'g, G: ResourceGateway + ?Sized> PaginatedFetcher<'g, G> {
    /// Creates a fetcher that issues requests through `gateway`.
    #[must_use]
    pub const fn new(gateway: &'g G, policy: FetchPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Fetches `endpoint` up to the policy's page bound.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_pages`].
    pub fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<FetchOutcome, IngestError> {
        self.fetch_pages(endpoint, params, self.policy.max_pages)
    }

    /// Fetches `endpoint` page by page, stopping on the first empty page, the
    /// first non-success response, or after `max_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidPagination`] for an empty endpoint or a
    /// zero page bound, and propagates gateway errors (transport failures or
    /// undecodable bodies) unchanged.
    pub fn fetch_pages(
        &self,
        endpoint: &str,
        params: &QueryParams,
        max_pages: u32,
    ) -> Result<FetchOutcome, IngestError> {
        validate_fetch_params(endpoint, max_pages)?;

        let mut records = Vec::new();
        let mut requests = 0_u32;
        let mut rate_limit = None;
        let mut page = 1_u32;

        let stop = loop {
            if page > max_pages {
                break StopReason::PageLimit;
            }

            let request = PageRequest::new(endpoint, params, page, PER_PAGE);
            requests += 1;

            match self.gateway.fetch_page(&request)? {
                PageResponse::Rejected {
                    status,
                    message,
                    rate_limit: seen,
                } => {
                    rate_limit = seen.or(rate_limit);
                    log_rejection(endpoint, page, status, &message, rate_limit);
                    break StopReason::Rejected { status, message };
                }
                PageResponse::Records {
                    records: batch,
                    rate_limit: seen,
                } => {
                    rate_limit = seen.or(rate_limit);
                    if batch.is_empty() {
                        break StopReason::EndOfData;
                    }

                    debug!(
                        endpoint,
                        page,
                        count = batch.len(),
                        remaining = rate_limit.map(|info| info.remaining()),
                        "fetched page"
                    );
                    records.extend(batch);
                    page = page.saturating_add(1);

                    if page <= max_pages {
                        self.pause();
                    }
                }
            }
        };

        Ok(FetchOutcome {
            records,
            requests,
            stop,
            rate_limit,
        })
    }

    fn pause(&self) {
        if !self.policy.page_delay.is_zero() {
            thread::sleep(self.policy.page_delay);
        }
    }
}

fn validate_fetch_params(endpoint: &str, max_pages: u32) -> Result<(), IngestError> {
    if endpoint.trim().is_empty() {
        return Err(IngestError::InvalidPagination {
            message: "endpoint must not be empty".to_owned(),
        });
    }

    if max_pages == 0 {
        return Err(IngestError::InvalidPagination {
            message: "max_pages must be at least 1".to_owned(),
        });
    }

    Ok(())
}

fn log_rejection(
    endpoint: &str,
    page: u32,
    status: u16,
    message: &str,
    rate_limit: Option<RateLimitInfo>,
) {
    match rate_limit.filter(RateLimitInfo::is_exhausted) {
        Some(info) => warn!(
            endpoint,
            page,
            status,
            reset_in_secs = info.seconds_until_reset(),
            "fetch stopped early, rate limit exhausted: {message}"
        ),
        None => warn!(endpoint, page, status, "fetch stopped early: {message}"),
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
