//! GitHub REST access for repository snapshots.
//!
//! This module identifies the repository, issues paginated list requests
//! through a blocking `reqwest` gateway, and reports how each fetch ended so
//! callers can tell complete collections from ones cut short by an HTTP
//! error.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;
pub mod repository_locator;

pub use error::IngestError;
pub use gateway::{GatewayConfig, ResourceGateway, RestGateway};
pub use locator::{PersonalAccessToken, PullRequestNumber, RepositoryName, RepositoryOwner};
pub use models::{Record, pull_request_number};
pub use pagination::{
    FetchOutcome, FetchPolicy, PageRequest, PageResponse, PaginatedFetcher, QueryParams,
    StopReason,
};
pub use rate_limit::RateLimitInfo;
pub use repository_locator::RepositoryLocator;

#[cfg(test)]
pub use gateway::MockResourceGateway;
