//! Gateways for requesting pages from the GitHub REST API.
//!
//! The fetcher talks to GitHub through [`ResourceGateway`] so that pagination
//! can be exercised against mocks, while [`RestGateway`] performs the real
//! blocking HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod rest;

pub use client::GatewayConfig;
pub use rest::RestGateway;

use crate::github::error::IngestError;
use crate::github::pagination::{PageRequest, PageResponse};

/// Gateway that can request one page of a list endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceGateway: Send + Sync {
    /// Issue a single GET for the page described by `request`.
    ///
    /// Non-success HTTP statuses are reported as
    /// [`PageResponse::Rejected`]; only transport failures and undecodable
    /// success bodies are errors.
    fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, IngestError>;
}
