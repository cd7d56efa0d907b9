//! Blocking `reqwest` gateway for GitHub list endpoints.

use http::StatusCode;
use reqwest::blocking::Client;

use crate::github::error::IngestError;
use crate::github::models::Record;
use crate::github::pagination::{PageRequest, PageResponse};
use crate::github::rate_limit::RateLimitInfo;
use crate::github::repository_locator::RepositoryLocator;

use super::ResourceGateway;
use super::client::{GatewayConfig, build_http_client};
use super::error_mapping::{map_decode_error, map_transport_error};
use super::http_utils::rejection_message;

/// REST gateway issuing one blocking GET per page.
pub struct RestGateway {
    client: Client,
    locator: RepositoryLocator,
}

impl RestGateway {
    /// Creates a gateway from a prepared client.
    #[must_use]
    pub const fn new(client: Client, locator: RepositoryLocator) -> Self {
        Self { client, locator }
    }

    /// Builds a client for the locator's API base.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Configuration` when the HTTP client cannot be
    /// constructed.
    pub fn for_locator(
        locator: &RepositoryLocator,
        config: &GatewayConfig,
    ) -> Result<Self, IngestError> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, locator.clone()))
    }
}

impl ResourceGateway for RestGateway {
    fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, IngestError> {
        let operation = format!("GET {} (page {})", request.endpoint(), request.page());
        let url = self.locator.endpoint_url(request.endpoint());

        let response = self
            .client
            .get(url)
            .query(&request.query_pairs())
            .send()
            .map_err(|error| map_transport_error(&operation, &error))?;

        let status = response.status();
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let body = response
            .text()
            .map_err(|error| map_transport_error(&operation, &error))?;

        if status != StatusCode::OK {
            return Ok(PageResponse::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
                rate_limit,
            });
        }

        let records: Vec<Record> =
            serde_json::from_str(&body).map_err(|error| map_decode_error(&operation, &error))?;

        Ok(PageResponse::Records {
            records,
            rate_limit,
        })
    }
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
