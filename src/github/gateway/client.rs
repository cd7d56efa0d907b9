//! Blocking HTTP client construction for the REST gateway.

use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::blocking::Client;

use crate::github::error::IngestError;
use crate::github::locator::PersonalAccessToken;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP client behind [`RestGateway`](super::RestGateway).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Token sent as `Authorization: Bearer`. Requests are unauthenticated
    /// (and subject to GitHub's lower rate limit) without one.
    pub token: Option<PersonalAccessToken>,
    /// Overall request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Configuration with an optional token and the transport's default
    /// timeout.
    #[must_use]
    pub const fn new(token: Option<PersonalAccessToken>) -> Self {
        Self {
            token,
            timeout: None,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Builds the headers sent with every request.
///
/// # Errors
///
/// Returns `IngestError::Configuration` when the token contains characters
/// that cannot appear in an HTTP header.
pub(super) fn default_headers(config: &GatewayConfig) -> Result<HeaderMap, IngestError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

    if let Some(token) = &config.token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.value())).map_err(
            |error| IngestError::Configuration {
                message: format!("token cannot be sent as a header: {error}"),
            },
        )?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Builds a blocking client carrying the default headers.
///
/// # Errors
///
/// Returns `IngestError::Configuration` when the headers are invalid or the
/// TLS backend cannot be initialised.
pub(super) fn build_http_client(config: &GatewayConfig) -> Result<Client, IngestError> {
    let mut builder = Client::builder().default_headers(default_headers(config)?);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|error| IngestError::Configuration {
        message: format!("failed to configure GitHub HTTP client: {error}"),
    })
}

#[cfg(test)]
mod tests {
    use http::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

    use super::{GatewayConfig, default_headers};
    use crate::github::locator::PersonalAccessToken;

    #[test]
    fn anonymous_headers_omit_authorization() {
        let headers = default_headers(&GatewayConfig::default()).expect("headers should build");

        assert_eq!(
            headers.get(ACCEPT).and_then(|value| value.to_str().ok()),
            Some("application/vnd.github+json")
        );
        assert!(headers.contains_key(USER_AGENT), "user agent is required by GitHub");
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn token_is_sent_as_sensitive_bearer_header() {
        let token = PersonalAccessToken::new("ghp_example").expect("token should be valid");
        let headers =
            default_headers(&GatewayConfig::new(Some(token))).expect("headers should build");

        let value = headers
            .get(AUTHORIZATION)
            .expect("authorization header should be present");
        assert_eq!(value.to_str().ok(), Some("Bearer ghp_example"));
        assert!(value.is_sensitive());
    }
}
