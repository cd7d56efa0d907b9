//! Error types exposed by the GitHub snapshot layer.

use thiserror::Error;

/// Errors that abort a snapshot run.
///
/// HTTP error responses have no variant here: a rejected page ends that
/// resource's fetch and is reported through
/// [`StopReason::Rejected`](super::pagination::StopReason::Rejected) instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    /// The API base URL could not be parsed.
    #[error("API URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository owner or name was rejected.
    #[error("invalid repository: {message}")]
    InvalidRepository {
        /// Which part of the repository identity was rejected.
        message: String,
    },

    /// A token was supplied but contained only whitespace.
    #[error("personal access token must not be blank")]
    MissingToken,

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// GitHub answered with a body that could not be used.
    #[error("GitHub API error: {message}")]
    Api {
        /// Description of the unusable response.
        message: String,
    },

    /// A fetched record lacked a field the run depends on.
    #[error("invalid record: {message}")]
    InvalidRecord {
        /// Which field was missing or malformed.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
