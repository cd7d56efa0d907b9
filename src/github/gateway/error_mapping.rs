//! Error mapping helpers for the REST gateway.

use crate::github::error::IngestError;

/// Maps a failure to send a request or read its body.
pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> IngestError {
    IngestError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a success body that is not a JSON array of objects.
pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> IngestError {
    IngestError::Api {
        message: format!("{operation} returned an unexpected body: {error}"),
    }
}
