//! Opaque record type shared by the fetcher, writer, and orchestrator.

use serde_json::{Map, Value};

use super::error::IngestError;
use super::locator::PullRequestNumber;

/// One JSON object returned by a list endpoint, passed through untouched.
pub type Record = Map<String, Value>;

/// Reads the `number` field of a pull request record.
///
/// # Errors
///
/// Returns [`IngestError::InvalidRecord`] when the field is missing, not an
/// unsigned integer, or zero.
pub fn pull_request_number(record: &Record) -> Result<PullRequestNumber, IngestError> {
    let raw = record
        .get("number")
        .ok_or_else(|| IngestError::InvalidRecord {
            message: "pull request record has no `number` field".to_owned(),
        })?;
    let value = raw.as_u64().ok_or_else(|| IngestError::InvalidRecord {
        message: format!("pull request `number` is not a positive integer: {raw}"),
    })?;
    PullRequestNumber::new(value)
}
