//! Row counts reported at the end of a snapshot run.

use std::io::Write;

use crate::github::error::IngestError;

use super::resource::Resource;

/// Records written for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCount {
    /// Resource the count belongs to.
    pub resource: Resource,
    /// Top-level records written to the snapshot.
    pub count: usize,
    /// Status of the first rejected page, when the collection is partial.
    pub rejected_status: Option<u16>,
}

impl ResourceCount {
    /// False when an HTTP rejection cut the collection short.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.rejected_status.is_none()
    }
}

/// Per-resource counts for one repository, in run order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    repository: String,
    counts: Vec<ResourceCount>,
}

impl IngestSummary {
    /// Starts an empty summary for `repository` (an `owner/repo` slug).
    #[must_use]
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            counts: Vec::with_capacity(Resource::ALL.len()),
        }
    }

    pub(super) fn push(&mut self, count: ResourceCount) {
        self.counts.push(count);
    }

    /// `owner/repo` slug the counts belong to.
    #[must_use]
    pub fn repository(&self) -> &str {
        self.repository.as_str()
    }

    /// Counts in run order.
    #[must_use]
    pub fn counts(&self) -> &[ResourceCount] {
        &self.counts
    }

    /// Records written for `resource`, if it was collected.
    #[must_use]
    pub fn count(&self, resource: Resource) -> Option<usize> {
        self.counts
            .iter()
            .find(|entry| entry.resource == resource)
            .map(|entry| entry.count)
    }

    /// True when no resource was cut short by an HTTP rejection.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.counts.iter().all(ResourceCount::is_complete)
    }

    /// Writes the line-by-line summary.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Io`] if writing to `writer` fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), IngestError> {
        writeln!(
            writer,
            "Ingestion complete for {}, row counts:",
            self.repository
        )
        .map_err(|error| io_error(&error))?;

        for entry in &self.counts {
            match entry.rejected_status {
                Some(status) => writeln!(
                    writer,
                    "{}: {} (incomplete: HTTP {status})",
                    entry.resource, entry.count
                ),
                None => writeln!(writer, "{}: {}", entry.resource, entry.count),
            }
            .map_err(|error| io_error(&error))?;
        }

        Ok(())
    }
}

fn io_error(error: &std::io::Error) -> IngestError {
    IngestError::Io {
        message: error.to_string(),
    }
}
