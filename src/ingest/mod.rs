//! The snapshot run: five resources fetched in a fixed order.
//!
//! [`SnapshotIngest`] fetches commits, pull requests, review comments, and
//! issues, then fans out over the first pull requests to collect their
//! reviews. Each collection is written as soon as it is fetched. HTTP
//! rejections shorten a collection and are flagged in the summary;
//! transport and filesystem errors end the run.

mod resource;
mod summary;

pub use resource::Resource;
pub use summary::{IngestSummary, ResourceCount};

use tracing::info;

use crate::github::error::IngestError;
use crate::github::gateway::ResourceGateway;
use crate::github::models::{Record, pull_request_number};
use crate::github::pagination::{FetchOutcome, FetchPolicy, PaginatedFetcher, QueryParams};
use crate::github::repository_locator::RepositoryLocator;
use crate::snapshot::SnapshotWriter;

/// Pull requests whose reviews are collected by default.
pub const DEFAULT_REVIEW_SAMPLE: usize = 20;

/// Runs the snapshot sequence for one repository.
///
/// # Example
///
/// ```no_run
/// use github_snapshot::{
///     FetchPolicy, GatewayConfig, RepositoryLocator, RestGateway, SnapshotIngest,
///     SnapshotWriter,
/// };
///
/// # fn main() -> Result<(), github_snapshot::IngestError> {
/// let locator = RepositoryLocator::from_owner_repo("apache", "airflow")?;
/// let gateway = RestGateway::for_locator(&locator, &GatewayConfig::default())?;
/// let ingest = SnapshotIngest::new(
///     &gateway,
///     FetchPolicy::default(),
///     SnapshotWriter::new("data"),
///     locator,
/// );
/// let summary = ingest.run()?;
/// assert!(summary.counts().len() <= 5);
/// # Ok(())
/// # }
/// ```
pub struct SnapshotIngest<'g, G: ResourceGateway + ?Sized> {
    fetcher: PaginatedFetcher<'g, G>,
    writer: SnapshotWriter,
    locator: RepositoryLocator,
    review_sample: usize,
}

impl<'g, G: ResourceGateway + ?Sized> SnapshotIngest<'g, G> {
    /// Creates a run over `gateway` that writes through `writer`.
    #[must_use]
    pub const fn new(
        gateway: &'g G,
        policy: FetchPolicy,
        writer: SnapshotWriter,
        locator: RepositoryLocator,
    ) -> Self {
        Self {
            fetcher: PaginatedFetcher::new(gateway, policy),
            writer,
            locator,
            review_sample: DEFAULT_REVIEW_SAMPLE,
        }
    }

    /// Limits how many pull requests have their reviews collected.
    #[must_use]
    pub const fn with_review_sample(mut self, review_sample: usize) -> Self {
        self.review_sample = review_sample;
        self
    }

    /// Fetches and writes every resource, returning the row counts.
    ///
    /// # Errors
    ///
    /// Propagates transport failures, undecodable response bodies, pull
    /// requests without a usable `number`, and snapshot write failures. No
    /// summary is produced in those cases.
    pub fn run(&self) -> Result<IngestSummary, IngestError> {
        let mut summary = IngestSummary::new(self.locator.slug());
        let all_states = QueryParams::new().with("state", "all");

        let commits = self.fetch(Resource::Commits, &self.locator.commits_path(), &QueryParams::new())?;
        summary.push(self.persist(Resource::Commits, &commits.records, commits.rejected_status())?);

        let pulls = self.fetch(Resource::Pulls, &self.locator.pulls_path(), &all_states)?;
        summary.push(self.persist(Resource::Pulls, &pulls.records, pulls.rejected_status())?);

        let comments = self.fetch(
            Resource::PullComments,
            &self.locator.pull_comments_path(),
            &QueryParams::new(),
        )?;
        summary.push(self.persist(
            Resource::PullComments,
            &comments.records,
            comments.rejected_status(),
        )?);

        let issues = self.fetch(Resource::Issues, &self.locator.issues_path(), &all_states)?;
        summary.push(self.persist(Resource::Issues, &issues.records, issues.rejected_status())?);

        let (reviews, rejected_status) = self.collect_reviews(&pulls.records)?;
        summary.push(self.persist(Resource::PullReviews, &reviews, rejected_status)?);

        Ok(summary)
    }

    fn fetch(
        &self,
        resource: Resource,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<FetchOutcome, IngestError> {
        info!(%resource, endpoint, "fetching");
        self.fetcher.fetch(endpoint, params)
    }

    /// Fetches reviews for the first `review_sample` pull requests in API
    /// order and concatenates them. Returns the first rejection status seen.
    fn collect_reviews(
        &self,
        pulls: &[Record],
    ) -> Result<(Vec<Record>, Option<u16>), IngestError> {
        let mut reviews = Vec::new();
        let mut rejected_status = None;

        for pull in pulls.iter().take(self.review_sample) {
            let number = pull_request_number(pull)?;
            let outcome = self.fetch(
                Resource::PullReviews,
                &self.locator.pull_reviews_path(number),
                &QueryParams::new(),
            )?;
            rejected_status = rejected_status.or(outcome.rejected_status());
            reviews.extend(outcome.records);
        }

        Ok((reviews, rejected_status))
    }

    fn persist(
        &self,
        resource: Resource,
        records: &[Record],
        rejected_status: Option<u16>,
    ) -> Result<ResourceCount, IngestError> {
        let count = self.writer.write(resource.file_name(), records)?;
        Ok(ResourceCount {
            resource,
            count,
            rejected_status,
        })
    }
}
