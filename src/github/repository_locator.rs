//! Repository locator and the REST paths of every snapshotted resource.
//!
//! Provides [`RepositoryLocator`] for identifying a GitHub repository and the
//! API base it is served from. Paths are relative to the API base.

use url::Url;

use super::error::IngestError;
use super::locator::{PullRequestNumber, RepositoryName, RepositoryOwner};

/// Public GitHub API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository identity with its API base URL.
///
/// # Example
///
/// ```
/// use github_snapshot::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_owner_repo("apache", "airflow")
///     .expect("should build locator");
/// assert_eq!(locator.commits_path(), "/repos/apache/airflow/commits");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for a repository on `github.com`.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidRepository` when owner or repo is invalid.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, IngestError> {
        Self::with_api_base(DEFAULT_API_BASE, owner, repo)
    }

    /// Creates a locator served from an explicit API base, such as a GitHub
    /// Enterprise `https://host/api/v3` endpoint.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidUrl` when the base cannot be parsed or is
    /// not HTTP(S), and `IngestError::InvalidRepository` when owner or repo is
    /// invalid.
    pub fn with_api_base(api_base: &str, owner: &str, repo: &str) -> Result<Self, IngestError> {
        let parsed =
            Url::parse(api_base).map_err(|error| IngestError::InvalidUrl(error.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(IngestError::InvalidUrl(format!(
                "unsupported scheme '{}' in {api_base}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            api_base: parsed,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner/repo` slug for log lines and summaries.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }

    fn repo_path(&self, suffix: &str) -> String {
        format!(
            "/repos/{}/{}/{suffix}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    /// Path listing commits.
    #[must_use]
    pub fn commits_path(&self) -> String {
        self.repo_path("commits")
    }

    /// Path listing pull requests.
    #[must_use]
    pub fn pulls_path(&self) -> String {
        self.repo_path("pulls")
    }

    /// Path listing review comments across all pull requests.
    #[must_use]
    pub fn pull_comments_path(&self) -> String {
        self.repo_path("pulls/comments")
    }

    /// Path listing issues (GitHub includes pull requests here).
    #[must_use]
    pub fn issues_path(&self) -> String {
        self.repo_path("issues")
    }

    /// Path listing reviews of one pull request.
    #[must_use]
    pub fn pull_reviews_path(&self, number: PullRequestNumber) -> String {
        self.repo_path(&format!("pulls/{}/reviews", number.get()))
    }

    /// Joins an API path onto the base, preserving any base path prefix.
    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
