//! Run configuration loaded from CLI, environment, and files.
//!
//! [`SnapshotConfig`] merges values from command-line arguments, environment
//! variables, and configuration files using ortho-config's layered approach,
//! then hands out the explicit values a snapshot run is built from.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – `apache/airflow`, five pages, twenty reviewed pull
//!    requests, and a 500 ms pause between pages
//! 2. **Configuration file** – `.github-snapshot.toml` in the current
//!    directory, home directory, or XDG config directory
//! 3. **Environment variables** – `GITHUB_SNAPSHOT_OWNER`,
//!    `GITHUB_SNAPSHOT_TOKEN`, and so on, with `GITHUB_TOKEN` as a token
//!    fallback
//! 4. **Command-line arguments** – `--owner`/`-o`, `--repo`/`-r`,
//!    `--token`/`-t`, `--output-dir`/`-d`, and the long-only tuning flags
//!
//! # Configuration File
//!
//! ```toml
//! owner = "apache"
//! repo = "airflow"
//! api_url = "https://api.github.com"
//! output_dir = "data"
//! max_pages = 5
//! review_sample = 20
//! page_delay_ms = 500
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::IngestError;
use crate::github::gateway::GatewayConfig;
use crate::github::locator::PersonalAccessToken;
use crate::github::pagination::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY, FetchPolicy};
use crate::github::repository_locator::{DEFAULT_API_BASE, RepositoryLocator};
use crate::ingest::DEFAULT_REVIEW_SAMPLE;
use crate::snapshot::SnapshotWriter;

const DEFAULT_OWNER: &str = "apache";
const DEFAULT_REPO: &str = "airflow";
const DEFAULT_OUTPUT_DIR: &str = "data";
const FALLBACK_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Settings for one snapshot run.
///
/// # Example
///
/// ```no_run
/// use github_snapshot::SnapshotConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = SnapshotConfig::load().expect("failed to load configuration");
/// let locator = config.repository_locator().expect("valid repository");
/// assert_eq!(locator.slug(), format!("{}/{}", config.owner, config.repo));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GITHUB_SNAPSHOT",
    discovery(
        dotfile_name = ".github-snapshot.toml",
        config_file_name = "github-snapshot.toml",
        app_name = "github-snapshot"
    )
)]
pub struct SnapshotConfig {
    /// Repository owner (e.g., "apache").
    ///
    /// Can be provided via:
    /// - CLI: `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `GITHUB_SNAPSHOT_OWNER`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: String,

    /// Repository name (e.g., "airflow").
    ///
    /// Can be provided via:
    /// - CLI: `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `GITHUB_SNAPSHOT_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: String,

    /// Personal access token sent as a bearer credential.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `GITHUB_SNAPSHOT_TOKEN` or `GITHUB_TOKEN` (fallback)
    /// - Config file: `token = "..."`
    ///
    /// Requests are sent unauthenticated when no source provides a value.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Base URL of the REST API, for GitHub Enterprise or a test server.
    #[ortho_config()]
    pub api_url: String,

    /// Directory the snapshot files are written into.
    ///
    /// Can be provided via:
    /// - CLI: `--output-dir <DIR>` or `-d <DIR>`
    /// - Environment: `GITHUB_SNAPSHOT_OUTPUT_DIR`
    /// - Config file: `output_dir = "..."`
    #[ortho_config(cli_short = 'd')]
    pub output_dir: String,

    /// Upper bound on pages requested per resource. Must be at least 1.
    #[ortho_config()]
    pub max_pages: u32,

    /// Number of pull requests, in API order, whose reviews are collected.
    #[ortho_config()]
    pub review_sample: usize,

    /// Fixed pause between consecutive page requests, in milliseconds.
    #[ortho_config()]
    pub page_delay_ms: u64,

    /// Request timeout in seconds. Zero keeps the transport default.
    #[ortho_config()]
    pub timeout_secs: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_owned(),
            repo: DEFAULT_REPO.to_owned(),
            token: None,
            api_url: DEFAULT_API_BASE.to_owned(),
            output_dir: DEFAULT_OUTPUT_DIR.to_owned(),
            max_pages: DEFAULT_MAX_PAGES,
            review_sample: DEFAULT_REVIEW_SAMPLE,
            page_delay_ms: u64::try_from(DEFAULT_PAGE_DELAY.as_millis()).unwrap_or(500),
            timeout_secs: 0,
        }
    }
}

impl SnapshotConfig {
    /// Resolves the token from configuration or the fallback `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// Blank values count as absent, so a configured but empty token still
    /// falls back and finally yields `None`.
    #[must_use]
    pub fn resolve_token(&self) -> Option<PersonalAccessToken> {
        self.token
            .as_deref()
            .and_then(|token| PersonalAccessToken::new(token).ok())
            .or_else(|| {
                env::var(FALLBACK_TOKEN_VAR)
                    .ok()
                    .and_then(|token| PersonalAccessToken::new(token).ok())
            })
    }

    /// Builds the repository locator from `api_url`, `owner`, and `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidUrl`] or
    /// [`IngestError::InvalidRepository`] when the values are unusable.
    pub fn repository_locator(&self) -> Result<RepositoryLocator, IngestError> {
        RepositoryLocator::with_api_base(&self.api_url, &self.owner, &self.repo)
    }

    /// Transport settings: the resolved token and optional timeout.
    #[must_use]
    pub fn gateway_config(&self) -> GatewayConfig {
        let config = GatewayConfig::new(self.resolve_token());
        match self.timeout_secs {
            0 => config,
            secs => config.with_timeout(Duration::from_secs(secs)),
        }
    }

    /// Page bound and inter-page delay for every resource.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Configuration`] when `max_pages` is zero.
    pub fn fetch_policy(&self) -> Result<FetchPolicy, IngestError> {
        if self.max_pages == 0 {
            return Err(IngestError::Configuration {
                message: "max_pages must be at least 1 (use --max-pages)".to_owned(),
            });
        }
        Ok(FetchPolicy::new(
            self.max_pages,
            Duration::from_millis(self.page_delay_ms),
        ))
    }

    /// Writer targeting `output_dir`.
    #[must_use]
    pub fn snapshot_writer(&self) -> SnapshotWriter {
        SnapshotWriter::new(self.output_dir.as_str())
    }

    /// Number of pull requests whose reviews are collected.
    #[must_use]
    pub const fn review_sample(&self) -> usize {
        self.review_sample
    }
}

#[cfg(test)]
mod tests;
