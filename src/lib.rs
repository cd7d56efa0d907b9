//! Snapshot ingestion of a GitHub repository's REST resources.
//!
//! The library pages through the commits, pull requests, review comments,
//! issues, and a sample of pull request reviews of one repository, and writes
//! each collection to a pretty-printed JSON snapshot file. HTTP rejections
//! shorten a collection and are reported rather than raised.

pub mod config;
pub mod github;
pub mod ingest;
pub mod snapshot;
pub mod telemetry;

pub use config::SnapshotConfig;
pub use github::{
    FetchOutcome, FetchPolicy, GatewayConfig, IngestError, PaginatedFetcher, QueryParams, Record,
    RepositoryLocator, ResourceGateway, RestGateway, StopReason,
};
pub use ingest::{IngestSummary, Resource, SnapshotIngest};
pub use snapshot::SnapshotWriter;
