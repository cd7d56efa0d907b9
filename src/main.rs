//! `github-snapshot` entrypoint: snapshot one repository and print row counts.

use std::io::{self, Write};
use std::process::ExitCode;

use github_snapshot::telemetry::init_logging;
use github_snapshot::{IngestError, IngestSummary, RestGateway, SnapshotConfig, SnapshotIngest};
use ortho_config::OrthoConfig;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), IngestError> {
    let config = load_config()?;

    let locator = config.repository_locator()?;
    let gateway = RestGateway::for_locator(&locator, &config.gateway_config())?;
    let ingest = SnapshotIngest::new(
        &gateway,
        config.fetch_policy()?,
        config.snapshot_writer(),
        locator,
    )
    .with_review_sample(config.review_sample());

    let summary = ingest.run()?;
    write_summary(&summary)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`IngestError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<SnapshotConfig, IngestError> {
    SnapshotConfig::load().map_err(|error| IngestError::Configuration {
        message: error.to_string(),
    })
}

fn write_summary(summary: &IngestSummary) -> Result<(), IngestError> {
    let mut stdout = io::stdout().lock();
    summary.write_to(&mut stdout)?;
    stdout.flush().map_err(|error| IngestError::Io {
        message: error.to_string(),
    })
}
