//! Unit tests for configuration loading, precedence, and derived values.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::{MergeComposer, OrthoConfig};
use rstest::rstest;
use serde_json::{Value, json};

use super::SnapshotConfig;
use crate::github::error::IngestError;

/// Applies a configuration layer to the composer based on the layer type.
fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

fn build_config_from_layers(layers: Vec<(&str, Value)>) -> SnapshotConfig {
    let mut composer = MergeComposer::new();
    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }
    SnapshotConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Loads configuration from `cli_args` with an isolated home directory and
/// the given environment overrides.
fn load_with_env(env: &[(&str, Option<&str>)], cli_args: &[&str]) -> SnapshotConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let mut vars: Vec<(&str, Option<&str>)> = vec![
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ];
    vars.extend_from_slice(env);
    let _guard = env_lock::lock_env(vars);

    let mut args: Vec<OsString> = vec![OsString::from("github-snapshot")];
    args.extend(cli_args.iter().map(OsString::from));

    SnapshotConfig::load_from_iter(args).expect("config should load")
}

#[rstest]
fn defaults_target_apache_airflow() {
    let config = SnapshotConfig::default();

    assert_eq!(config.owner, "apache");
    assert_eq!(config.repo, "airflow");
    assert_eq!(config.api_url, "https://api.github.com");
    assert_eq!(config.output_dir, "data");
    assert_eq!(config.max_pages, 5);
    assert_eq!(config.review_sample(), 20);
    assert_eq!(config.page_delay_ms, 500);
    assert_eq!(config.timeout_secs, 0);
    assert!(config.token.is_none());
}

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"owner": "default-owner"})), ("file", json!({"owner": "file-owner"}))],
    "file-owner",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"owner": "file-owner"})), ("environment", json!({"owner": "env-owner"}))],
    "env-owner",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"owner": "env-owner"})), ("cli", json!({"owner": "cli-owner"}))],
    "cli-owner",
    "CLI should override environment"
)]
fn owner_follows_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(layers);

    assert_eq!(config.owner, expected, "{message}");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = build_config_from_layers(vec![
        ("defaults", json!({"owner": "apache", "repo": "airflow", "max_pages": 5})),
        ("file", json!({"max_pages": 2})),
        ("cli", json!({"repo": "superset"})),
    ]);

    assert_eq!(config.owner, "apache", "default owner should be preserved");
    assert_eq!(config.repo, "superset", "CLI should override repo");
    assert_eq!(config.max_pages, 2, "file should override max_pages");
}

#[rstest]
fn loads_repository_from_cli_flags() {
    let config = load_with_env(
        &[("GITHUB_SNAPSHOT_OWNER", None), ("GITHUB_SNAPSHOT_REPO", None)],
        &["-o", "rust-lang", "-r", "cargo", "-d", "out"],
    );

    assert_eq!(config.owner, "rust-lang");
    assert_eq!(config.repo, "cargo");
    assert_eq!(config.output_dir, "out");
}

#[rstest]
fn cli_overrides_environment_for_max_pages() {
    let config = load_with_env(
        &[("GITHUB_SNAPSHOT_MAX_PAGES", Some("3"))],
        &["--max-pages", "7"],
    );

    assert_eq!(config.max_pages, 7);
}

#[rstest]
fn environment_sets_review_sample() {
    let config = load_with_env(&[("GITHUB_SNAPSHOT_REVIEW_SAMPLE", Some("4"))], &[]);

    assert_eq!(config.review_sample(), 4);
}

#[rstest]
#[case::configured(Some("configured-token"), None, Some("configured-token"))]
#[case::fallback(None, Some("fallback-token"), Some("fallback-token"))]
#[case::configured_wins(Some("configured-token"), Some("fallback-token"), Some("configured-token"))]
#[case::blank_falls_back(Some("   "), Some("fallback-token"), Some("fallback-token"))]
#[case::blank_everywhere(Some(""), Some("  "), None)]
#[case::absent(None, None, None)]
fn resolves_token_with_fallback(
    #[case] configured: Option<&str>,
    #[case] fallback: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", fallback)]);
    let config = SnapshotConfig {
        token: configured.map(str::to_owned),
        ..SnapshotConfig::default()
    };

    let resolved = config.resolve_token();

    assert_eq!(resolved.as_ref().map(|token| token.value()), expected);
}

#[rstest]
fn gateway_config_applies_positive_timeout() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = SnapshotConfig {
        timeout_secs: 30,
        ..SnapshotConfig::default()
    };

    let gateway = config.gateway_config();

    assert_eq!(gateway.timeout, Some(Duration::from_secs(30)));
    assert!(gateway.token.is_none());
    assert_eq!(SnapshotConfig::default().gateway_config().timeout, None);
}

#[rstest]
fn fetch_policy_uses_configured_bounds() {
    let config = SnapshotConfig {
        max_pages: 2,
        page_delay_ms: 0,
        ..SnapshotConfig::default()
    };

    let policy = config.fetch_policy().expect("policy should build");

    assert_eq!(policy.max_pages(), 2);
    assert_eq!(policy.page_delay(), Duration::ZERO);
}

#[rstest]
fn fetch_policy_rejects_zero_pages() {
    let config = SnapshotConfig {
        max_pages: 0,
        ..SnapshotConfig::default()
    };

    let error = config.fetch_policy().expect_err("zero pages should fail");

    assert!(
        matches!(error, IngestError::Configuration { .. }),
        "expected Configuration error, got {error:?}"
    );
}

#[rstest]
fn repository_locator_uses_api_url() {
    let config = SnapshotConfig {
        api_url: "https://github.example.com/api/v3".to_owned(),
        ..SnapshotConfig::default()
    };

    let locator = config.repository_locator().expect("locator should build");

    assert_eq!(locator.slug(), "apache/airflow");
    assert_eq!(
        locator.api_base().as_str(),
        "https://github.example.com/api/v3"
    );
}

#[rstest]
#[case::empty_owner("", "airflow")]
#[case::slash_in_repo("apache", "air/flow")]
fn repository_locator_rejects_bad_segments(#[case] owner: &str, #[case] repo: &str) {
    let config = SnapshotConfig {
        owner: owner.to_owned(),
        repo: repo.to_owned(),
        ..SnapshotConfig::default()
    };

    let error = config
        .repository_locator()
        .expect_err("invalid segment should fail");

    assert!(matches!(error, IngestError::InvalidRepository { .. }));
}

#[rstest]
fn snapshot_writer_targets_output_dir() {
    let config = SnapshotConfig {
        output_dir: "snapshots".to_owned(),
        ..SnapshotConfig::default()
    };

    assert_eq!(config.snapshot_writer().output_dir().as_str(), "snapshots");
}
