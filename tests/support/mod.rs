//! Shared test utilities.

use camino::Utf8PathBuf;
use serde_json::Value;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temporary directory for snapshot output.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// UTF-8 path of a temporary directory.
///
/// # Panics
///
/// Panics if the path is not valid UTF-8.
pub fn utf8_path(temp_dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
        .unwrap_or_else(|raw| panic!("temp dir is not UTF-8: {}", raw.display()))
}

/// A wiremock server standing in for the GitHub REST API.
///
/// The server runs on its own runtime thread, so blocking clients can call
/// it from the test thread.
pub struct FakeGitHub {
    runtime: Runtime,
    server: MockServer,
}

impl FakeGitHub {
    /// Starts a server with no mounted routes.
    ///
    /// # Panics
    ///
    /// Panics if the runtime cannot be created.
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("runtime should start");
        let server = runtime.block_on(MockServer::start());
        Self { runtime, server }
    }

    /// API base URL, shaped like a GitHub Enterprise endpoint.
    pub fn api_base(&self) -> String {
        format!("{}/api/v3", self.server.uri())
    }

    /// Serves `records` as page 1 of `resource_path` and an empty page 2.
    pub fn serve_single_page(&self, resource_path: &str, records: Value) {
        self.serve_page(resource_path, 1, ResponseTemplate::new(200).set_body_json(records));
        self.serve_page(
            resource_path,
            2,
            ResponseTemplate::new(200).set_body_json(Value::Array(Vec::new())),
        );
    }

    /// Answers page `page` of `resource_path` with `response`.
    pub fn serve_page(&self, resource_path: &str, page: u32, response: ResponseTemplate) {
        let mock = Mock::given(method("GET"))
            .and(path(format!("/api/v3{resource_path}")))
            .and(query_param("per_page", "100"))
            .and(query_param("page", page.to_string()))
            .respond_with(response);
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Number of requests the server has received.
    pub fn request_count(&self) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .map_or(0, |requests| requests.len())
    }
}
