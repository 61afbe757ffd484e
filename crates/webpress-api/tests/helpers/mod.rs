//! Test helpers: build the router over a scratch output directory.
//!
//! Run from workspace root: `cargo test -p webpress-api`.

pub mod fixtures;

use axum_test::TestServer;
use std::path::Path;
use tempfile::TempDir;
use webpress_api::setup::build_app;
use webpress_core::Config;

pub const PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Test application: server plus the directory it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn output_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Number of files currently in the output directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.output_dir())
            .expect("Failed to read output dir")
            .count()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limit(10).await
}

pub async fn setup_test_app_with_limit(max_file_size_mb: usize) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        server_port: 3000,
        output_dir: temp_dir.path().to_path_buf(),
        public_base_url: PUBLIC_BASE_URL.to_string(),
        max_file_size_bytes: max_file_size_mb * 1024 * 1024,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
    };

    let (_state, router) = build_app(config).await.expect("Failed to build app");
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp { server, temp_dir }
}

/// Path part of a returned image URL, suitable for the test client.
pub fn url_path(url: &str) -> &str {
    url.strip_prefix(PUBLIC_BASE_URL)
        .expect("URL should start with the public base URL")
}
