#![allow(dead_code)]

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use studyai_core::{Config, FrontendConfig, ProxyConfig};
use tokio::net::TcpListener;

/// Test application: the frontend server under test, proxying to a mock upstream.
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Serve `router` on an ephemeral local port and return its `/upload` URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().expect("Mock upstream has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock upstream failed");
    });

    format!("http://{}/upload", addr)
}

/// An upload URL nothing is listening on.
pub async fn unreachable_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    format!("http://{}/upload", addr)
}

pub fn test_config(upstream_upload_url: &str, upstream_timeout_secs: u64) -> Config {
    Config::new(FrontendConfig {
        proxy: ProxyConfig {
            upstream_upload_url: upstream_upload_url.to_string(),
            upstream_timeout_secs,
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Setup a test application proxying to `upstream_url`
pub fn setup_test_app_with(upstream_url: String, upstream_timeout_secs: u64) -> TestApp {
    let config = test_config(&upstream_url, upstream_timeout_secs);
    let (_state, router) =
        studyai_api::setup::build_app(config).expect("Failed to build test app");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server }
}

/// Setup a test application proxying to a mock upstream built from `upstream`
pub async fn setup_test_app(upstream: Router) -> TestApp {
    let url = spawn_upstream(upstream).await;
    setup_test_app_with(url, 5)
}
