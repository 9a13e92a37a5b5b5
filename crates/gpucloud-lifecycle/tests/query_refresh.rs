//! Waits driven through a real `QueryClient` against a mock server.
//!
//! Real clock only: a paused clock auto-advances to the next timer while a request waits
//! on socket I/O. Polling paths with timing assertions live in the poller's unit tests.

use std::time::Duration;

use gpucloud_core::types::resource_path;
use gpucloud_core::{GpuCloudConfig, QueryClient, Resource, ResourceKind};
use gpucloud_lifecycle::{wait_for, Lifecycle, LifecycleConfig, WaitOptions, WaitOutcome, ARCHIVED};
use serde::Deserialize;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ID: &str = "5c0ffee0-0000-4000-8000-000000000001";

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct Volume {
    id: String,
    status: String,
}

impl Resource for Volume {
    const KIND: ResourceKind = ResourceKind::Volume;

    fn id_string(&self) -> String {
        self.id.clone()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        resource_path(Self::KIND, &self.id)
    }
}

impl Lifecycle for Volume {
    const LIFECYCLE: LifecycleConfig = LifecycleConfig {
        valid_target_statuses: &["ready", ARCHIVED],
        terminal_failure_statuses: LifecycleConfig::DEFAULT_FAILURES,
        archived_is_deletion: true,
        default_timeout: Duration::from_secs(300),
    };
}

fn client(server: &MockServer) -> QueryClient {
    let config = GpuCloudConfig::with_base_url(server.uri()).unwrap();
    QueryClient::builder(config).with_token("secret").build().unwrap()
}

fn volume(status: &str) -> Volume {
    Volume {
        id: ID.to_string(),
        status: status.to_string(),
    }
}

#[tokio::test]
async fn immediate_match_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let outcome = wait_for(&client, &volume("ready"), "ready", WaitOptions::new())
        .await
        .unwrap();

    assert_eq!(outcome, WaitOutcome::AlreadyInStatus(volume("ready")));
}

#[tokio::test]
async fn not_found_on_refresh_completes_archive_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/volume/{ID}")))
        .and(header("authorization", "Bearer secret"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": { "message": "volume not found" }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let options = WaitOptions::new().with_timeout(Duration::from_secs(30));
    let outcome = wait_for(&client, &volume("ready"), ARCHIVED, options)
        .await
        .unwrap();

    assert!(outcome.is_deleted());
}
