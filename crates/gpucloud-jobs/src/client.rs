//! Asynchronous jobs client.

use std::time::Duration;

use gpucloud_core::ids::JobId;
use gpucloud_core::types::resource_path;
use gpucloud_core::{QueryClient, ResourceKind};
use gpucloud_lifecycle::{WaitError, WaitOptions, WaitOutcome};
use reqwest::Method;

use crate::models::{CommandRequest, CreateJobRequest, Job, JobCommand, JobListParams};
use crate::Result;

/// Client for GPU jobs.
#[derive(Debug, Clone)]
pub struct JobsClient {
    inner: QueryClient,
}

impl JobsClient {
    /// Wrap an existing query client.
    #[must_use]
    pub const fn new(inner: QueryClient) -> Self {
        Self { inner }
    }

    /// Access the underlying query client.
    #[must_use]
    pub const fn query_client(&self) -> &QueryClient {
        &self.inner
    }

    /// List jobs.
    pub async fn list(&self, params: &JobListParams) -> Result<Vec<Job>> {
        self.inner.get("/job", &params.to_pairs()).await
    }

    /// Fetch a single job.
    pub async fn get(&self, id: JobId) -> Result<Job> {
        self.inner.get(&job_path(id), &[]).await
    }

    /// Submit a job.
    pub async fn create(&self, request: &CreateJobRequest) -> Result<Job> {
        self.inner
            .query_as(Method::POST, "/job", &[], Some(request))
            .await
    }

    /// Delete a job. Running jobs are stopped first by the server.
    pub async fn remove(&self, id: JobId) -> Result<()> {
        self.inner.delete(&job_path(id), &[]).await
    }

    /// Start a stopped job.
    pub async fn start(&self, id: JobId) -> Result<Job> {
        self.command(id, JobCommand::Start).await
    }

    /// Stop a running job.
    pub async fn stop(&self, id: JobId) -> Result<Job> {
        self.command(id, JobCommand::Stop).await
    }

    /// Fetch a fresh snapshot of `job`.
    pub async fn refresh(&self, job: &Job) -> Result<Job> {
        self.inner.fetch(job).await
    }

    /// Wait until `job` reaches `target`, using the default timeout when `None`.
    ///
    /// # Errors
    ///
    /// See [`gpucloud_lifecycle::wait_for`].
    pub async fn wait_for(
        &self,
        job: &Job,
        target: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<WaitOutcome<Job>, WaitError<Job>> {
        self.wait_for_with(job, target, WaitOptions::from(timeout))
            .await
    }

    /// Wait with explicit options (timeout and cancellation).
    ///
    /// # Errors
    ///
    /// See [`gpucloud_lifecycle::wait_for`].
    pub async fn wait_for_with(
        &self,
        job: &Job,
        target: &str,
        options: WaitOptions,
    ) -> std::result::Result<WaitOutcome<Job>, WaitError<Job>> {
        gpucloud_lifecycle::wait_for(&self.inner, job, target, options).await
    }

    async fn command(&self, id: JobId, command: JobCommand) -> Result<Job> {
        let body = CommandRequest { command };
        self.inner
            .query_as(Method::PATCH, &job_path(id), &[], Some(&body))
            .await
    }
}

fn job_path(id: JobId) -> String {
    resource_path(ResourceKind::Job, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobType, RUNNING};
    use gpucloud_core::GpuCloudConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> JobsClient {
        let config = GpuCloudConfig::with_base_url(server.uri()).unwrap();
        JobsClient::new(QueryClient::builder(config).with_token("tok").build().unwrap())
    }

    fn job_json(id: JobId, status: &str) -> serde_json::Value {
        json!({
            "job_uuid": id,
            "name": "llama-finetune",
            "status": status,
            "job_type": "training",
            "gpu_type": "h100",
            "gpu_count": 8
        })
    }

    #[tokio::test]
    async fn list_jobs_by_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job"))
            .and(query_param("job_type", "training"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([job_json(JobId::new_v4(), RUNNING)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = JobListParams {
            job_type: Some(JobType::Training),
            ..JobListParams::default()
        };
        let jobs = client.list(&params).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].gpu_type.as_deref(), Some("h100"));
    }

    #[tokio::test]
    async fn create_job_posts_request() {
        let server = MockServer::start().await;
        let id = JobId::new_v4();
        Mock::given(method("POST"))
            .and(path("/job"))
            .and(body_json(json!({
                "name": "llama-finetune",
                "job_type": "training",
                "gpu_count": 8
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(job_json(id, "waiting for GPUs")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut request = CreateJobRequest::new("llama-finetune", JobType::Training);
        request.gpu_count = Some(8);
        let job = client.create(&request).await.unwrap();
        assert_eq!(job.job_uuid, id);
        assert_eq!(job.status, "waiting for GPUs");
    }

    #[tokio::test]
    async fn stop_sends_patch_command() {
        let server = MockServer::start().await;
        let id = JobId::new_v4();
        Mock::given(method("PATCH"))
            .and(path(format!("/job/{id}")))
            .and(body_json(json!({"command": "stop"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_json(id, "stopping")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let job = client.stop(id).await.unwrap();
        assert_eq!(job.status, "stopping");
    }

    #[tokio::test]
    async fn start_sends_patch_command() {
        let server = MockServer::start().await;
        let id = JobId::new_v4();
        Mock::given(method("PATCH"))
            .and(path(format!("/job/{id}")))
            .and(body_json(json!({"command": "start"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_json(id, "waiting for GPUs")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let job = client.start(id).await.unwrap();
        assert_eq!(job.status, "waiting for GPUs");
    }

    #[tokio::test]
    async fn start_conflict_is_api_error() {
        let server = MockServer::start().await;
        let id = JobId::new_v4();
        Mock::given(method("PATCH"))
            .and(path(format!("/job/{id}")))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"error": {"message": "job is already running"}})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.start(id).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("job is already running"));
    }

    // Real clock: a paused clock auto-advances to the next timer while the request waits
    // on socket I/O, which trips the refresh deadline. The wait costs one 5s poll interval.
    #[tokio::test]
    async fn wait_for_running_polls_until_reached() {
        let server = MockServer::start().await;
        let id = JobId::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/job/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_json(id, RUNNING)))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let job: Job = serde_json::from_value(job_json(id, "waiting for GPUs")).unwrap();
        let outcome = client
            .wait_for(&job, RUNNING, Some(Duration::from_secs(30)))
            .await
            .unwrap();

        assert_eq!(outcome.snapshot().map(|j| j.status.as_str()), Some(RUNNING));
        assert_eq!(job.status, "waiting for GPUs");
    }
}
