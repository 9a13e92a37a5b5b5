//! Job models.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gpucloud_core::ids::{JobId, ProjectId, RegionId};
use gpucloud_core::query::QueryParams;
use gpucloud_core::types::resource_path;
use gpucloud_core::{Resource, ResourceKind};
use gpucloud_lifecycle::{Lifecycle, LifecycleConfig, ARCHIVED};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Job is queued until its dataset and model are on the node.
pub const WAITING_FOR_DOWNLOAD: &str = "waiting for data/model download";
/// Job is queued until GPUs free up.
pub const WAITING_FOR_GPUS: &str = "waiting for GPUs";
/// Job is queued for other resources (CPU, memory, volumes).
pub const WAITING_FOR_RESOURCES: &str = "waiting for resources";
/// Job is running.
pub const RUNNING: &str = "running";
/// Job was stopped by a user.
pub const STOPPED: &str = "stopped";
/// Job ran to completion.
pub const FINISHED: &str = "finished";

/// Kind of workload a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    /// Interactive notebook
    Notebook,
    /// Training run
    Training,
    /// Batch inference
    Inference,
    /// Long-lived serving endpoint
    Endpoint,
    /// A type this SDK does not know yet
    #[serde(other)]
    Other,
}

impl JobType {
    /// Wire name of the job type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Notebook => "notebook",
            Self::Training => "training",
            Self::Inference => "inference",
            Self::Endpoint => "endpoint",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command sent to a job through `PATCH /job/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobCommand {
    /// Start (or restart) the job
    Start,
    /// Stop the job
    Stop,
}

/// Body of a job command request.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct CommandRequest {
    pub(crate) command: JobCommand,
}

/// Filters accepted by `GET /job`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobListParams {
    /// Only return jobs of this project.
    pub project_uuid: Option<ProjectId>,
    /// Filter by job type.
    pub job_type: Option<JobType>,
    /// Filter by status.
    pub status: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl JobListParams {
    /// Convert the parameters into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_project(self.project_uuid);
        params.push_opt("job_type", self.job_type);
        params.push_opt("status", self.status.as_deref());
        params.push_page(self.limit, self.offset);
        params.into_pairs()
    }
}

/// A job as returned by the control plane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    /// Job UUID.
    pub job_uuid: JobId,
    /// Job name.
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Workload type.
    pub job_type: JobType,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Container image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// GPU model requested (`a100`, `h100`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_type: Option<String>,
    /// Number of GPUs requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_count: Option<u32>,
    /// Region the job was scheduled in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_uuid: Option<RegionId>,
    /// Public URL for notebooks and endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Time the job last started running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Time the job stopped or finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Resource for Job {
    const KIND: ResourceKind = ResourceKind::Job;

    fn id_string(&self) -> String {
        self.job_uuid.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        resource_path(Self::KIND, self.job_uuid)
    }
}

impl Lifecycle for Job {
    const LIFECYCLE: LifecycleConfig = LifecycleConfig {
        valid_target_statuses: &[
            WAITING_FOR_DOWNLOAD,
            WAITING_FOR_GPUS,
            WAITING_FOR_RESOURCES,
            RUNNING,
            STOPPED,
            FINISHED,
            ARCHIVED,
        ],
        terminal_failure_statuses: LifecycleConfig::DEFAULT_FAILURES,
        archived_is_deletion: true,
        default_timeout: Duration::from_secs(300),
    };

    fn inspect_target(&self, target: &str) {
        // Training runs end in `finished`; they only reach `stopped` if someone stops them.
        if self.job_type == JobType::Training && target == STOPPED {
            warn!(
                job = %self.job_uuid,
                "Waiting for a training job to stop; training jobs normally end in `finished`"
            );
        }
    }
}

/// Request body for `POST /job`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateJobRequest {
    /// Job name.
    pub name: String,
    /// Workload type.
    pub job_type: JobType,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Container image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Command run inside the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// GPU model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_type: Option<String>,
    /// Number of GPUs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_count: Option<u32>,
}

impl CreateJobRequest {
    /// Minimal request for a job of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, job_type: JobType) -> Self {
        Self {
            name: name.into(),
            job_type,
            project_uuid: None,
            image: None,
            command: None,
            gpu_type: None,
            gpu_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    const JOB: &str = "3f9c2b1a-6d5e-4f70-8a9b-0c1d2e3f4a5b";

    fn job(job_type: &str, status: &str) -> Job {
        serde_json::from_value(json!({
            "job_uuid": JOB,
            "name": "finetune",
            "status": status,
            "job_type": job_type,
            "gpu_count": 8,
            "scheduler": {"queue": "default"}
        }))
        .unwrap()
    }

    #[test]
    fn job_parses_and_builds_path() {
        let job = job("training", WAITING_FOR_GPUS);
        assert_eq!(job.job_type, JobType::Training);
        assert_eq!(job.status(), "waiting for GPUs");
        assert_eq!(job.gpu_count, Some(8));
        assert_eq!(job.path(), format!("/job/{JOB}"));
    }

    #[test]
    fn unknown_job_type_is_tolerated() {
        let job = job("batch-eval", RUNNING);
        assert_eq!(job.job_type, JobType::Other);
    }

    #[test]
    fn job_lifecycle_targets() {
        let config = Job::LIFECYCLE;
        for target in [
            "waiting for data/model download",
            "waiting for GPUs",
            "waiting for resources",
            "running",
            "stopped",
            "finished",
            "archived",
        ] {
            assert!(config.accepts(target), "{target} should be accepted");
        }
        assert!(!config.accepts("ready"));
        assert!(config.is_terminal_failure("failed"));
        assert!(config.treats_not_found_as_deleted("archived"));
    }

    #[test]
    #[traced_test]
    fn warns_when_training_job_awaited_to_stop() {
        job("training", RUNNING).inspect_target(STOPPED);
        assert!(logs_contain("training jobs normally end in `finished`"));
    }

    #[test]
    #[traced_test]
    fn other_targets_do_not_warn() {
        job("notebook", RUNNING).inspect_target(STOPPED);
        job("training", RUNNING).inspect_target(FINISHED);
        assert!(!logs_contain("training jobs normally end"));
    }

    #[test]
    fn command_body() {
        let body = CommandRequest {
            command: JobCommand::Stop,
        };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"command": "stop"}));
    }

    #[test]
    fn list_params_pairs() {
        let params = JobListParams {
            job_type: Some(JobType::Endpoint),
            status: Some(RUNNING.to_string()),
            ..JobListParams::default()
        };
        assert_eq!(
            params.to_pairs(),
            vec![
                ("job_type", "endpoint".to_string()),
                ("status", "running".to_string()),
            ]
        );
    }
}
