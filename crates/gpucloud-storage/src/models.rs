//! Storage models as returned by the control plane.
//!
//! Snapshots keep the attributes the SDK understands and silently drop the rest, so new
//! server-side fields never break deserialization.

use std::time::Duration;

use chrono::{DateTime, Utc};
use gpucloud_core::ids::{CheckpointId, DatasetId, JobId, ModelId, ProjectId, VolumeId};
use gpucloud_core::query::QueryParams;
use gpucloud_core::types::resource_path;
use gpucloud_core::{Resource, ResourceKind};
use gpucloud_lifecycle::{Lifecycle, LifecycleConfig, ARCHIVED};
use serde::{Deserialize, Serialize};

/// Lifecycle shared by every storage kind.
const STORAGE_LIFECYCLE: LifecycleConfig = LifecycleConfig {
    valid_target_statuses: &["ready", ARCHIVED],
    terminal_failure_statuses: LifecycleConfig::DEFAULT_FAILURES,
    archived_is_deletion: true,
    default_timeout: Duration::from_secs(300),
};

/// Filters accepted by the storage list endpoints.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StorageListParams {
    /// Only return resources of this project.
    pub project_uuid: Option<ProjectId>,
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by exact name.
    pub name: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl StorageListParams {
    /// Parameters scoped to one project.
    #[must_use]
    pub fn for_project(project_uuid: ProjectId) -> Self {
        Self {
            project_uuid: Some(project_uuid),
            ..Self::default()
        }
    }

    /// Convert the parameters into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_project(self.project_uuid);
        params.push_opt("status", self.status.as_deref());
        params.push_opt("name", self.name.as_deref());
        params.push_page(self.limit, self.offset);
        params.into_pairs()
    }
}

/// A dataset uploaded to the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    /// Dataset UUID.
    pub dataset_uuid: DatasetId,
    /// Dataset name.
    pub name: String,
    /// Current status (`uploading`, `ready`, `errored`, ...).
    #[serde(default)]
    pub status: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Total size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Number of files in the dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Dataset {
    const KIND: ResourceKind = ResourceKind::Dataset;

    fn id_string(&self) -> String {
        self.dataset_uuid.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        resource_path(Self::KIND, self.dataset_uuid)
    }
}

impl Lifecycle for Dataset {
    const LIFECYCLE: LifecycleConfig = STORAGE_LIFECYCLE;
}

/// A stored model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    /// Model UUID.
    pub model_uuid: ModelId,
    /// Model name.
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Framework the weights were produced with (`pytorch`, `jax`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Total size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Model {
    const KIND: ResourceKind = ResourceKind::Model;

    fn id_string(&self) -> String {
        self.model_uuid.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        resource_path(Self::KIND, self.model_uuid)
    }
}

impl Lifecycle for Model {
    const LIFECYCLE: LifecycleConfig = STORAGE_LIFECYCLE;
}

/// A checkpoint written by a training job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checkpoint {
    /// Checkpoint UUID.
    pub checkpoint_uuid: CheckpointId,
    /// Checkpoint name.
    #[serde(default)]
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Job that produced the checkpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_uuid: Option<JobId>,
    /// Model the checkpoint belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_uuid: Option<ModelId>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Training step at which it was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Checkpoint {
    const KIND: ResourceKind = ResourceKind::Checkpoint;

    fn id_string(&self) -> String {
        self.checkpoint_uuid.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        resource_path(Self::KIND, self.checkpoint_uuid)
    }
}

impl Lifecycle for Checkpoint {
    const LIFECYCLE: LifecycleConfig = STORAGE_LIFECYCLE;
}

/// A persistent volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    /// Volume UUID.
    pub id: VolumeId,
    /// Volume name.
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Provisioned size in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<u64>,
    /// Storage class (`ssd`, `hdd`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Volume {
    const KIND: ResourceKind = ResourceKind::Volume;

    fn id_string(&self) -> String {
        self.id.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        resource_path(Self::KIND, self.id)
    }
}

impl Lifecycle for Volume {
    const LIFECYCLE: LifecycleConfig = STORAGE_LIFECYCLE;
}

/// Request body for creating a dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateDatasetRequest {
    /// Dataset name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Remote location to import from instead of uploading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Request body for creating a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateModelRequest {
    /// Model name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Framework the weights were produced with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
}

/// Request body for registering a checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateCheckpointRequest {
    /// Checkpoint name.
    pub name: String,
    /// Job that produced the checkpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_uuid: Option<JobId>,
    /// Model the checkpoint belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_uuid: Option<ModelId>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
}

/// Request body for creating a volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateVolumeRequest {
    /// Volume name.
    pub name: String,
    /// Size in GiB.
    pub size_gb: u64,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Storage class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DATASET: &str = "0e4d9f5a-7c43-4b1e-9b1a-5f3f0d6a2c11";

    #[test]
    fn dataset_ignores_unknown_fields() {
        let dataset: Dataset = serde_json::from_value(json!({
            "dataset_uuid": DATASET,
            "name": "imagenet-mini",
            "status": "uploading",
            "size_bytes": 1024,
            "owner": {"email": "someone@example.com"},
            "shards": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(dataset.name, "imagenet-mini");
        assert_eq!(dataset.status(), "uploading");
        assert_eq!(dataset.size_bytes, Some(1024));
        assert_eq!(dataset.path(), format!("/dataset/{DATASET}"));
        assert_eq!(dataset.id_string(), DATASET);
    }

    #[test]
    fn missing_status_defaults_to_empty() {
        let volume: Volume = serde_json::from_value(json!({
            "id": DATASET,
            "name": "scratch"
        }))
        .unwrap();
        assert_eq!(volume.status(), "");
        assert_eq!(volume.path(), format!("/volume/{DATASET}"));
    }

    #[test]
    fn storage_kinds_share_lifecycle() {
        for config in [
            Dataset::LIFECYCLE,
            Model::LIFECYCLE,
            Checkpoint::LIFECYCLE,
            Volume::LIFECYCLE,
        ] {
            assert!(config.accepts("ready"));
            assert!(config.accepts("archived"));
            assert!(!config.accepts("running"));
            assert!(config.is_terminal_failure("errored"));
            assert!(config.archived_is_deletion);
            assert_eq!(config.default_timeout, Duration::from_secs(300));
        }
    }

    #[test]
    fn list_params_pairs() {
        let project = ProjectId::parse_str(DATASET).unwrap();
        let mut params = StorageListParams::for_project(project);
        params.status = Some("ready".to_string());
        params.limit = Some(10);

        assert_eq!(
            params.to_pairs(),
            vec![
                ("project_uuid", DATASET.to_string()),
                ("status", "ready".to_string()),
                ("limit", "10".to_string()),
            ]
        );
        assert!(StorageListParams::default().to_pairs().is_empty());
    }

    #[test]
    fn create_request_omits_empty_fields() {
        let request = CreateVolumeRequest {
            name: "scratch".to_string(),
            size_gb: 100,
            ..CreateVolumeRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "scratch", "size_gb": 100})
        );
    }
}
