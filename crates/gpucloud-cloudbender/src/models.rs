//! CloudBender models.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gpucloud_core::ids::{DeviceId, ProjectId, ProviderId, RegionId};
use gpucloud_core::query::QueryParams;
use gpucloud_core::types::{provider_path, region_path, scoped_path};
use gpucloud_core::{Resource, ResourceKind};
use gpucloud_lifecycle::{Lifecycle, LifecycleConfig, ARCHIVED};
use serde::{Deserialize, Serialize};

const fn lifecycle(targets: &'static [&'static str]) -> LifecycleConfig {
    LifecycleConfig {
        valid_target_statuses: targets,
        terminal_failure_statuses: LifecycleConfig::DEFAULT_FAILURES,
        archived_is_deletion: true,
        default_timeout: Duration::from_secs(300),
    }
}

/// Filters accepted by `GET /provider`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProviderListParams {
    /// Only return providers of this project.
    pub project_uuid: Option<ProjectId>,
    /// Filter by status.
    pub status: Option<String>,
}

impl ProviderListParams {
    /// Convert the parameters into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_project(self.project_uuid);
        params.push_opt("status", self.status.as_deref());
        params.into_pairs()
    }
}

/// A compute provider registered with CloudBender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    /// Provider UUID.
    pub provider_uuid: ProviderId,
    /// Provider name.
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Backend type (`aws`, `gcp`, `on-prem`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Provider {
    const KIND: ResourceKind = ResourceKind::Provider;

    fn id_string(&self) -> String {
        self.provider_uuid.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        provider_path(self.provider_uuid)
    }
}

impl Lifecycle for Provider {
    const LIFECYCLE: LifecycleConfig = lifecycle(&["ready", ARCHIVED]);
}

/// A region of a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    /// Region UUID.
    pub region_uuid: RegionId,
    /// Parent provider.
    pub provider_uuid: ProviderId,
    /// Region name.
    pub name: String,
    /// Current status (`healthy`, `offline`, ...).
    #[serde(default)]
    pub status: String,
    /// Physical location (`us-east-1`, a datacenter name, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Region {
    const KIND: ResourceKind = ResourceKind::Region;

    fn id_string(&self) -> String {
        self.region_uuid.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        region_path(self.provider_uuid, self.region_uuid)
    }
}

impl Lifecycle for Region {
    const LIFECYCLE: LifecycleConfig = lifecycle(&["healthy", "offline", ARCHIVED]);
}

/// A GPU host inside a region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    /// Device id.
    pub device_id: DeviceId,
    /// Parent provider.
    pub provider_uuid: ProviderId,
    /// Parent region.
    pub region_uuid: RegionId,
    /// Device name.
    pub name: String,
    /// Current status (`active`, ...).
    #[serde(default)]
    pub status: String,
    /// Host name or address the agent connects from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// GPU model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_type: Option<String>,
    /// Number of GPUs on the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_count: Option<u32>,
    /// Scheduler labels.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    /// Last heartbeat from the device agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl Resource for Device {
    const KIND: ResourceKind = ResourceKind::Device;

    fn id_string(&self) -> String {
        self.device_id.to_string()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn path(&self) -> String {
        scoped_path(
            self.provider_uuid,
            self.region_uuid,
            Self::KIND,
            self.device_id,
        )
    }
}

impl Lifecycle for Device {
    const LIFECYCLE: LifecycleConfig = lifecycle(&["active", ARCHIVED]);
}

/// Request body for `POST /provider`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateProviderRequest {
    /// Provider name.
    pub name: String,
    /// Backend type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<ProjectId>,
    /// Backend credentials and settings, passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Request body for creating a region under a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateRegionRequest {
    /// Region name.
    pub name: String,
    /// Physical location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Request body for registering a device in a region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateDeviceRequest {
    /// Device name.
    pub name: String,
    /// Host name or address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Scheduler labels.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}
