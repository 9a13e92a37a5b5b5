//! Resource kinds and canonical API paths.
//!
//! Top-level resources live at `/{kind}/{id}`. CloudBender resources are nested under the
//! provider (and region) that owns them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::ids::{ProviderId, RegionId};

/// Default API host.
pub const DEFAULT_API_HOST: &str = "api.gpucloud.dev";

/// Resource kinds exposed by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Training or inference dataset
    Dataset,
    /// Stored model
    Model,
    /// Model checkpoint
    Checkpoint,
    /// Persistent volume
    Volume,
    /// GPU job (notebook, training, inference, endpoint)
    Job,
    /// Project grouping other resources
    Project,
    /// CloudBender compute provider
    Provider,
    /// Region within a provider
    Region,
    /// Device within a region
    Device,
}

impl ResourceKind {
    /// Returns the path segment used for this kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dataset => "dataset",
            Self::Model => "model",
            Self::Checkpoint => "checkpoint",
            Self::Volume => "volume",
            Self::Job => "job",
            Self::Project => "project",
            Self::Provider => "provider",
            Self::Region => "region",
            Self::Device => "device",
        }
    }

    /// Returns all resource kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Dataset,
            Self::Model,
            Self::Checkpoint,
            Self::Volume,
            Self::Job,
            Self::Project,
            Self::Provider,
            Self::Region,
            Self::Device,
        ]
    }

    /// Returns true for kinds whose paths are nested under a provider.
    #[must_use]
    pub const fn is_provider_scoped(&self) -> bool {
        matches!(self, Self::Region | Self::Device)
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::ValidationError(format!("Unknown resource kind: {s}")))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical path of a top-level resource: `/{kind}/{id}`.
#[must_use]
pub fn resource_path(kind: ResourceKind, id: impl fmt::Display) -> String {
    format!("/{kind}/{id}")
}

/// Path of a provider: `/provider/{provider}`.
#[must_use]
pub fn provider_path(provider: ProviderId) -> String {
    resource_path(ResourceKind::Provider, provider)
}

/// Path of a region: `/provider/{provider}/region/{region}`.
#[must_use]
pub fn region_path(provider: ProviderId, region: RegionId) -> String {
    format!("{}/region/{region}", provider_path(provider))
}

/// Path of a resource nested in a region: `/provider/{p}/region/{r}/{kind}/{id}`.
#[must_use]
pub fn scoped_path(
    provider: ProviderId,
    region: RegionId,
    kind: ResourceKind,
    id: impl fmt::Display,
) -> String {
    format!("{}{}", region_path(provider, region), resource_path(kind, id))
}

/// A typed snapshot of one server-side resource.
///
/// Implementors are plain values deserialized from one API response. A snapshot never
/// changes after construction; refreshing yields a new value.
pub trait Resource: DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Kind of the resource.
    const KIND: ResourceKind;

    /// Identifier rendered as a string (for logs and errors).
    fn id_string(&self) -> String;

    /// Last-known server status.
    fn status(&self) -> &str;

    /// Canonical path used to refresh this resource.
    fn path(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDER: &str = "11111111-1111-4111-8111-111111111111";
    const REGION: &str = "22222222-2222-4222-8222-222222222222";

    #[test]
    fn kind_names() {
        assert_eq!(ResourceKind::Dataset.name(), "dataset");
        assert_eq!(ResourceKind::Checkpoint.name(), "checkpoint");
        assert_eq!(ResourceKind::Device.to_string(), "device");
        assert_eq!(ResourceKind::all().len(), 9);
    }

    #[test]
    fn kind_from_str_is_case_insensitive() {
        assert_eq!("JOB".parse::<ResourceKind>().unwrap(), ResourceKind::Job);
        assert_eq!(
            "provider".parse::<ResourceKind>().unwrap(),
            ResourceKind::Provider
        );
        assert!("cluster".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn kind_serde_uses_lowercase() {
        let json = serde_json::to_string(&ResourceKind::Volume).unwrap();
        assert_eq!(json, "\"volume\"");
        let kind: ResourceKind = serde_json::from_str("\"region\"").unwrap();
        assert_eq!(kind, ResourceKind::Region);
    }

    #[test]
    fn provider_scoping() {
        assert!(ResourceKind::Region.is_provider_scoped());
        assert!(ResourceKind::Device.is_provider_scoped());
        assert!(!ResourceKind::Provider.is_provider_scoped());
        assert!(!ResourceKind::Dataset.is_provider_scoped());
    }

    #[test]
    fn canonical_paths() {
        let provider = ProviderId::parse_str(PROVIDER).unwrap();
        let region = RegionId::parse_str(REGION).unwrap();

        assert_eq!(
            resource_path(ResourceKind::Dataset, "abc"),
            "/dataset/abc"
        );
        assert_eq!(provider_path(provider), format!("/provider/{PROVIDER}"));
        assert_eq!(
            region_path(provider, region),
            format!("/provider/{PROVIDER}/region/{REGION}")
        );
        assert_eq!(
            scoped_path(provider, region, ResourceKind::Device, "dev-1"),
            format!("/provider/{PROVIDER}/region/{REGION}/device/dev-1")
        );
    }
}
