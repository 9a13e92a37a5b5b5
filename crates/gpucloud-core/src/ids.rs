//! Strongly-typed identifiers for control-plane resources.
//!
//! Every resource kind gets its own wrapper around [`Uuid`] so a dataset id can never be
//! passed where a job id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::ResourceKind;

macro_rules! resource_id {
    ($name:ident, $kind:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Resource kind this identifier belongs to.
            pub const KIND: ResourceKind = $kind;

            /// Wraps an existing [`Uuid`].
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generates a random (v4) identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner [`Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parses an identifier from its hyphenated string form.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidId`] naming the resource kind if the input is not a UUID.
            pub fn parse_str(input: &str) -> Result<Self> {
                Uuid::parse_str(input)
                    .map(Self)
                    .map_err(|_| Error::InvalidId(format!("{} id `{input}`", $kind)))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

resource_id!(DatasetId, ResourceKind::Dataset, "Dataset identifier");
resource_id!(ModelId, ResourceKind::Model, "Model identifier");
resource_id!(CheckpointId, ResourceKind::Checkpoint, "Checkpoint identifier");
resource_id!(VolumeId, ResourceKind::Volume, "Volume identifier");
resource_id!(JobId, ResourceKind::Job, "Job identifier");
resource_id!(ProjectId, ResourceKind::Project, "Project identifier");
resource_id!(ProviderId, ResourceKind::Provider, "CloudBender provider identifier");
resource_id!(RegionId, ResourceKind::Region, "CloudBender region identifier");
resource_id!(DeviceId, ResourceKind::Device, "CloudBender device identifier");

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn parse_and_display_round_trip() {
        let id = DatasetId::parse_str(VALID).unwrap();
        assert_eq!(id.to_string(), VALID);
        assert_eq!(id.as_uuid(), &Uuid::parse_str(VALID).unwrap());
    }

    #[test]
    fn parse_error_names_the_kind() {
        let err = JobId::parse_str("not-a-uuid").unwrap_err();
        assert_eq!(err, Error::InvalidId("job id `not-a-uuid`".to_string()));

        let err: Error = "nope".parse::<RegionId>().unwrap_err();
        assert!(err.to_string().contains("region id"));
    }

    #[test]
    fn kind_constants() {
        assert_eq!(DatasetId::KIND, ResourceKind::Dataset);
        assert_eq!(CheckpointId::KIND, ResourceKind::Checkpoint);
        assert_eq!(DeviceId::KIND, ResourceKind::Device);
    }

    #[test]
    fn serde_is_transparent() {
        let id = ProviderId::parse_str(VALID).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{VALID}\""));

        let back: ProviderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn new_v4_is_random() {
        let a = VolumeId::new_v4();
        let b = VolumeId::new_v4();
        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn uuid_conversions() {
        let uuid = Uuid::new_v4();
        let id: ModelId = uuid.into();
        let back: Uuid = id.into();
        assert_eq!(back, uuid);
        assert_eq!(ModelId::new(uuid), id);
    }
}
