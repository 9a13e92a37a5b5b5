//! Project models.

use chrono::{DateTime, Utc};
use gpucloud_core::ids::ProjectId;
use gpucloud_core::query::QueryParams;
use gpucloud_core::types::resource_path;
use gpucloud_core::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};

/// Filters accepted by `GET /project`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProjectListParams {
    /// Filter by exact name.
    pub name: Option<String>,
    /// Include archived projects.
    pub include_archived: bool,
}

impl ProjectListParams {
    /// Convert the parameters into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("name", self.name.as_deref());
        params.push_flag("include_archived", self.include_archived);
        params.into_pairs()
    }
}

/// A project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Project UUID.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Project {
    const KIND: ResourceKind = ResourceKind::Project;

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

/// Request body for `POST /project`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
