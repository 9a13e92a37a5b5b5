//! Asynchronous projects client.

use gpucloud_core::ids::ProjectId;
use gpucloud_core::types::resource_path;
use gpucloud_core::{QueryClient, ResourceKind};
use reqwest::Method;

use crate::models::{CreateProjectRequest, Project, ProjectListParams};
use crate::Result;

/// Client for projects.
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    inner: QueryClient,
}

impl ProjectsClient {
    /// Wrap an existing query client.
    #[must_use]
    pub const fn new(inner: QueryClient) -> Self {
        Self { inner }
    }

    /// List projects visible to the caller.
    pub async fn list(&self, params: &ProjectListParams) -> Result<Vec<Project>> {
        self.inner.get("/project", &params.to_pairs()).await
    }

    /// Fetch a single project.
    pub async fn get(&self, id: ProjectId) -> Result<Project> {
        self.inner
            .get(&resource_path(ResourceKind::Project, id), &[])
            .await
    }

    /// Create a project.
    pub async fn create(&self, request: &CreateProjectRequest) -> Result<Project> {
        self.inner
            .query_as(Method::POST, "/project", &[], Some(request))
            .await
    }

    /// Delete a project.
    pub async fn remove(&self, id: ProjectId) -> Result<()> {
        self.inner
            .delete(&resource_path(ResourceKind::Project, id), &[])
            .await
    }

    /// Fetch a fresh snapshot of `project`.
    pub async fn refresh(&self, project: &Project) -> Result<Project> {
        self.inner.fetch(project).await
    }
}
