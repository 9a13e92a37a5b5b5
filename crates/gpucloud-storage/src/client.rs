//! Asynchronous storage client.

use std::time::Duration;

use gpucloud_core::ids::{CheckpointId, DatasetId, ModelId, VolumeId};
use gpucloud_core::types::resource_path;
use gpucloud_core::{QueryClient, ResourceKind};
use gpucloud_lifecycle::{Lifecycle, WaitError, WaitOptions, WaitOutcome};
use reqwest::Method;
use serde::Serialize;

use crate::models::{
    Checkpoint, CreateCheckpointRequest, CreateDatasetRequest, CreateModelRequest,
    CreateVolumeRequest, Dataset, Model, StorageListParams, Volume,
};
use crate::Result;

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::Dataset {}
    impl Sealed for crate::Model {}
    impl Sealed for crate::Checkpoint {}
    impl Sealed for crate::Volume {}
}

/// Marker for the snapshot types served by [`StorageClient`].
pub trait StorageResource: Lifecycle + sealed::Sealed {}

impl StorageResource for Dataset {}
impl StorageResource for Model {}
impl StorageResource for Checkpoint {}
impl StorageResource for Volume {}

/// Client for datasets, models, checkpoints and volumes.
#[derive(Debug, Clone)]
pub struct StorageClient {
    inner: QueryClient,
}

impl StorageClient {
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

    /// List datasets.
    pub async fn list_datasets(&self, params: &StorageListParams) -> Result<Vec<Dataset>> {
        self.list(ResourceKind::Dataset, params).await
    }

    /// Fetch a single dataset.
    pub async fn get_dataset(&self, id: DatasetId) -> Result<Dataset> {
        self.inner.get(&resource_path(ResourceKind::Dataset, id), &[]).await
    }

    /// Create a dataset record; the upload itself happens out of band.
    pub async fn create_dataset(&self, request: &CreateDatasetRequest) -> Result<Dataset> {
        self.create(ResourceKind::Dataset, request).await
    }

    /// Delete a dataset. The server archives it asynchronously.
    pub async fn remove_dataset(&self, id: DatasetId) -> Result<()> {
        self.inner.delete(&resource_path(ResourceKind::Dataset, id), &[]).await
    }

    /// List models.
    pub async fn list_models(&self, params: &StorageListParams) -> Result<Vec<Model>> {
        self.list(ResourceKind::Model, params).await
    }

    /// Fetch a single model.
    pub async fn get_model(&self, id: ModelId) -> Result<Model> {
        self.inner.get(&resource_path(ResourceKind::Model, id), &[]).await
    }

    /// Create a model record.
    pub async fn create_model(&self, request: &CreateModelRequest) -> Result<Model> {
        self.create(ResourceKind::Model, request).await
    }

    /// Delete a model.
    pub async fn remove_model(&self, id: ModelId) -> Result<()> {
        self.inner.delete(&resource_path(ResourceKind::Model, id), &[]).await
    }

    /// List checkpoints.
    pub async fn list_checkpoints(&self, params: &StorageListParams) -> Result<Vec<Checkpoint>> {
        self.list(ResourceKind::Checkpoint, params).await
    }

    /// Fetch a single checkpoint.
    pub async fn get_checkpoint(&self, id: CheckpointId) -> Result<Checkpoint> {
        self.inner
            .get(&resource_path(ResourceKind::Checkpoint, id), &[])
            .await
    }

    /// Register a checkpoint.
    pub async fn create_checkpoint(&self, request: &CreateCheckpointRequest) -> Result<Checkpoint> {
        self.create(ResourceKind::Checkpoint, request).await
    }

    /// Delete a checkpoint.
    pub async fn remove_checkpoint(&self, id: CheckpointId) -> Result<()> {
        self.inner
            .delete(&resource_path(ResourceKind::Checkpoint, id), &[])
            .await
    }

    /// List volumes.
    pub async fn list_volumes(&self, params: &StorageListParams) -> Result<Vec<Volume>> {
        self.list(ResourceKind::Volume, params).await
    }

    /// Fetch a single volume.
    pub async fn get_volume(&self, id: VolumeId) -> Result<Volume> {
        self.inner.get(&resource_path(ResourceKind::Volume, id), &[]).await
    }

    /// Provision a volume.
    pub async fn create_volume(&self, request: &CreateVolumeRequest) -> Result<Volume> {
        self.create(ResourceKind::Volume, request).await
    }

    /// Delete a volume.
    pub async fn remove_volume(&self, id: VolumeId) -> Result<()> {
        self.inner.delete(&resource_path(ResourceKind::Volume, id), &[]).await
    }

    /// Fetch a fresh snapshot; `snapshot` itself is left untouched.
    pub async fn refresh<T: StorageResource>(&self, snapshot: &T) -> Result<T> {
        self.inner.fetch(snapshot).await
    }

    /// Wait until `snapshot` reaches `target`, using the kind's default timeout when `None`.
    ///
    /// # Errors
    ///
    /// See [`gpucloud_lifecycle::wait_for`].
    pub async fn wait_for<T: StorageResource>(
        &self,
        snapshot: &T,
        target: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<WaitOutcome<T>, WaitError<T>> {
        self.wait_for_with(snapshot, target, WaitOptions::from(timeout))
            .await
    }

    /// Wait with explicit options (timeout and cancellation).
    ///
    /// # Errors
    ///
    /// See [`gpucloud_lifecycle::wait_for`].
    pub async fn wait_for_with<T: StorageResource>(
        &self,
        snapshot: &T,
        target: &str,
        options: WaitOptions,
    ) -> std::result::Result<WaitOutcome<T>, WaitError<T>> {
        gpucloud_lifecycle::wait_for(&self.inner, snapshot, target, options).await
    }

    async fn list<T>(&self, kind: ResourceKind, params: &StorageListParams) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        self.inner.get(&format!("/{kind}"), &params.to_pairs()).await
    }

    async fn create<B, T>(&self, kind: ResourceKind, request: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        self.inner
            .query_as(Method::POST, &format!("/{kind}"), &[], Some(request))
            .await
    }
}
