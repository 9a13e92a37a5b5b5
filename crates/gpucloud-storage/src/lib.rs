//! Storage resources for the GpuCloud control plane.
//!
//! Datasets, models, checkpoints and volumes share one lifecycle: they become `ready` once
//! uploaded or provisioned and are `archived` (deleted server-side) when removed.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{StorageClient, StorageResource};
pub use models::{
    Checkpoint, CreateCheckpointRequest, CreateDatasetRequest, CreateModelRequest,
    CreateVolumeRequest, Dataset, Model, StorageListParams, Volume,
};

/// Convenient result alias that reuses the shared GpuCloud error type.
pub type Result<T> = gpucloud_core::Result<T>;

/// Wait failure for a dataset.
pub type DatasetError = gpucloud_lifecycle::WaitError<Dataset>;
/// Wait failure for a model.
pub type ModelError = gpucloud_lifecycle::WaitError<Model>;
/// Wait failure for a checkpoint.
pub type CheckpointError = gpucloud_lifecycle::WaitError<Checkpoint>;
/// Wait failure for a volume.
pub type VolumeError = gpucloud_lifecycle::WaitError<Volume>;
