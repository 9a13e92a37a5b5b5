//! Projects for the GpuCloud control plane.
//!
//! Projects group the other resources. They have a status but no asynchronous lifecycle,
//! so they can be refreshed but not awaited.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ProjectsClient;
pub use models::{CreateProjectRequest, Project, ProjectListParams};

/// Convenient result alias that reuses the shared GpuCloud error type.
pub type Result<T> = gpucloud_core::Result<T>;
