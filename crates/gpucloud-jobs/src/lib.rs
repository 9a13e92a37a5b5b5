//! GPU jobs for the GpuCloud control plane.
//!
//! A job (notebook, training run, inference batch or serving endpoint) is queued, waits for
//! its inputs and GPUs, runs, and then either finishes or is stopped.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::JobsClient;
pub use models::{CreateJobRequest, Job, JobCommand, JobListParams, JobType};

/// Convenient result alias that reuses the shared GpuCloud error type.
pub type Result<T> = gpucloud_core::Result<T>;

/// Wait failure for a job.
pub type JobError = gpucloud_lifecycle::WaitError<Job>;
