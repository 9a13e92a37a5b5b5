//! CloudBender: bring-your-own compute for the GpuCloud control plane.
//!
//! A provider owns regions, and a region owns devices. Region and device paths are nested
//! under their parents, so the client methods for them take the parent ids.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{CloudBenderClient, CloudBenderResource};
pub use models::{
    CreateDeviceRequest, CreateProviderRequest, CreateRegionRequest, Device, Provider,
    ProviderListParams, Region,
};

/// Convenient result alias that reuses the shared GpuCloud error type.
pub type Result<T> = gpucloud_core::Result<T>;

/// Wait failure for a provider.
pub type ProviderError = gpucloud_lifecycle::WaitError<Provider>;
/// Wait failure for a region.
pub type RegionError = gpucloud_lifecycle::WaitError<Region>;
/// Wait failure for a device.
pub type DeviceError = gpucloud_lifecycle::WaitError<Device>;
