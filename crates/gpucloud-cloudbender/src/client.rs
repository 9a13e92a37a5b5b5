//! Asynchronous CloudBender client.

use std::time::Duration;

use gpucloud_core::ids::{DeviceId, ProviderId, RegionId};
use gpucloud_core::types::{provider_path, region_path, scoped_path};
use gpucloud_core::{QueryClient, ResourceKind};
use gpucloud_lifecycle::{Lifecycle, WaitError, WaitOptions, WaitOutcome};
use reqwest::Method;

use crate::models::{
    CreateDeviceRequest, CreateProviderRequest, CreateRegionRequest, Device, Provider,
    ProviderListParams, Region,
};
use crate::Result;

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::Provider {}
    impl Sealed for crate::Region {}
    impl Sealed for crate::Device {}
}

/// Marker for the snapshot types served by [`CloudBenderClient`].
pub trait CloudBenderResource: Lifecycle + sealed::Sealed {}

impl CloudBenderResource for Provider {}
impl CloudBenderResource for Region {}
impl CloudBenderResource for Device {}

/// Client for providers, regions and devices.
#[derive(Debug, Clone)]
pub struct CloudBenderClient {
    inner: QueryClient,
}

impl CloudBenderClient {
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

    /// List providers.
    pub async fn list_providers(&self, params: &ProviderListParams) -> Result<Vec<Provider>> {
        self.inner.get("/provider", &params.to_pairs()).await
    }

    /// Fetch a single provider.
    pub async fn get_provider(&self, provider: ProviderId) -> Result<Provider> {
        self.inner.get(&provider_path(provider), &[]).await
    }

    /// Register a provider.
    pub async fn create_provider(&self, request: &CreateProviderRequest) -> Result<Provider> {
        self.inner
            .query_as(Method::POST, "/provider", &[], Some(request))
            .await
    }

    /// Delete a provider. Its regions and devices go with it.
    pub async fn remove_provider(&self, provider: ProviderId) -> Result<()> {
        self.inner.delete(&provider_path(provider), &[]).await
    }

    /// List the regions of a provider.
    pub async fn list_regions(&self, provider: ProviderId) -> Result<Vec<Region>> {
        let path = format!("{}/{}", provider_path(provider), ResourceKind::Region);
        self.inner.get(&path, &[]).await
    }

    /// Fetch a single region.
    pub async fn get_region(&self, provider: ProviderId, region: RegionId) -> Result<Region> {
        self.inner.get(&region_path(provider, region), &[]).await
    }

    /// Create a region under a provider.
    pub async fn create_region(
        &self,
        provider: ProviderId,
        request: &CreateRegionRequest,
    ) -> Result<Region> {
        let path = format!("{}/{}", provider_path(provider), ResourceKind::Region);
        self.inner
            .query_as(Method::POST, &path, &[], Some(request))
            .await
    }

    /// Delete a region.
    pub async fn remove_region(&self, provider: ProviderId, region: RegionId) -> Result<()> {
        self.inner.delete(&region_path(provider, region), &[]).await
    }

    /// List the devices of a region.
    pub async fn list_devices(
        &self,
        provider: ProviderId,
        region: RegionId,
    ) -> Result<Vec<Device>> {
        let path = format!("{}/{}", region_path(provider, region), ResourceKind::Device);
        self.inner.get(&path, &[]).await
    }

    /// Fetch a single device.
    pub async fn get_device(
        &self,
        provider: ProviderId,
        region: RegionId,
        device: DeviceId,
    ) -> Result<Device> {
        self.inner
            .get(&device_path(provider, region, device), &[])
            .await
    }

    /// Register a device in a region.
    pub async fn create_device(
        &self,
        provider: ProviderId,
        region: RegionId,
        request: &CreateDeviceRequest,
    ) -> Result<Device> {
        let path = format!("{}/{}", region_path(provider, region), ResourceKind::Device);
        self.inner
            .query_as(Method::POST, &path, &[], Some(request))
            .await
    }

    /// Delete a device.
    pub async fn remove_device(
        &self,
        provider: ProviderId,
        region: RegionId,
        device: DeviceId,
    ) -> Result<()> {
        self.inner
            .delete(&device_path(provider, region, device), &[])
            .await
    }

    /// Fetch a fresh snapshot; `snapshot` itself is left untouched.
    pub async fn refresh<T: CloudBenderResource>(&self, snapshot: &T) -> Result<T> {
        self.inner.fetch(snapshot).await
    }

    /// Wait until `snapshot` reaches `target`, using the kind's default timeout when `None`.
    ///
    /// # Errors
    ///
    /// See [`gpucloud_lifecycle::wait_for`].
    pub async fn wait_for<T: CloudBenderResource>(
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
    pub async fn wait_for_with<T: CloudBenderResource>(
        &self,
        snapshot: &T,
        target: &str,
        options: WaitOptions,
    ) -> std::result::Result<WaitOutcome<T>, WaitError<T>> {
        gpucloud_lifecycle::wait_for(&self.inner, snapshot, target, options).await
    }
}

fn device_path(provider: ProviderId, region: RegionId, device: DeviceId) -> String {
    scoped_path(provider, region, ResourceKind::Device, device)
}
