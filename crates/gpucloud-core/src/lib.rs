//! # gpucloud-core
//!
//! Core types and the authenticated query layer for the GpuCloud control plane.
//!
//! This crate provides the error taxonomy, typed identifiers, configuration and the
//! [`QueryClient`] every resource crate builds on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`ids`] - Strongly-typed UUID wrappers for control-plane resources
//! - [`types`] - Resource kinds, canonical paths and the [`Resource`] trait
//! - [`config`] - Configuration structures for GpuCloud clients
//! - [`auth`] - Bearer token capability consumed by the query layer
//! - [`client`] - The [`QueryClient`] and its HTTP settings
//! - [`query`] - Query parameter builder

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use auth::{AuthTokenProvider, StaticToken};
pub use client::{ClientConfig, QueryClient, QueryClientBuilder};
pub use config::GpuCloudConfig;
pub use error::{Error, Result};
pub use types::{Resource, ResourceKind};
