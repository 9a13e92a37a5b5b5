//! Lifecycle polling for control-plane resources.
//!
//! Long-lived resources (datasets, models, checkpoints, volumes, jobs, providers, regions,
//! devices) move through server-side statuses. [`wait_for`] polls a resource until it
//! reaches a requested status, fails terminally, disappears, times out or is cancelled.
//!
//! The algorithm is shared by every kind; a kind only contributes its
//! [`LifecycleConfig`] through the [`Lifecycle`] trait.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod plan;
pub mod poller;

pub use config::{Lifecycle, LifecycleConfig, ARCHIVED};
pub use error::WaitError;
pub use plan::{PollPlan, MAX_TIMEOUT};
pub use poller::{wait_for, Refresh, WaitOptions, WaitOutcome, WaitState};
pub use tokio_util::sync::CancellationToken;
