//! Errors raised while waiting on a resource.
//!
//! [`WaitError`] is generic over the snapshot type, so every kind gets its own error type
//! (`WaitError<Dataset>`, `WaitError<Provider>`, ...) and a terminal failure hands back the
//! typed snapshot that caused it.

use std::time::Duration;

use gpucloud_core::{Error, Resource, ResourceKind};
use thiserror::Error;

/// Failure of a [`wait_for`](crate::wait_for) call.
#[derive(Debug, Error)]
pub enum WaitError<S: Resource> {
    /// The caller asked for an unknown target status or an out-of-range timeout.
    #[error("Invalid wait request: {0}")]
    Specification(String),

    /// A refresh failed; the error is passed through unchanged.
    #[error(transparent)]
    Query(#[from] Error),

    /// The resource entered a status it cannot leave.
    #[error("{kind} {id} entered terminal status `{status}`")]
    Failed {
        /// Kind of the failed resource
        kind: ResourceKind,
        /// Identifier of the failed resource
        id: String,
        /// The terminal status reported by the server
        status: String,
        /// Snapshot carrying the terminal status
        snapshot: Box<S>,
    },

    /// The deadline passed before the target status was observed.
    #[error("Timed out after {timeout:?} waiting for {kind} {id} to reach `{target}`")]
    TimedOut {
        /// Kind of the awaited resource
        kind: ResourceKind,
        /// Identifier of the awaited resource
        id: String,
        /// Requested status
        target: String,
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// The caller cancelled the wait.
    #[error("Wait for {kind} {id} to reach `{target}` was cancelled")]
    Cancelled {
        /// Kind of the awaited resource
        kind: ResourceKind,
        /// Identifier of the awaited resource
        id: String,
        /// Requested status
        target: String,
    },
}

impl<S: Resource> WaitError<S> {
    /// Returns the error code for this error.
    ///
    /// Terminal failures carry a kind-specific code such as `DATASET_ERROR`.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Specification(_) => "SPECIFICATION_ERROR",
            Self::Query(err) => err.error_code(),
            Self::Failed { kind, .. } => failure_code(*kind),
            Self::TimedOut { .. } => "WAIT_TIMEOUT",
            Self::Cancelled { .. } => "WAIT_CANCELLED",
        }
    }

    /// Terminal status, for [`WaitError::Failed`].
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Failed { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Snapshot that carried the terminal status, for [`WaitError::Failed`].
    #[must_use]
    pub fn snapshot(&self) -> Option<&S> {
        match self {
            Self::Failed { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Returns true if the wait ran out of time.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// Returns true if the caller supplied an invalid target or timeout.
    #[must_use]
    pub const fn is_specification(&self) -> bool {
        matches!(self, Self::Specification(_))
    }
}

const fn failure_code(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Dataset => "DATASET_ERROR",
        ResourceKind::Model => "MODEL_ERROR",
        ResourceKind::Checkpoint => "CHECKPOINT_ERROR",
        ResourceKind::Volume => "VOLUME_ERROR",
        ResourceKind::Job => "JOB_ERROR",
        ResourceKind::Project => "PROJECT_ERROR",
        ResourceKind::Provider => "PROVIDER_ERROR",
        ResourceKind::Region => "REGION_ERROR",
        ResourceKind::Device => "DEVICE_ERROR",
    }
}
