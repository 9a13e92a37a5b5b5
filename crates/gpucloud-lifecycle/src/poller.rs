//! The generic wait loop.
//!
//! [`wait_for`] drives a snapshot towards a target status:
//!
//! 1. A cached status equal to the target succeeds at once, without touching the network.
//! 2. The target must be one of the kind's valid target statuses.
//! 3. The timeout must not exceed [`MAX_TIMEOUT`].
//! 4. Until the deadline: sleep one interval (cut short by the deadline), then refresh.
//!    A 404 while waiting for `archived` means the resource is gone. Any other error aborts
//!    the wait. A terminal failure status aborts with the offending snapshot.
//!
//! No refresh starts after the deadline. A refresh may run for at least one interval, so
//! the last one (which starts at the deadline) can still answer.
//!
//! Cancellation is honored during the sleep and while a refresh is in flight.

use std::time::Duration;

use async_trait::async_trait;
use gpucloud_core::{QueryClient, Resource, Result};
use tokio::time::{sleep, timeout_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Lifecycle;
use crate::error::WaitError;
use crate::plan::{PollPlan, MAX_TIMEOUT};

/// Produces a fresh snapshot of a resource.
#[async_trait]
pub trait Refresh<S: Send + Sync>: Send + Sync {
    /// Fetch the current server state of `current`.
    ///
    /// # Errors
    ///
    /// Returns the underlying query error unchanged.
    async fn refresh(&self, current: &S) -> Result<S>;
}

#[async_trait]
impl<S: Resource> Refresh<S> for QueryClient {
    async fn refresh(&self, current: &S) -> Result<S> {
        self.fetch(current).await
    }
}

/// Optional knobs for a wait.
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    /// Overall timeout; the kind's default applies when `None`.
    pub timeout: Option<Duration>,
    /// Token that aborts the wait when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl WaitOptions {
    /// Options using the kind's default timeout and no cancellation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl From<Option<Duration>> for WaitOptions {
    fn from(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            cancel: None,
        }
    }
}

/// States of a single wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// The cached snapshot already had the target status
    ImmediateMatch,
    /// Sleeping or refreshing
    Polling,
    /// A refresh reported the target status
    Succeeded,
    /// The resource disappeared while waiting for `archived`
    DeletedSuccess,
    /// The resource entered a terminal failure status
    FailedTerminal,
    /// The deadline passed
    TimedOut,
    /// The caller cancelled the wait
    Cancelled,
}

impl WaitState {
    /// Returns true for every state except [`WaitState::Polling`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Polling)
    }
}

/// Successful end of a wait.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome<S> {
    /// The snapshot passed in already had the target status; no request was made.
    AlreadyInStatus(S),
    /// A refresh returned the target status.
    Reached(S),
    /// The resource was deleted while waiting for `archived`.
    Deleted,
}

impl<S> WaitOutcome<S> {
    /// Latest snapshot, if the resource still exists.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&S> {
        match self {
            Self::AlreadyInStatus(s) | Self::Reached(s) => Some(s),
            Self::Deleted => None,
        }
    }

    /// Consume the outcome, returning the latest snapshot if any.
    #[must_use]
    pub fn into_snapshot(self) -> Option<S> {
        match self {
            Self::AlreadyInStatus(s) | Self::Reached(s) => Some(s),
            Self::Deleted => None,
        }
    }

    /// Returns true if the resource no longer exists.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Final state of the wait.
    #[must_use]
    pub const fn state(&self) -> WaitState {
        match self {
            Self::AlreadyInStatus(_) => WaitState::ImmediateMatch,
            Self::Reached(_) => WaitState::Succeeded,
            Self::Deleted => WaitState::DeletedSuccess,
        }
    }
}

/// Poll `current` until it reaches `target`.
///
/// `current` is never modified; the outcome carries the latest snapshot.
///
/// # Errors
///
/// - [`WaitError::Specification`] for an unknown target or a timeout above [`MAX_TIMEOUT`]
/// - [`WaitError::Query`] when a refresh fails (other than a 404 while awaiting `archived`)
/// - [`WaitError::Failed`] when the resource enters a terminal failure status
/// - [`WaitError::TimedOut`] when the deadline passes first
/// - [`WaitError::Cancelled`] when the token in `options` is cancelled
pub async fn wait_for<S, R>(
    refresher: &R,
    current: &S,
    target: &str,
    options: WaitOptions,
) -> std::result::Result<WaitOutcome<S>, WaitError<S>>
where
    S: Lifecycle,
    R: Refresh<S> + ?Sized,
{
    let kind = S::KIND;
    let id = current.id_string();

    if current.status() == target {
        debug!(%kind, %id, target_status = target, "Status already reached");
        return Ok(WaitOutcome::AlreadyInStatus(current.clone()));
    }

    let lifecycle = S::LIFECYCLE;
    if !lifecycle.accepts(target) {
        return Err(WaitError::Specification(format!(
            "`{target}` is not a status a {kind} can be waited for (expected one of: {})",
            lifecycle.valid_target_statuses.join(", ")
        )));
    }

    let timeout = options.timeout.unwrap_or(lifecycle.default_timeout);
    let Some(plan) = PollPlan::new(timeout) else {
        return Err(WaitError::Specification(format!(
            "timeout of {}s exceeds the maximum of {}s",
            timeout.as_secs(),
            MAX_TIMEOUT.as_secs()
        )));
    };

    current.inspect_target(target);

    let cancel = options.cancel.unwrap_or_default();
    let cancelled = || WaitError::Cancelled {
        kind,
        id: id.clone(),
        target: target.to_string(),
    };
    let timed_out = || WaitError::TimedOut {
        kind,
        id: id.clone(),
        target: target.to_string(),
        timeout,
    };

    debug!(
        %kind,
        %id,
        target_status = target,
        state = ?WaitState::Polling,
        interval_secs = plan.interval.as_secs(),
        max_attempts = plan.max_attempts,
        "Waiting for status"
    );

    let mut latest = current.clone();
    let mut attempt = 0;

    loop {
        if cancel.is_cancelled() {
            warn!(%kind, %id, target_status = target, attempt, "Wait cancelled");
            return Err(cancelled());
        }
        if attempt >= plan.max_attempts || plan.remaining().is_zero() {
            warn!(
                %kind,
                %id,
                target_status = target,
                attempt,
                status = latest.status(),
                "Wait timed out"
            );
            return Err(timed_out());
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!(%kind, %id, target_status = target, attempt, "Wait cancelled");
                return Err(cancelled());
            }
            () = sleep(plan.next_delay()) => {}
        }

        attempt += 1;
        let refreshed = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!(%kind, %id, target_status = target, attempt, "Wait cancelled during refresh");
                return Err(cancelled());
            }
            result = timeout_at(plan.refresh_deadline(), refresher.refresh(&latest)) => result,
        };

        let Ok(refreshed) = refreshed else {
            warn!(%kind, %id, target_status = target, attempt, "Refresh exceeded its time budget");
            return Err(timed_out());
        };

        latest = match refreshed {
            Ok(next) => next,
            Err(err) if err.is_not_found() && lifecycle.treats_not_found_as_deleted(target) => {
                info!(%kind, %id, attempt, "Resource deleted");
                return Ok(WaitOutcome::Deleted);
            }
            Err(err) => {
                warn!(%kind, %id, target_status = target, attempt, error = %err, "Refresh failed");
                return Err(WaitError::Query(err));
            }
        };

        let status = latest.status();
        if status == target {
            info!(%kind, %id, status, attempt, "Status reached");
            return Ok(WaitOutcome::Reached(latest));
        }
        if lifecycle.is_terminal_failure(status) {
            warn!(%kind, %id, target_status = target, status, attempt, "Resource failed");
            return Err(WaitError::Failed {
                kind,
                id: id.clone(),
                status: status.to_string(),
                snapshot: Box::new(latest),
            });
        }

        debug!(%kind, %id, target_status = target, status, attempt, "Still waiting");
    }
}

impl<S: Resource> WaitError<S> {
    /// Final state of the wait, if it ended inside the poll loop.
    #[must_use]
    pub const fn state(&self) -> Option<WaitState> {
        match self {
            Self::Failed { .. } => Some(WaitState::FailedTerminal),
            Self::TimedOut { .. } => Some(WaitState::TimedOut),
            Self::Cancelled { .. } => Some(WaitState::Cancelled),
            Self::Specification(_) | Self::Query(_) => None,
        }
    }
}
