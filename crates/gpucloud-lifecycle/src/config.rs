//! Per-kind lifecycle configuration.

use std::time::Duration;

use gpucloud_core::Resource;

/// Status a resource reports, or is assumed to have, once deleted.
pub const ARCHIVED: &str = "archived";

/// Static description of how one resource kind moves through its statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Statuses a caller may wait for.
    pub valid_target_statuses: &'static [&'static str],
    /// Statuses from which the resource never progresses.
    pub terminal_failure_statuses: &'static [&'static str],
    /// Whether a 404 while waiting for [`ARCHIVED`] means the resource is gone.
    pub archived_is_deletion: bool,
    /// Timeout applied when the caller does not pass one.
    pub default_timeout: Duration,
}

impl LifecycleConfig {
    /// Terminal failure statuses shared by every kind.
    pub const DEFAULT_FAILURES: &'static [&'static str] = &["errored", "failed"];

    /// Returns true if `target` may be waited for.
    #[must_use]
    pub fn accepts(&self, target: &str) -> bool {
        self.valid_target_statuses.contains(&target)
    }

    /// Returns true if `status` is a terminal failure.
    #[must_use]
    pub fn is_terminal_failure(&self, status: &str) -> bool {
        self.terminal_failure_statuses.contains(&status)
    }

    /// Returns true if a 404 should end a wait for `target` successfully.
    #[must_use]
    pub fn treats_not_found_as_deleted(&self, target: &str) -> bool {
        self.archived_is_deletion && target == ARCHIVED
    }
}

/// A resource kind that can be awaited.
pub trait Lifecycle: Resource {
    /// Lifecycle rules for this kind.
    const LIFECYCLE: LifecycleConfig;

    /// Called once per wait, after the target was validated and before polling starts.
    fn inspect_target(&self, _target: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: LifecycleConfig = LifecycleConfig {
        valid_target_statuses: &["ready", ARCHIVED],
        terminal_failure_statuses: LifecycleConfig::DEFAULT_FAILURES,
        archived_is_deletion: true,
        default_timeout: Duration::from_secs(300),
    };

    #[test]
    fn accepts_only_listed_targets() {
        assert!(CONFIG.accepts("ready"));
        assert!(CONFIG.accepts("archived"));
        assert!(!CONFIG.accepts("running"));
        assert!(!CONFIG.accepts("Ready"));
    }

    #[test]
    fn terminal_failures() {
        assert!(CONFIG.is_terminal_failure("errored"));
        assert!(CONFIG.is_terminal_failure("failed"));
        assert!(!CONFIG.is_terminal_failure("ready"));
    }

    #[test]
    fn not_found_only_counts_for_archived() {
        assert!(CONFIG.treats_not_found_as_deleted("archived"));
        assert!(!CONFIG.treats_not_found_as_deleted("ready"));

        let kept = LifecycleConfig {
            archived_is_deletion: false,
            ..CONFIG
        };
        assert!(!kept.treats_not_found_as_deleted("archived"));
    }
}
