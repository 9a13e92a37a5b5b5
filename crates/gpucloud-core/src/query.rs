//! Query-string assembly for list endpoints.
//!
//! Most list endpoints accept the same project scope and pagination pair plus a few
//! kind-specific filters, all optional.

use std::fmt::Display;

use crate::ids::ProjectId;

/// Ordered `key=value` pairs for a request's query string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Start with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` only if `value` is set.
    pub fn push_opt<T: Display>(&mut self, key: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Add `key=true` if `enabled`; a false flag is left out entirely.
    pub fn push_flag(&mut self, key: &'static str, enabled: bool) {
        if enabled {
            self.push(key, true);
        }
    }

    /// Add `key` unconditionally.
    pub fn push<T: Display>(&mut self, key: &'static str, value: T) {
        self.pairs.push((key, value.to_string()));
    }

    /// Restrict results to one project (`project_uuid`).
    pub fn push_project(&mut self, project: Option<ProjectId>) {
        self.push_opt("project_uuid", project);
    }

    /// Add `limit` and `offset` where set.
    pub fn push_page(&mut self, limit: Option<u32>, offset: Option<u32>) {
        self.push_opt("limit", limit);
        self.push_opt("offset", offset);
    }

    /// Pairs in insertion order, ready for `reqwest::RequestBuilder::query`.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true when nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values_are_skipped() {
        let mut params = QueryParams::new();
        params.push_opt("status", Option::<&str>::None);
        params.push_flag("include_archived", false);
        params.push_project(None);
        params.push_page(None, None);
        assert!(params.is_empty());
    }

    #[test]
    fn pairs_keep_insertion_order() {
        let project = ProjectId::parse_str("9a0b7c1e-3f2d-4e5a-8b6c-7d8e9f0a1b2c").unwrap();
        let mut params = QueryParams::new();
        params.push_project(Some(project));
        params.push("status", "ready");
        params.push_flag("include_archived", true);
        params.push_page(Some(50), Some(100));

        assert_eq!(
            params.into_pairs(),
            vec![
                ("project_uuid", project.to_string()),
                ("status", "ready".to_string()),
                ("include_archived", "true".to_string()),
                ("limit", "50".to_string()),
                ("offset", "100".to_string()),
            ]
        );
    }
}
