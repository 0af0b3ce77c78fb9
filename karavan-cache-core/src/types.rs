// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Composite key scheme shared by every table.
//!
//! Every entity is addressed by a `(project_id, environment, name)` triple.
//! Keys are not validated: empty parts are legal and simply take part in the join.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment used by tables whose entities are not environment-scoped
/// (projects and project files).
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Separator placed between the three key parts.
const KEY_SEPARATOR: char = ':';

/// Composite primary key built from project id, environment and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedKey(String);

impl GroupedKey {
    /// Join the three parts in order. Pure and total.
    pub fn create(project_id: &str, environment: &str, name: &str) -> Self {
        let mut key =
            String::with_capacity(project_id.len() + environment.len() + name.len() + 2);
        key.push_str(project_id);
        key.push(KEY_SEPARATOR);
        key.push_str(environment);
        key.push(KEY_SEPARATOR);
        key.push_str(name);
        Self(key)
    }

    /// Key for an entity that lives in the default environment.
    pub fn default_env(project_id: &str, name: &str) -> Self {
        Self::create(project_id, DEFAULT_ENVIRONMENT, name)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GroupedKey> for String {
    fn from(key: GroupedKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let a = GroupedKey::create("p1", "dev", "c1");
        let b = GroupedKey::create("p1", "dev", "c1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "p1:dev:c1");
    }

    #[test]
    fn test_parts_are_ordered() {
        assert_ne!(
            GroupedKey::create("p1", "dev", "c1"),
            GroupedKey::create("c1", "dev", "p1")
        );
        assert_ne!(
            GroupedKey::create("p1", "dev", "c1"),
            GroupedKey::create("p1", "prod", "c1")
        );
    }

    #[test]
    fn test_empty_parts_are_legal() {
        let key = GroupedKey::create("", "", "");
        assert_eq!(key.as_str(), "::");
    }

    #[test]
    fn test_default_env() {
        assert_eq!(
            GroupedKey::default_env("p1", "routes.yaml"),
            GroupedKey::create("p1", DEFAULT_ENVIRONMENT, "routes.yaml")
        );
    }
}
