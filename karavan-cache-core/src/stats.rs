// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, CacheResult};

/// Point-in-time table sizes, printed by the CLI and logged while running.
/// Counts are read table by table, so they are not a consistent cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub ready: bool,
    pub projects: usize,
    pub files: usize,
    pub deployment_statuses: usize,
    pub container_statuses: usize,
    pub transits: usize,
    pub service_statuses: usize,
    pub camel_statuses: usize,
}

impl CacheStats {
    /// Number of entries across all seven tables.
    pub fn total_entries(&self) -> usize {
        self.projects
            + self.files
            + self.deployment_statuses
            + self.container_statuses
            + self.transits
            + self.service_statuses
            + self.camel_statuses
    }

    pub fn to_json(&self) -> CacheResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            message: e.to_string(),
        })
    }
}
