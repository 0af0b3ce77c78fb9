// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! The cache is volatile, so it is rebuilt at startup from the `projects`
//! section of this file. Any invalid field results in a HardValidationError
//! that prevents startup.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CacheError, CacheResult, HardValidationError};
use crate::model::{Project, ProjectFile, ProjectType};
use crate::store::CacheStore;

/// Raw project file as parsed from YAML.
#[derive(Debug, Deserialize)]
struct RawProjectFile {
    name: String,
    #[serde(default)]
    code: String,
}

/// Raw project as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawProject {
    project_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "type")]
    project_type: ProjectType,
    #[serde(default)]
    files: Vec<RawProjectFile>,
}

/// Raw cache settings.
#[derive(Debug, Deserialize)]
struct RawCacheConfig {
    #[serde(default = "default_stats_interval_secs")]
    stats_interval_secs: u64,
}

fn default_stats_interval_secs() -> u64 {
    30
}

impl Default for RawCacheConfig {
    fn default() -> Self {
        Self {
            stats_interval_secs: default_stats_interval_secs(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    cache: RawCacheConfig,
    #[serde(default)]
    projects: Vec<RawProject>,
}

/// Validated cache settings.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Period of the stats line logged by `up`.
    pub stats_interval_secs: u64,
}

/// A project together with the files it is seeded with.
#[derive(Debug, Clone)]
pub struct ProjectSeed {
    pub project: Project,
    pub files: Vec<ProjectFile>,
}

/// Complete validated configuration.
#[derive(Debug)]
pub struct Config {
    pub cache: CacheConfig,
    pub projects: Vec<ProjectSeed>,
}

/// Entries written into a store by [`Config::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub projects: usize,
    pub files: usize,
}

impl Config {
    /// Populate a store with the configured projects and files.
    /// Files are written per project as one stamped batch.
    pub fn seed(&self, store: &CacheStore) -> SeedSummary {
        let mut summary = SeedSummary {
            projects: 0,
            files: 0,
        };

        for seed in &self.projects {
            store.save_project(seed.project.clone());
            store.save_project_files(seed.files.clone());
            summary.projects += 1;
            summary.files += seed.files.len();
        }

        tracing::info!(
            projects = summary.projects,
            files = summary.files,
            "Cache seeded from configuration"
        );
        summary
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> CacheResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CacheError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CacheError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> CacheResult<Config> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| CacheError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> CacheResult<Config> {
        let cache = Self::validate_cache(raw.cache)?;

        let mut projects = Vec::with_capacity(raw.projects.len());
        let mut seen_ids = HashSet::new();

        for (index, raw_project) in raw.projects.into_iter().enumerate() {
            let seed = Self::validate_project(raw_project, index)?;

            if !seen_ids.insert(seed.project.project_id.clone()) {
                return Err(HardValidationError::DuplicateProjectId {
                    id: seed.project.project_id,
                }
                .into());
            }

            projects.push(seed);
        }

        Ok(Config { cache, projects })
    }

    fn validate_cache(raw: RawCacheConfig) -> CacheResult<CacheConfig> {
        if raw.stats_interval_secs == 0 || raw.stats_interval_secs > 3600 {
            return Err(HardValidationError::InvalidFieldValue {
                field: "stats_interval_secs",
                value: raw.stats_interval_secs.to_string(),
                reason: "Must be between 1 and 3600".to_string(),
            }
            .into());
        }

        Ok(CacheConfig {
            stats_interval_secs: raw.stats_interval_secs,
        })
    }

    fn validate_project(raw: RawProject, index: usize) -> CacheResult<ProjectSeed> {
        if raw.project_id.is_empty() {
            return Err(HardValidationError::MissingRequiredField {
                field: "project_id",
                context: format!("project at index {}", index),
            }
            .into());
        }
        validate_key_part("project_id", &raw.project_id)?;

        let mut seen_names = HashSet::new();
        let mut files = Vec::with_capacity(raw.files.len());

        for raw_file in raw.files {
            if raw_file.name.is_empty() {
                return Err(HardValidationError::MissingRequiredField {
                    field: "name",
                    context: format!("file in project {}", raw.project_id),
                }
                .into());
            }
            validate_key_part("name", &raw_file.name)?;

            if !seen_names.insert(raw_file.name.clone()) {
                return Err(HardValidationError::DuplicateFileName {
                    project_id: raw.project_id,
                    name: raw_file.name,
                }
                .into());
            }

            files.push(ProjectFile::new(
                raw.project_id.clone(),
                raw_file.name,
                raw_file.code,
            ));
        }

        let project = Project {
            name: raw.name.unwrap_or_else(|| raw.project_id.clone()),
            description: raw.description,
            project_type: raw.project_type,
            ..Project::new(raw.project_id, "")
        };

        Ok(ProjectSeed { project, files })
    }
}

/// Seeded identifiers end up as key parts, so they must not contain the
/// key separator.
fn validate_key_part(field: &'static str, value: &str) -> Result<(), HardValidationError> {
    if value.is_empty() || value.contains(':') {
        return Err(HardValidationError::InvalidFieldValue {
            field,
            value: value.to_string(),
            reason: "Must be non-empty and must not contain ':'".to_string(),
        });
    }
    Ok(())
}
