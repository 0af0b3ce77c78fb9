// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Entity types stored in the cache tables.
//!
//! Each entity knows how to derive its own [`GroupedKey`] through the
//! [`Keyed`] trait, so tables never take a key from the caller on save.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{GroupedKey, DEFAULT_ENVIRONMENT};

/// An entity that can derive its table key from its own fields.
pub trait Keyed {
    fn grouped_key(&self) -> GroupedKey;
}

// =========================================================================
// Projects
// =========================================================================

/// Kind of project, used by the UI to separate user projects from
/// built-in ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Templates,
    Kamelets,
    Configuration,
    Services,
    #[default]
    Normal,
}

impl ProjectType {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Templates => "templates",
            Self::Kamelets => "kamelets",
            Self::Configuration => "configuration",
            Self::Services => "services",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An integration project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub last_commit: Option<String>,
    pub last_commit_timestamp: u64,
    pub project_type: ProjectType,
}

impl Project {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Keyed for Project {
    fn grouped_key(&self) -> GroupedKey {
        GroupedKey::create(&self.project_id, DEFAULT_ENVIRONMENT, &self.project_id)
    }
}

/// A source file belonging to exactly one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub code: String,
    pub project_id: String,
    /// Epoch milliseconds of the last batch save that touched this file.
    pub last_update: u64,
}

impl ProjectFile {
    pub fn new(
        project_id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            project_id: project_id.into(),
            last_update: 0,
        }
    }
}

impl Keyed for ProjectFile {
    fn grouped_key(&self) -> GroupedKey {
        GroupedKey::create(&self.project_id, DEFAULT_ENVIRONMENT, &self.name)
    }
}

// =========================================================================
// Runtime statuses
// =========================================================================

/// Reported state of a project deployment in one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    pub project_id: String,
    pub name: String,
    pub namespace: String,
    pub env: String,
    pub cluster: String,
    pub image: String,
    pub replicas: u32,
    pub ready_replicas: u32,
    pub unavailable_replicas: u32,
}

impl Keyed for DeploymentStatus {
    fn grouped_key(&self) -> GroupedKey {
        GroupedKey::create(&self.project_id, &self.env, &self.project_id)
    }
}

/// Reported state of a project service in one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub project_id: String,
    pub name: String,
    pub namespace: String,
    pub env: String,
    pub cluster: String,
    pub port: u16,
    pub target_port: u16,
    pub cluster_ip: String,
    pub service_type: String,
}

impl Keyed for ServiceStatus {
    fn grouped_key(&self) -> GroupedKey {
        GroupedKey::create(&self.project_id, &self.env, &self.project_id)
    }
}

/// What a container is used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    Internal,
    /// Live development container running uncommitted project code.
    Devmode,
    Devservice,
    Project,
    #[default]
    Unknown,
}

impl ContainerType {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Devmode => "devmode",
            Self::Devservice => "devservice",
            Self::Project => "project",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reported state of a single container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub project_id: String,
    pub container_name: String,
    pub container_id: String,
    pub image: String,
    pub env: String,
    pub container_type: ContainerType,
    pub state: String,
    pub memory_info: String,
    pub cpu_info: String,
    pub created: Option<String>,
    pub finished: Option<String>,
    pub ports: Vec<u16>,
    /// Whether project code has been loaded into a dev-mode container.
    pub code_loaded: bool,
    pub in_transit: bool,
}

impl ContainerStatus {
    pub fn new(
        project_id: impl Into<String>,
        env: impl Into<String>,
        container_name: impl Into<String>,
        container_type: ContainerType,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            env: env.into(),
            container_name: container_name.into(),
            container_type,
            ..Default::default()
        }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.container_type == ContainerType::Devmode
    }
}

impl Keyed for ContainerStatus {
    fn grouped_key(&self) -> GroupedKey {
        GroupedKey::create(&self.project_id, &self.env, &self.container_name)
    }
}

// =========================================================================
// Camel route-engine statuses
// =========================================================================

/// Named facets reported by a running Camel context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CamelStatusName {
    Context,
    Inflight,
    Memory,
    Properties,
    Route,
    Trace,
    Jvm,
    Source,
    Debug,
}

impl CamelStatusName {
    pub const ALL: [CamelStatusName; 9] = [
        Self::Context,
        Self::Inflight,
        Self::Memory,
        Self::Properties,
        Self::Route,
        Self::Trace,
        Self::Jvm,
        Self::Source,
        Self::Debug,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Inflight => "inflight",
            Self::Memory => "memory",
            Self::Properties => "properties",
            Self::Route => "route",
            Self::Trace => "trace",
            Self::Jvm => "jvm",
            Self::Source => "source",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for CamelStatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One named status payload, usually raw JSON from the Camel dev console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamelStatusValue {
    pub name: CamelStatusName,
    pub status: String,
}

impl CamelStatusValue {
    pub fn new(name: CamelStatusName, status: impl Into<String>) -> Self {
        Self {
            name,
            status: status.into(),
        }
    }
}

/// Collected Camel statuses for one container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamelStatus {
    pub project_id: String,
    pub container_name: String,
    pub statuses: Vec<CamelStatusValue>,
    pub env: String,
}

impl CamelStatus {
    pub fn new(
        project_id: impl Into<String>,
        container_name: impl Into<String>,
        statuses: Vec<CamelStatusValue>,
        env: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            container_name: container_name.into(),
            statuses,
            env: env.into(),
        }
    }

    /// Copy of this status keeping only values with the given name.
    pub fn with_only(&self, name: CamelStatusName) -> Self {
        Self {
            statuses: self
                .statuses
                .iter()
                .filter(|v| v.name == name)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

impl Keyed for CamelStatus {
    fn grouped_key(&self) -> GroupedKey {
        GroupedKey::create(&self.project_id, &self.env, &self.container_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_key_uses_default_env() {
        let project = Project::new("p1", "Project One");
        assert_eq!(project.grouped_key().as_str(), "p1:dev:p1");
    }

    #[test]
    fn test_status_keys() {
        let deployment = DeploymentStatus {
            project_id: "p1".to_string(),
            env: "prod".to_string(),
            ..Default::default()
        };
        assert_eq!(deployment.grouped_key().as_str(), "p1:prod:p1");

        let container = ContainerStatus::new("p1", "prod", "c1", ContainerType::Project);
        assert_eq!(container.grouped_key().as_str(), "p1:prod:c1");
    }

    #[test]
    fn test_camel_with_only() {
        let status = CamelStatus::new(
            "p1",
            "c1",
            vec![
                CamelStatusValue::new(CamelStatusName::Memory, "{}"),
                CamelStatusValue::new(CamelStatusName::Route, "[]"),
            ],
            "dev",
        );
        let narrowed = status.with_only(CamelStatusName::Route);
        assert_eq!(narrowed.statuses.len(), 1);
        assert_eq!(narrowed.statuses[0].name, CamelStatusName::Route);
        assert_eq!(status.statuses.len(), 2);
    }

    #[test]
    fn test_enum_serde_names() {
        let json = serde_json::to_string(&ContainerType::Devmode).unwrap();
        assert_eq!(json, "\"devmode\"");
        let name: CamelStatusName = serde_json::from_str("\"jvm\"").unwrap();
        assert_eq!(name, CamelStatusName::Jvm);
    }
}
