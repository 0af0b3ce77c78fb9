// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The cache store: seven independent tables plus a readiness gate.
//!
//! Writers (API handlers, status pollers) and readers share one `CacheStore`
//! through an `Arc`. Each operation touches a single table; nothing spans
//! tables atomically and deleting a project does not cascade to its files
//! or statuses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{
    CamelStatus, CamelStatusName, ContainerStatus, ContainerType, DeploymentStatus, Project,
    ProjectFile, ServiceStatus,
};
use crate::readiness::Readiness;
use crate::stats::CacheStats;
use crate::table::Table;
use crate::types::GroupedKey;

/// In-memory source of truth for projects and their runtime status.
#[derive(Debug)]
pub struct CacheStore {
    projects: Table<Project>,
    files: Table<ProjectFile>,
    deployment_statuses: Table<DeploymentStatus>,
    container_statuses: Table<ContainerStatus>,
    transits: Table<bool>,
    service_statuses: Table<ServiceStatus>,
    camel_statuses: Table<CamelStatus>,
    readiness: Readiness,
}

impl CacheStore {
    /// Create a new empty store in the `NotReady` state.
    pub fn new() -> Self {
        Self {
            projects: Table::new("projects"),
            files: Table::new("files"),
            deployment_statuses: Table::new("deployment_statuses"),
            container_statuses: Table::new("container_statuses"),
            transits: Table::new("transits"),
            service_statuses: Table::new("service_statuses"),
            camel_statuses: Table::new("camel_statuses"),
            readiness: Readiness::new(),
        }
    }

    /// Create a store wrapped in an Arc for sharing across threads.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mark the store ready for external traffic.
    pub fn start(&self) -> bool {
        self.readiness.start()
    }

    /// Mark the store not ready, on shutdown.
    pub fn stop(&self) -> bool {
        self.readiness.stop()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    // =========================================================================
    // Projects
    // =========================================================================

    pub fn get_projects(&self) -> Vec<Project> {
        self.projects.list()
    }

    pub fn save_project(&self, project: Project) {
        self.projects.save(project);
    }

    pub fn get_project(&self, project_id: &str) -> Option<Project> {
        self.projects
            .get(&GroupedKey::default_env(project_id, project_id))
    }

    /// Remove a project. Its files and statuses are left untouched.
    pub fn delete_project(&self, project_id: &str) {
        self.projects
            .remove(&GroupedKey::default_env(project_id, project_id));
    }

    // =========================================================================
    // Project files
    // =========================================================================

    pub fn save_project_file(&self, file: ProjectFile) {
        self.files.save(file);
    }

    /// Stamp every file with the current time, then insert them all.
    /// Each insert is atomic on its own; the batch as a whole is not.
    pub fn save_project_files(&self, mut batch: Vec<ProjectFile>) {
        let last_update = now_millis();
        for file in batch.iter_mut() {
            file.last_update = last_update;
        }

        tracing::debug!(files = batch.len(), last_update, "Saving project file batch");
        for file in batch {
            self.files.save(file);
        }
    }

    pub fn get_project_files(&self, project_id: &str) -> Vec<ProjectFile> {
        self.files.filter(|f| f.project_id == project_id)
    }

    /// Files of one project keyed by their table key.
    pub fn get_project_files_map(&self, project_id: &str) -> HashMap<GroupedKey, ProjectFile> {
        self.files
            .filter_entries(|f| f.project_id == project_id)
            .into_iter()
            .collect()
    }

    pub fn get_project_file(&self, project_id: &str, name: &str) -> Option<ProjectFile> {
        self.files.get(&GroupedKey::default_env(project_id, name))
    }

    /// Files with the given name across all projects.
    pub fn get_project_files_by_name(&self, name: &str) -> Vec<ProjectFile> {
        self.files.filter(|f| f.name == name)
    }

    pub fn delete_project_file(&self, project_id: &str, name: &str) {
        self.files.remove(&GroupedKey::default_env(project_id, name));
    }

    // =========================================================================
    // Deployment statuses
    // =========================================================================

    pub fn save_deployment_status(&self, status: DeploymentStatus) {
        self.deployment_statuses.save(status);
    }

    pub fn get_deployment_status(&self, project_id: &str, env: &str) -> Option<DeploymentStatus> {
        self.deployment_statuses
            .get(&GroupedKey::create(project_id, env, project_id))
    }

    pub fn delete_deployment_status(&self, status: &DeploymentStatus) {
        self.deployment_statuses.delete(status);
    }

    pub fn get_deployment_statuses(&self) -> Vec<DeploymentStatus> {
        self.deployment_statuses.list()
    }

    pub fn get_deployment_statuses_by_env(&self, env: &str) -> Vec<DeploymentStatus> {
        self.deployment_statuses.filter(|s| s.env == env)
    }

    pub fn delete_all_deployment_statuses(&self) {
        self.deployment_statuses.clear();
    }

    // =========================================================================
    // Service statuses
    // =========================================================================

    pub fn save_service_status(&self, status: ServiceStatus) {
        self.service_statuses.save(status);
    }

    pub fn get_service_status(&self, project_id: &str, env: &str) -> Option<ServiceStatus> {
        self.service_statuses
            .get(&GroupedKey::create(project_id, env, project_id))
    }

    pub fn delete_service_status(&self, status: &ServiceStatus) {
        self.service_statuses.delete(status);
    }

    pub fn get_service_statuses(&self) -> Vec<ServiceStatus> {
        self.service_statuses.list()
    }

    // =========================================================================
    // Transits
    // =========================================================================

    /// Mark a container as being in transit (e.g. restarting).
    pub fn set_transit(&self, project_id: &str, env: &str, container_name: &str) {
        self.transits
            .insert(GroupedKey::create(project_id, env, container_name), true);
    }

    pub fn get_transit(&self, project_id: &str, env: &str, container_name: &str) -> Option<bool> {
        self.transits
            .get(&GroupedKey::create(project_id, env, container_name))
    }

    pub fn get_transits(&self) -> Vec<bool> {
        self.transits.list()
    }

    pub fn delete_transit(&self, project_id: &str, env: &str, container_name: &str) {
        self.transits
            .remove(&GroupedKey::create(project_id, env, container_name));
    }

    // =========================================================================
    // Container statuses
    // =========================================================================

    pub fn save_container_status(&self, status: ContainerStatus) {
        self.container_statuses.save(status);
    }

    pub fn get_container_status(
        &self,
        project_id: &str,
        env: &str,
        container_name: &str,
    ) -> Option<ContainerStatus> {
        self.get_container_status_by_key(&GroupedKey::create(project_id, env, container_name))
    }

    pub fn get_container_status_by_key(&self, key: &GroupedKey) -> Option<ContainerStatus> {
        self.container_statuses.get(key)
    }

    /// The dev-mode container of a project is named after the project.
    pub fn get_dev_mode_container_status(
        &self,
        project_id: &str,
        env: &str,
    ) -> Option<ContainerStatus> {
        self.get_container_status(project_id, env, project_id)
    }

    /// Mutate a cached container status in place. Returns false if absent.
    ///
    /// `f` runs under the entry's shard write lock and must not call back
    /// into this store's table for the same kind, or it deadlocks.
    pub fn update_container_status<F>(
        &self,
        project_id: &str,
        env: &str,
        container_name: &str,
        f: F,
    ) -> bool
    where
        F: FnOnce(&mut ContainerStatus),
    {
        self.container_statuses
            .update(&GroupedKey::create(project_id, env, container_name), f)
    }

    pub fn get_container_statuses(&self) -> Vec<ContainerStatus> {
        self.container_statuses.list()
    }

    pub fn get_container_statuses_by_project_and_env(
        &self,
        project_id: &str,
        env: &str,
    ) -> Vec<ContainerStatus> {
        self.container_statuses
            .filter(|s| s.project_id == project_id && s.env == env)
    }

    pub fn get_container_statuses_by_env(&self, env: &str) -> Vec<ContainerStatus> {
        self.container_statuses.filter(|s| s.env == env)
    }

    pub fn get_dev_mode_statuses(&self) -> Vec<ContainerStatus> {
        self.container_statuses
            .filter(|s| s.container_type == ContainerType::Devmode)
    }

    /// Dev-mode containers that already have project code loaded.
    pub fn get_loaded_dev_mode_statuses(&self) -> Vec<ContainerStatus> {
        self.container_statuses
            .filter(|s| s.container_type == ContainerType::Devmode && s.code_loaded)
    }

    pub fn delete_container_status(&self, status: &ContainerStatus) {
        self.container_statuses.delete(status);
    }

    pub fn delete_container_status_by_parts(
        &self,
        project_id: &str,
        env: &str,
        container_name: &str,
    ) {
        self.container_statuses
            .remove(&GroupedKey::create(project_id, env, container_name));
    }

    pub fn delete_all_container_statuses(&self) {
        self.container_statuses.clear();
    }

    // =========================================================================
    // Camel statuses
    // =========================================================================

    pub fn save_camel_status(&self, status: CamelStatus) {
        self.camel_statuses.save(status);
    }

    pub fn get_camel_status(
        &self,
        project_id: &str,
        env: &str,
        container_name: &str,
    ) -> Option<CamelStatus> {
        self.get_camel_status_by_key(&GroupedKey::create(project_id, env, container_name))
    }

    pub fn get_camel_status_by_key(&self, key: &GroupedKey) -> Option<CamelStatus> {
        self.camel_statuses.get(key)
    }

    /// Mutate a cached Camel status in place. Returns false if absent.
    ///
    /// `f` runs under the entry's shard write lock and must not call back
    /// into this store's table for the same kind, or it deadlocks.
    pub fn update_camel_status<F>(
        &self,
        project_id: &str,
        env: &str,
        container_name: &str,
        f: F,
    ) -> bool
    where
        F: FnOnce(&mut CamelStatus),
    {
        self.camel_statuses
            .update(&GroupedKey::create(project_id, env, container_name), f)
    }

    /// Every Camel status, each holding only the values named `name`.
    /// Returns copies; cached entries keep all their values.
    pub fn get_camel_statuses_by_name(&self, name: CamelStatusName) -> Vec<CamelStatus> {
        self.camel_statuses
            .list()
            .into_iter()
            .map(|status| status.with_only(name))
            .collect()
    }

    /// Narrow every cached Camel status to the values named `name` and
    /// return the full, narrowed list.
    ///
    /// This mutates the cache: later reads of the same entries observe the
    /// narrowed collection until the next `save_camel_status` for that key.
    pub fn narrow_camel_statuses_by_name(&self, name: CamelStatusName) -> Vec<CamelStatus> {
        tracing::debug!(name = name.name(), "Narrowing cached camel statuses");
        self.camel_statuses
            .map_in_place(|status| status.statuses.retain(|v| v.name == name))
    }

    pub fn get_camel_statuses_by_project_and_env(
        &self,
        project_id: &str,
        env: &str,
    ) -> Vec<CamelStatus> {
        self.camel_statuses
            .filter(|s| s.project_id == project_id && s.env == env)
    }

    pub fn delete_camel_status(&self, project_id: &str, env: &str, container_name: &str) {
        self.camel_statuses
            .remove(&GroupedKey::create(project_id, env, container_name));
    }

    /// Delete every Camel status of one project in one environment.
    pub fn delete_camel_statuses(&self, project_id: &str, env: &str) {
        self.camel_statuses
            .retain(|s| !(s.project_id == project_id && s.env == env));
    }

    pub fn delete_all_camel_statuses(&self) {
        self.camel_statuses.clear();
    }

    // =========================================================================
    // Bulk
    // =========================================================================

    /// Clear deployment, container and Camel statuses. Not atomic across
    /// the three tables.
    pub fn clear_all_statuses(&self) {
        self.deployment_statuses.clear();
        self.container_statuses.clear();
        self.camel_statuses.clear();
    }

    /// Point-in-time table sizes and readiness.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            ready: self.is_ready(),
            projects: self.projects.len(),
            files: self.files.len(),
            deployment_statuses: self.deployment_statuses.len(),
            container_statuses: self.container_statuses.len(),
            transits: self.transits.len(),
            service_statuses: self.service_statuses.len(),
            camel_statuses: self.camel_statuses.len(),
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
