// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Karavan Cache Benchmarks
//!
//! Fixtures shared by the criterion benches.
//!
//! # Benchmark Categories
//!
//! - **Store Ops**: single-threaded save, lookup and filter costs by table size
//! - **Concurrent Access**: mixed writers and readers on one shared store

use karavan_cache_core::{
    CacheStore, CamelStatus, CamelStatusName, CamelStatusValue, ContainerStatus, ContainerType,
};

/// Environments entries are spread across.
pub const ENVIRONMENTS: &[&str] = &["dev", "test", "prod"];

/// Container status for project `p`, container `c`, spread over environments.
pub fn container(p: usize, c: usize) -> ContainerStatus {
    let kind = if c == 0 {
        ContainerType::Devmode
    } else {
        ContainerType::Project
    };
    let mut status = ContainerStatus::new(
        format!("project-{}", p),
        ENVIRONMENTS[c % ENVIRONMENTS.len()],
        format!("container-{}", c),
        kind,
    );
    status.code_loaded = c == 0;
    status
}

/// Camel status carrying every named value.
pub fn camel(p: usize, c: usize) -> CamelStatus {
    let statuses = CamelStatusName::ALL
        .iter()
        .map(|name| CamelStatusValue::new(*name, "{\"status\":\"ok\"}"))
        .collect();
    CamelStatus::new(
        format!("project-{}", p),
        format!("container-{}", c),
        statuses,
        ENVIRONMENTS[c % ENVIRONMENTS.len()],
    )
}

/// Store holding `projects * containers_per_project` container and Camel statuses.
pub fn populated_store(projects: usize, containers_per_project: usize) -> CacheStore {
    let store = CacheStore::new();
    for p in 0..projects {
        for c in 0..containers_per_project {
            store.save_container_status(container(p, c));
            store.save_camel_status(camel(p, c));
        }
    }
    store
}
