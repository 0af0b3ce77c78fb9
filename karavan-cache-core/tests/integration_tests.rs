// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end integration tests for the Karavan cache.
//!
//! These tests drive the store the way API handlers and status pollers do:
//! from several threads at once, through the public API only.

use std::sync::{Arc, Barrier};
use std::thread;

use karavan_cache_core::{
    CacheStore, CamelStatus, CamelStatusName, CamelStatusValue, ConfigLoader, ContainerStatus,
    ContainerType, DeploymentStatus, Project, ProjectFile,
};
use tempfile::TempDir;

/// Test configuration loading and seeding from a file on disk
#[test]
fn test_config_file_seeds_store() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("karavan-cache.yaml");

    std::fs::write(
        &config_path,
        r#"
projects:
  - project_id: orders
    name: Orders
    files:
      - name: orders.camel.yaml
        code: "- route: {}"
      - name: application.properties
        code: "camel.jbang.version=4"
  - project_id: payments
"#,
    )
    .expect("Failed to write config");

    let config = ConfigLoader::load_file(&config_path).expect("Failed to load config");
    let store = CacheStore::new_shared();
    let summary = config.seed(&store);

    assert_eq!(summary.projects, 2);
    assert_eq!(summary.files, 2);
    assert_eq!(store.get_projects().len(), 2);
    assert_eq!(store.get_project_files("orders").len(), 2);
    assert!(store.get_project_files("payments").is_empty());
}

/// Test that a missing config file is reported, not panicked on
#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = ConfigLoader::load_file(temp_dir.path().join("absent.yaml"));
    assert!(result.is_err());
}

/// Test partition correctness across many projects
#[test]
fn test_list_by_project_partition() {
    let store = CacheStore::new();

    for p in 0..5 {
        let project_id = format!("p{}", p);
        store.save_project(Project::new(&project_id, &project_id));
        let batch = (0..=p)
            .map(|f| ProjectFile::new(&project_id, format!("file-{}.yaml", f), ""))
            .collect();
        store.save_project_files(batch);
    }

    for p in 0..5 {
        let files = store.get_project_files(&format!("p{}", p));
        assert_eq!(files.len(), p + 1);
        assert!(files.iter().all(|f| f.project_id == format!("p{}", p)));
    }
    assert!(store.get_project_files("p9").is_empty());
}

/// Test that changing only the environment produces a distinct entry
#[test]
fn test_environment_partition() {
    let store = CacheStore::new();

    for env in ["dev", "test", "prod"] {
        store.save_container_status(ContainerStatus::new("p1", env, "c1", ContainerType::Project));
    }

    assert_eq!(store.get_container_statuses().len(), 3);
    for env in ["dev", "test", "prod"] {
        let statuses = store.get_container_statuses_by_env(env);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].env, env);
    }
}

/// Test concurrent writers on disjoint keys
#[test]
fn test_concurrent_writers() {
    let store = CacheStore::new_shared();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for j in 0..250 {
                    let env = if j % 2 == 0 { "dev" } else { "prod" };
                    store.save_container_status(ContainerStatus::new(
                        format!("p{}", i),
                        env,
                        format!("c{}", j),
                        ContainerType::Project,
                    ));
                    store.set_transit(&format!("p{}", i), env, &format!("c{}", j));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.container_statuses, 2000);
    assert_eq!(stats.transits, 2000);
    assert_eq!(store.get_container_statuses_by_env("dev").len(), 1000);
}

/// Test last-write-wins on one key with readers running alongside
#[test]
fn test_concurrent_last_write_wins() {
    let store = CacheStore::new_shared();
    let barrier = Arc::new(Barrier::new(5));

    let writer = {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for replicas in 0..=1000u32 {
                store.save_deployment_status(DeploymentStatus {
                    project_id: "p1".to_string(),
                    env: "dev".to_string(),
                    replicas,
                    ready_replicas: replicas,
                    ..Default::default()
                });
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..1000 {
                    if let Some(status) = store.get_deployment_status("p1", "dev") {
                        // Entries are never torn
                        assert_eq!(status.replicas, status.ready_replicas);
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let last = store.get_deployment_status("p1", "dev").unwrap();
    assert_eq!(last.replicas, 1000);
    assert_eq!(store.get_deployment_statuses().len(), 1);
}

/// Test pollers clearing statuses while handlers read them
#[test]
fn test_clear_while_reading() {
    let store = CacheStore::new_shared();

    for i in 0..100 {
        store.save_container_status(ContainerStatus::new(
            "p1",
            "dev",
            format!("c{}", i),
            ContainerType::Devmode,
        ));
    }

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..100 {
                let statuses = store.get_dev_mode_statuses();
                assert!(statuses.len() <= 100);
            }
        })
    };

    store.clear_all_statuses();
    reader.join().unwrap();

    assert!(store.get_container_statuses().is_empty());
}

/// Test the narrowing read leaves narrowed entries behind
#[test]
fn test_narrowing_read_is_visible_to_later_readers() {
    let store = CacheStore::new();
    store.save_camel_status(CamelStatus::new(
        "p1",
        "c1",
        vec![
            CamelStatusValue::new(CamelStatusName::Context, "{}"),
            CamelStatusValue::new(CamelStatusName::Jvm, "{}"),
        ],
        "dev",
    ));

    let copies = store.get_camel_statuses_by_name(CamelStatusName::Jvm);
    assert_eq!(copies[0].statuses.len(), 1);
    assert_eq!(
        store.get_camel_status("p1", "dev", "c1").unwrap().statuses.len(),
        2
    );

    store.narrow_camel_statuses_by_name(CamelStatusName::Context);
    let cached = store.get_camel_status("p1", "dev", "c1").unwrap();
    assert_eq!(cached.statuses.len(), 1);
    assert_eq!(cached.statuses[0].name, CamelStatusName::Context);
}

/// Test the readiness gate lifecycle alongside table use
#[test]
fn test_readiness_lifecycle() {
    let store = CacheStore::new_shared();
    assert!(!store.is_ready());

    assert!(store.start());
    store.save_project(Project::new("p1", "Project One"));
    assert!(store.is_ready());

    assert!(store.stop());
    assert!(!store.is_ready());
    assert_eq!(store.readiness().transition_count(), 2);
    assert!(store.get_project("p1").is_some());
}
