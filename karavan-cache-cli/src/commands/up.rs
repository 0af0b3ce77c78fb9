// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `karavan-cache up` command - Run the cache.
//!
//! Rebuilds the store from configuration, opens the readiness gate and keeps
//! the process alive until Ctrl+C, logging table sizes periodically.

use std::time::Duration;

use karavan_cache_core::{CacheStore, ConfigLoader};

pub async fn execute(
    config_path: &str,
    interval_secs: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(config = %config_path, "Starting cache");

    // Load and validate configuration - fail fast on invalid config
    let config = ConfigLoader::load_file(config_path)?;

    let store = CacheStore::new_shared();
    let summary = config.seed(&store);
    store.start();

    let interval = Duration::from_secs(
        interval_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(config.cache.stats_interval_secs),
    );

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                     KARAVAN STATUS CACHE                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "  Seeded:      {} project(s), {} file(s)",
        summary.projects, summary.files
    );
    println!("  Ready:       {}", store.is_ready());
    println!();
    println!("Press Ctrl+C to stop...");

    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let stats = store.stats();
                tracing::info!(
                    ready = stats.ready,
                    projects = stats.projects,
                    files = stats.files,
                    deployment_statuses = stats.deployment_statuses,
                    container_statuses = stats.container_statuses,
                    service_statuses = stats.service_statuses,
                    camel_statuses = stats.camel_statuses,
                    transits = stats.transits,
                    "Cache stats"
                );
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
        }
    }

    println!();
    println!("Shutting down...");
    store.stop();
    println!("Cache stopped.");

    Ok(())
}
