// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `karavan-cache validate` command - Validate configuration file.

use karavan_cache_core::ConfigLoader;

pub async fn execute(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file, "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Cache Settings:");
            println!(
                "  Stats Interval:     {}s",
                config.cache.stats_interval_secs
            );
            println!();
            println!("Projects ({}):", config.projects.len());
            for seed in &config.projects {
                println!(
                    "  - {} (name: {}, type: {}, files: {})",
                    seed.project.project_id,
                    seed.project.name,
                    seed.project.project_type,
                    seed.files.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
