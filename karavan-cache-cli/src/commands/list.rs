// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `karavan-cache list` command - List projects seeded from configuration.

use karavan_cache_core::{CacheStore, ConfigLoader};

pub async fn execute(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_file(config_path)?;
    let store = CacheStore::new();
    config.seed(&store);

    let mut projects = store.get_projects();
    if projects.is_empty() {
        println!("No projects defined in configuration.");
        return Ok(());
    }
    projects.sort_by(|a, b| a.project_id.cmp(&b.project_id));

    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                              SEEDED PROJECTS                                 ║");
    println!("╠═══════════════════╦═══════════════════════════╦═══════════════╦══════════════╣");
    println!("║ ID                ║ Name                      ║ Type          ║ Files        ║");
    println!("╠═══════════════════╬═══════════════════════════╬═══════════════╬══════════════╣");

    for project in &projects {
        let files = store.get_project_files(&project.project_id);
        println!(
            "║ {:<17} ║ {:<25} ║ {:<13} ║ {:<12} ║",
            project.project_id,
            project.name,
            project.project_type.name(),
            files.len()
        );
    }

    println!("╚═══════════════════╩═══════════════════════════╩═══════════════╩══════════════╝");
    println!();

    for project in &projects {
        let mut files = store.get_project_files(&project.project_id);
        files.sort_by(|a, b| a.name.cmp(&b.name));
        for file in files {
            println!("  {}/{} ({} bytes)", project.project_id, file.name, file.code.len());
        }
    }

    println!();
    println!("Total: {} project(s)", projects.len());

    Ok(())
}
