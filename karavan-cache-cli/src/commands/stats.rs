//! `karavan-cache stats` command - Show table sizes.
//!
//! The cache is volatile, so this reports what a fresh instance holds right
//! after seeding from the configuration file.

use karavan_cache_core::{CacheStore, ConfigLoader};

pub async fn execute(config_path: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_file(config_path)?;
    let store = CacheStore::new();
    config.seed(&store);

    let stats = store.stats();

    if json {
        println!("{}", stats.to_json()?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    KARAVAN CACHE STATISTICS                  ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║ Projects:             {:<38} ║", stats.projects);
    println!("║ Files:                {:<38} ║", stats.files);
    println!("║ Deployment statuses:  {:<38} ║", stats.deployment_statuses);
    println!("║ Container statuses:   {:<38} ║", stats.container_statuses);
    println!("║ Service statuses:     {:<38} ║", stats.service_statuses);
    println!("║ Camel statuses:       {:<38} ║", stats.camel_statuses);
    println!("║ Transits:             {:<38} ║", stats.transits);
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║ Total entries:        {:<38} ║", stats.total_entries());
    println!("╚══════════════════════════════════════════════════════════════╝");

    Ok(())
}
