// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Karavan Cache CLI
//!
//! Command-line interface for running and inspecting the Karavan status cache.

use clap::{Parser, Subcommand};

mod commands;

/// Karavan cache - concurrent in-memory project and runtime status store
#[derive(Parser)]
#[command(name = "karavan-cache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "karavan-cache.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed the cache, mark it ready and run until Ctrl+C
    Up {
        /// Seconds between stats log lines (overrides the config file)
        #[arg(short, long)]
        interval_secs: Option<u64>,
    },

    /// Show table sizes after seeding
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List seeded projects and their files
    List,

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Up { interval_secs } => commands::up::execute(&cli.config, interval_secs).await,
        Commands::Stats { json } => commands::stats::execute(&cli.config, json).await,
        Commands::List => commands::list::execute(&cli.config).await,
        Commands::Validate { file } => commands::validate::execute(&file).await,
    }
}
