// ABOUTME: FoodLab CLI - command-line front end for catalog search, nutrition lookup and cache admin
// ABOUTME: Builds the service graph from environment configuration and dispatches subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Rank catalog foods for a query
//! foodlab-cli search banana --limit 5
//!
//! # Resolve nutrition through Local → USDA → Spoonacular
//! foodlab-cli resolve quinoa 150 g
//!
//! # Run the cache-fronted analysis pipeline
//! foodlab-cli analyze "grilled chicken breast" --amount 200 --modality typed
//! foodlab-cli analyze "banana" --image ./banana.jpg
//!
//! # Inspect and edit the analysis cache
//! foodlab-cli cache list
//! foodlab-cli cache favorite img:ab12... true
//! foodlab-cli cache delete txt:9f8e...
//! foodlab-cli cache clear
//!
//! # Show effective configuration
//! foodlab-cli config
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foodlab::config::FoodLabConfig;
use foodlab::errors::AppResult;
use foodlab::logging::{LogFormat, LoggingConfig};
use foodlab::resources::FoodLabResources;
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "foodlab-cli",
    about = "FoodLab nutrition lookup CLI",
    long_about = "Search the local food catalog, resolve nutrition through the tiered providers, and manage the analysis cache."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (catalog, cache snapshot, image blobs)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Rank catalog foods for a free-text query
    Search {
        /// Query text
        query: String,

        /// Maximum results
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Resolve nutrition for a portion
    Resolve {
        /// Food name
        name: String,

        /// Amount in `unit`
        #[arg(default_value = "100")]
        amount: f64,

        /// Unit (g, kg, oz, lb, mg, serving)
        #[arg(default_value = "g")]
        unit: String,
    },

    /// Analyze a food, serving the cached analysis when present
    Analyze {
        /// Food name or description
        name: String,

        /// Portion amount
        #[arg(long, default_value = "100")]
        amount: f64,

        /// Portion unit
        #[arg(long, default_value = "g")]
        unit: String,

        /// Capture modality (image, spoken, typed)
        #[arg(long, default_value = "typed")]
        modality: String,

        /// Photo of the food; makes this an image capture
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Analysis cache management
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },

    /// Print the effective configuration
    Config,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CacheCommand {
    /// List live entries, newest first
    List {
        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },

    /// Show one entry as JSON
    Show {
        /// Cache key
        key: String,
    },

    /// Delete one entry and its image
    Delete {
        /// Cache key
        key: String,
    },

    /// Mark or unmark an entry as favorite
    Favorite {
        /// Cache key
        key: String,

        /// New favorite flag
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Remove every entry and image
    Clear,
}

fn load_config(data_dir: Option<PathBuf>) -> Result<FoodLabConfig> {
    let config = FoodLabConfig::from_env()?;
    Ok(match data_dir {
        Some(dir) => FoodLabConfig {
            usda: config.usda,
            spoonacular: config.spoonacular,
            http: config.http,
            scoring: config.scoring,
            ..FoodLabConfig::local_only(&dir)
        },
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig {
        level: if cli.verbose { "debug" } else { "warn" }.to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()?;

    let config = load_config(cli.data_dir)?;
    debug!("{}", config.summary());

    if matches!(cli.command, Command::Config) {
        println!("{}", config.summary());
        return Ok(());
    }

    let resources = FoodLabResources::build(config).await;

    match cli.command {
        Command::Search { query, limit } => {
            commands::food::search(&resources, &query, limit).await;
        }
        Command::Resolve { name, amount, unit } => {
            commands::food::resolve(&resources, &name, amount, &unit).await;
        }
        Command::Analyze {
            name,
            amount,
            unit,
            modality,
            image,
        } => {
            commands::food::analyze(&resources, name, amount, unit, &modality, image).await?;
        }
        Command::Cache { action } => match action {
            CacheCommand::List { favorites } => {
                commands::cache::list(&resources, favorites).await;
            }
            CacheCommand::Show { key } => {
                commands::cache::show(&resources, &key).await?;
            }
            CacheCommand::Delete { key } => {
                commands::cache::delete(&resources, &key).await?;
            }
            CacheCommand::Favorite { key, value } => {
                commands::cache::favorite(&resources, &key, value).await?;
            }
            CacheCommand::Clear => {
                commands::cache::clear(&resources).await?;
            }
        },
        Command::Config => {}
    }

    Ok(())
}
