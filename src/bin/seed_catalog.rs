// ABOUTME: Catalog seeding utility that imports USDA FoodData Central JSON exports
// ABOUTME: Builds or extends the local SQLite food catalog with nutrients, servings and aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Catalog seeder for `FoodLab`.
//!
//! Reads SR Legacy and Foundation Foods exports downloaded from
//! `FoodData` Central and writes them into the local catalog database.
//! Foods already present (by FDC id) are left untouched.
//!
//! Usage:
//! ```bash
//! # Seed from SR Legacy (catalog path from FOODLAB_CATALOG_PATH / data dir)
//! cargo run --bin seed-catalog -- --sr-legacy FoodData_Central_sr_legacy_food_json.json
//!
//! # Seed both datasets into an explicit catalog file
//! cargo run --bin seed-catalog -- --catalog-path ./data/nutrition.db \
//!     --sr-legacy sr_legacy.json --foundation foundation.json
//!
//! # Verbose output
//! cargo run --bin seed-catalog -- --sr-legacy sr_legacy.json -v
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use foodlab::catalog::import::{
    import_foods, read_export, write_import_metadata, ImportStats, UsdaDataset,
};
use foodlab::catalog::store::connect;
use foodlab::config::FoodLabConfig;
use foodlab::logging::LoggingConfig;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "FoodLab Catalog Seeder",
    long_about = "Import USDA FoodData Central SR Legacy and Foundation exports into the local food catalog"
)]
struct SeedArgs {
    /// Catalog database path override
    #[arg(long)]
    catalog_path: Option<PathBuf>,

    /// SR Legacy export (JSON)
    #[arg(long)]
    sr_legacy: Option<PathBuf>,

    /// Foundation Foods export (JSON)
    #[arg(long)]
    foundation: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn log_stats(label: &str, stats: &ImportStats) {
    info!(
        "{label}: read {}, inserted {}, duplicates {}, skipped {}",
        stats.read,
        stats.inserted,
        stats.duplicates,
        stats.skipped.len()
    );
    for (category, count) in &stats.by_category {
        info!("   {category}: {count}");
    }
    for reason in stats.skipped.iter().take(10) {
        warn!("   skipped: {reason}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let inputs: Vec<(PathBuf, UsdaDataset)> = [
        args.sr_legacy.map(|p| (p, UsdaDataset::SrLegacy)),
        args.foundation.map(|p| (p, UsdaDataset::Foundation)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if inputs.is_empty() {
        bail!("nothing to import: pass --sr-legacy and/or --foundation");
    }

    let catalog_path = match args.catalog_path {
        Some(path) => path,
        None => FoodLabConfig::from_env()?.catalog.path,
    };

    info!("FoodLab Catalog Seeder");
    info!("======================");
    info!("Catalog: {}", catalog_path.display());

    if let Some(parent) = catalog_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let pool = connect(&catalog_path)
        .await
        .with_context(|| format!("failed to open catalog {}", catalog_path.display()))?;

    for (path, dataset) in inputs {
        info!("Importing {} ({})", path.display(), dataset.source_tag());
        let foods = read_export(&path, dataset)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let stats = import_foods(&pool, &foods, dataset)
            .await
            .with_context(|| format!("failed to import {}", path.display()))?;
        log_stats(dataset.source_tag(), &stats);
    }

    let total = write_import_metadata(&pool).await?;
    pool.close().await;

    info!("======================");
    info!("Catalog ready: {total} foods");
    Ok(())
}
