// ABOUTME: Analysis cache commands for foodlab-cli
// ABOUTME: Handles list, show, delete, favorite and clear operations on cached analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodlab::errors::{AppError, AppResult};
use foodlab::resources::FoodLabResources;
use tracing::info;

type Result<T> = AppResult<T>;

use crate::helpers::display::display_entry_line;

/// List live entries, newest first
pub async fn list(resources: &FoodLabResources, favorites_only: bool) {
    let entries = resources.cache.list().await;
    let shown: Vec<_> = entries
        .iter()
        .filter(|e| !favorites_only || e.is_favorite)
        .collect();
    if shown.is_empty() {
        println!("Analysis cache is empty");
        return;
    }
    for entry in shown {
        display_entry_line(entry);
    }
}

/// Print one entry as JSON
pub async fn show(resources: &FoodLabResources, key: &str) -> Result<()> {
    let entry = resources
        .cache
        .get(key)
        .await
        .ok_or_else(|| AppError::not_found(format!("cache entry {key}")))?;
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}

/// Delete one entry and its image
pub async fn delete(resources: &FoodLabResources, key: &str) -> Result<()> {
    if resources.cache.delete(key).await? {
        info!("Deleted cache entry {key}");
        println!("Deleted {key}");
        Ok(())
    } else {
        Err(AppError::not_found(format!("cache entry {key}")))
    }
}

/// Set the favorite flag
pub async fn favorite(resources: &FoodLabResources, key: &str, value: bool) -> Result<()> {
    if resources.cache.set_favorite(key, value).await? {
        println!("{key}: favorite = {value}");
        Ok(())
    } else {
        Err(AppError::not_found(format!("cache entry {key}")))
    }
}

/// Remove every entry and image
pub async fn clear(resources: &FoodLabResources) -> Result<()> {
    let before = resources.cache.len().await;
    resources.cache.clear().await?;
    println!("Removed {before} cache entries");
    Ok(())
}
