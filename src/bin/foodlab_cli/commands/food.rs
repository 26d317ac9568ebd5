// ABOUTME: Food lookup commands for foodlab-cli
// ABOUTME: Handles catalog search, tiered nutrition resolution and cache-fronted analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;
use std::sync::Arc;

use foodlab::analysis::{AnalysisOrigin, FoodRequest, NutritionSummaryService};
use foodlab::errors::{AppError, AppResult};
use foodlab::models::CaptureModality;
use foodlab::resources::FoodLabResources;

type Result<T> = AppResult<T>;

use crate::helpers::display::{display_profile, display_search_results};

/// Rank catalog foods for `query`
pub async fn search(resources: &FoodLabResources, query: &str, limit: usize) {
    let results = resources.search.search(query, limit).await;
    display_search_results(query, &results);
}

/// Resolve nutrition for a portion and print where it came from
pub async fn resolve(resources: &FoodLabResources, name: &str, amount: f64, unit: &str) {
    match resources.resolver.resolve(name, amount, unit).await {
        Some(resolved) => {
            println!("\n{name} ({amount} {unit}) from {}", resolved.source);
            println!("{}", "=".repeat(48));
            display_profile(&resolved.profile);
        }
        None => println!("No nutrition found for '{name}' in any tier"),
    }
}

/// Analyze a food through the cache-fronted pipeline
pub async fn analyze(
    resources: &FoodLabResources,
    name: String,
    amount: f64,
    unit: String,
    modality: &str,
    image: Option<PathBuf>,
) -> Result<()> {
    let modality = CaptureModality::parse(modality)
        .ok_or_else(|| AppError::invalid_input(format!("unknown modality '{modality}'")))?;
    let mut request = FoodRequest::new(name, amount, unit, modality);
    if let Some(path) = image {
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            AppError::storage(format!("cannot read image {}: {e}", path.display()))
        })?;
        request = request.with_image(bytes);
    }

    let pipeline = resources.pipeline(Arc::new(NutritionSummaryService));
    let outcome = pipeline.analyze(request).await?;

    println!(
        "\n{} ({})",
        outcome.entry.subject_name,
        match outcome.origin {
            AnalysisOrigin::Cache => "cached",
            AnalysisOrigin::Fresh => "fresh",
        }
    );
    println!("{}", "=".repeat(48));
    println!("   Cache key: {}", outcome.entry.cache_key);
    match (&outcome.entry.analysis.nutrition, outcome.entry.analysis.nutrition_source) {
        (Some(profile), Some(source)) => {
            println!("   Nutrition source: {source}");
            display_profile(profile);
        }
        _ => println!("   Nutrition: unknown"),
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&outcome.entry.analysis.details)?
    );
    Ok(())
}
