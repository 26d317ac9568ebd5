// ABOUTME: Output formatting helpers for foodlab-cli
// ABOUTME: Provides consistent display of search hits, nutrient profiles and cache entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodlab::cache::AnalysisCacheEntry;
use foodlab::models::{CaptureModality, NutrientProfile};
use foodlab::search::ScoredFood;

/// Display ranked search hits as a table
pub fn display_search_results(query: &str, results: &[ScoredFood]) {
    if results.is_empty() {
        println!("No catalog foods match '{query}'");
        return;
    }
    println!("\nResults for '{query}':");
    println!("{}", "=".repeat(72));
    println!("{:>6}  {:>8}  {:<12}  Name", "Score", "FDC", "Category");
    println!("{}", "-".repeat(72));
    for hit in results {
        println!(
            "{:>6}  {:>8}  {:<12}  {}{}",
            hit.score,
            hit.record.fdc_id,
            hit.record.category,
            hit.record.name,
            if hit.via_alias { "  (alias)" } else { "" }
        );
    }
}

/// Display every present nutrient with its unit
pub fn display_profile(profile: &NutrientProfile) {
    for (nutrient, value) in profile.iter() {
        println!(
            "   {:<16} {value:>10.2} {}",
            nutrient.key(),
            nutrient.unit().symbol()
        );
    }
}

/// One-line summary of a cache entry
pub fn display_entry_line(entry: &AnalysisCacheEntry) {
    let kcal = entry
        .analysis
        .nutrition
        .as_ref()
        .and_then(NutrientProfile::calories)
        .map_or_else(|| "-".to_owned(), |k| format!("{k:.0} kcal"));
    println!(
        "{} {}  {:<24}  {:<10}  {}  {}",
        if entry.is_favorite { "*" } else { " " },
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.subject_name,
        kcal,
        entry.modality.map_or("-", CaptureModality::as_str),
        entry.cache_key
    );
}
