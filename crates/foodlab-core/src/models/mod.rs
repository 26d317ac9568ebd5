// ABOUTME: Core data models shared by the catalog, resolver, and analysis cache
// ABOUTME: Nutrient profiles, catalog food records, serving definitions, and analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cached analysis payloads and capture metadata
pub mod analysis;
/// Catalog food records and serving definitions
pub mod food;
/// Canonical nutrient set and per-amount nutrient profiles
pub mod nutrients;

pub use analysis::{CaptureModality, FoodAnalysis, NutritionSource};
pub use food::{normalize_servings, FoodRecord, ServingDefinition};
pub use nutrients::{Nutrient, NutrientProfile, NutrientUnit};
