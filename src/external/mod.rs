// ABOUTME: Remote nutrition providers (USDA FoodData Central, Spoonacular)
// ABOUTME: Defines the provider interface shared by every nutrition tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! Each remote source implements [`NutritionProvider`]; the resolver only sees
//! that interface, so sources can be swapped without touching anything else.

/// Shared HTTP client construction
pub mod http_client;
/// Spoonacular ingredient client
pub mod spoonacular_client;
/// Rate limiting and response caching
pub mod throttle;
/// USDA `FoodData` Central client
pub mod usda_client;

use async_trait::async_trait;
use foodlab_core::errors::AppResult;
use foodlab_core::models::{NutrientProfile, NutritionSource};

pub use http_client::build_http_client;
pub use spoonacular_client::{SpoonacularClient, SpoonacularClientConfig};
pub use usda_client::{FoodDetails, FoodNutrient, FoodSearchResult, UsdaClient, UsdaClientConfig};

/// A source of nutrient profiles for a named food
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Which tier this provider represents
    fn source(&self) -> NutritionSource;

    /// Profile for `amount` of `unit` of the named food
    ///
    /// `Ok(None)` means the source has no match. `Err` is a failed lookup.
    async fn lookup(&self, name: &str, amount: f64, unit: &str) -> AppResult<Option<NutrientProfile>>;
}
