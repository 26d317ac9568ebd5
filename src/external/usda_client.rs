// ABOUTME: USDA FoodData Central API client, the first remote nutrition tier
// ABOUTME: Food search, detail retrieval, 24h caching, rate limiting, and canonical nutrient mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! # Features
//! - Food search restricted to Foundation and SR Legacy data
//! - Detailed food information retrieval
//! - 24-hour caching to minimize API calls
//! - Rate limiting (30 requests per minute)
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use std::time::Duration;

use async_trait::async_trait;
use foodlab_core::constants::cache::REMOTE_RESPONSE_TTL_SECS;
use foodlab_core::constants::env_config::DEFAULT_USDA_BASE_URL;
use foodlab_core::constants::service_names::USDA_API;
use foodlab_core::errors::{AppError, AppResult};
use foodlab_core::models::{Nutrient, NutrientProfile, NutritionSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::throttle::{RateLimiter, TtlCache};
use super::NutritionProvider;
use crate::nutrition::scaler::scale_profile;

/// Atwater general-factor energy, reported instead of 1008 by Foundation foods
const ENERGY_ATWATER_GENERAL_ID: u32 = 2047;
/// Atwater specific-factor energy
const ENERGY_ATWATER_SPECIFIC_ID: u32 = 2048;

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API
    pub base_url: String,
    /// Cache TTL in seconds (default: 86400 = 24 hours)
    pub cache_ttl_secs: u64,
    /// Rate limit per minute (default: 30)
    pub rate_limit_per_minute: u32,
    /// Search results considered per lookup
    pub page_size: u32,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_USDA_BASE_URL.to_owned(),
            cache_ttl_secs: REMOTE_RESPONSE_TTL_SECS,
            rate_limit_per_minute: 30,
            page_size: 5,
        }
    }
}

/// USDA food search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type (e.g., "Foundation", "SR Legacy")
    #[serde(default)]
    pub data_type: String,
}

/// USDA nutrient amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodNutrient {
    /// Nutrient ID
    pub nutrient_id: u32,
    /// Nutrient name (e.g., "Protein", "Energy")
    pub nutrient_name: String,
    /// Nutrient unit (e.g., "g", "kcal", "mg")
    pub unit_name: String,
    /// Amount per 100g
    pub amount: f64,
}

/// Detailed USDA food information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodDetails {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type
    pub data_type: String,
    /// Nutrients with amounts; entries without an amount are dropped
    pub food_nutrients: Vec<FoodNutrient>,
}

impl FoodDetails {
    /// Canonical per-100 g profile
    ///
    /// Energy falls back to the Atwater figures when the classic kcal entry is missing.
    #[must_use]
    pub fn to_profile(&self) -> NutrientProfile {
        let mut profile: NutrientProfile = self
            .food_nutrients
            .iter()
            .filter_map(|n| Some((Nutrient::from_usda_id(n.nutrient_id)?, n.amount)))
            .collect();

        if !profile.contains(Nutrient::Calories) {
            let atwater = [ENERGY_ATWATER_GENERAL_ID, ENERGY_ATWATER_SPECIFIC_ID]
                .iter()
                .find_map(|id| {
                    self.food_nutrients
                        .iter()
                        .find(|n| n.nutrient_id == *id && n.unit_name.eq_ignore_ascii_case("kcal"))
                });
            profile.set_opt(Nutrient::Calories, atwater.map(|n| n.amount));
        }
        profile
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodSearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodDetailsResponse {
    fdc_id: u64,
    description: String,
    #[serde(default)]
    data_type: String,
    #[serde(default)]
    food_nutrients: Vec<FoodNutrientResponse>,
}

#[derive(Debug, Deserialize)]
struct FoodNutrientResponse {
    nutrient: Option<NutrientInfo>,
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NutrientInfo {
    id: u32,
    name: String,
    #[serde(default)]
    unit_name: String,
}

/// USDA `FoodData` Central API client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
    search_cache: TtlCache<String, Vec<FoodSearchResult>>,
    details_cache: TtlCache<u64, FoodDetails>,
    rate_limiter: RateLimiter,
}

impl UsdaClient {
    /// Create a client over a shared HTTP client
    #[must_use]
    pub fn new(config: UsdaClientConfig, http_client: reqwest::Client) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Self {
            rate_limiter: RateLimiter::per_minute(config.rate_limit_per_minute),
            search_cache: TtlCache::new(ttl),
            details_cache: TtlCache::new(ttl),
            config,
            http_client,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        self.rate_limiter.acquire().await;

        let response = self
            .http_client
            .get(url)
            .query(query)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::external_service(USDA_API, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                USDA_API,
                format!("HTTP {status}: {}", response.text().await.unwrap_or_default()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::external_service(USDA_API, format!("JSON parse error: {e}")))
    }

    /// Search Foundation and SR Legacy foods
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty, the page size is out of range, or the request fails
    pub async fn search_foods(&self, query: &str, page_size: u32) -> AppResult<Vec<FoodSearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }
        if page_size == 0 || page_size > 200 {
            return Err(AppError::invalid_input("Page size must be between 1 and 200"));
        }

        let cache_key = format!("{}:{page_size}", query.trim().to_lowercase());
        if let Some(hit) = self.search_cache.get(&cache_key).await {
            return Ok(hit);
        }

        let url = format!("{}/foods/search", self.config.base_url);
        let page_size = page_size.to_string();
        let response: SearchResponse = self
            .get_json(
                &url,
                &[
                    ("query", query),
                    ("pageSize", &page_size),
                    ("dataType", "Foundation,SR Legacy"),
                ],
            )
            .await?;

        self.search_cache.insert(cache_key, response.foods.clone()).await;
        Ok(response.foods)
    }

    /// Get detailed information for a food by FDC ID
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded
    pub async fn get_food_details(&self, fdc_id: u64) -> AppResult<FoodDetails> {
        if let Some(hit) = self.details_cache.get(&fdc_id).await {
            return Ok(hit);
        }

        let url = format!("{}/food/{fdc_id}", self.config.base_url);
        let response: FoodDetailsResponse = self.get_json(&url, &[]).await?;

        let details = FoodDetails {
            fdc_id: response.fdc_id,
            description: response.description,
            data_type: response.data_type,
            food_nutrients: response
                .food_nutrients
                .into_iter()
                .filter_map(|n| {
                    let info = n.nutrient?;
                    Some(FoodNutrient {
                        nutrient_id: info.id,
                        nutrient_name: info.name,
                        unit_name: info.unit_name,
                        amount: n.amount?,
                    })
                })
                .collect(),
        };

        self.details_cache.insert(fdc_id, details.clone()).await;
        Ok(details)
    }
}

#[async_trait]
impl NutritionProvider for UsdaClient {
    fn source(&self) -> NutritionSource {
        NutritionSource::Usda
    }

    async fn lookup(&self, name: &str, amount: f64, unit: &str) -> AppResult<Option<NutrientProfile>> {
        let hits = self.search_foods(name, self.config.page_size).await?;
        let Some(best) = hits.first() else {
            debug!(query = name, "USDA search returned nothing");
            return Ok(None);
        };

        let details = self.get_food_details(best.fdc_id).await?;
        let per_100g = details.to_profile();
        if per_100g.is_empty() {
            debug!(fdc_id = best.fdc_id, "USDA food has no mappable nutrients");
            return Ok(None);
        }
        debug!(fdc_id = best.fdc_id, food = %details.description, "USDA match");
        Ok(Some(scale_profile(&per_100g, amount, unit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrient(id: u32, unit: &str, amount: f64) -> FoodNutrient {
        FoodNutrient {
            nutrient_id: id,
            nutrient_name: String::new(),
            unit_name: unit.to_owned(),
            amount,
        }
    }

    #[test]
    fn test_profile_mapping() {
        let details = FoodDetails {
            fdc_id: 171_688,
            description: "Apples, raw, with skin".to_owned(),
            data_type: "SR Legacy".to_owned(),
            food_nutrients: vec![
                nutrient(1008, "kcal", 52.0),
                nutrient(1003, "g", 0.26),
                nutrient(1005, "g", 13.81),
                nutrient(1004, "g", 0.17),
                nutrient(1062, "kJ", 218.0),
            ],
        };
        let profile = details.to_profile();
        assert_eq!(profile.calories(), Some(52.0));
        assert_eq!(profile.protein(), Some(0.26));
        assert_eq!(profile.carbohydrates(), Some(13.81));
        assert_eq!(profile.fat(), Some(0.17));
        assert_eq!(profile.len(), 4);
    }

    #[test]
    fn test_atwater_energy_fallback() {
        let details = FoodDetails {
            fdc_id: 2_346_404,
            description: "Quinoa, cooked".to_owned(),
            data_type: "Foundation".to_owned(),
            food_nutrients: vec![nutrient(2047, "kcal", 120.0)],
        };
        assert_eq!(details.to_profile().calories(), Some(120.0));
    }

    #[test]
    fn test_search_result_decodes_camel_case() {
        let hit: FoodSearchResult = serde_json::from_str(
            r#"{"fdcId": 1750340, "description": "Apples, fuji", "dataType": "Foundation"}"#,
        )
        .unwrap();
        assert_eq!(hit.fdc_id, 1_750_340);
        assert_eq!(hit.data_type, "Foundation");
    }
}
