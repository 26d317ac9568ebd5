// ABOUTME: Spoonacular ingredient API client, the second remote nutrition tier
// ABOUTME: Maps Spoonacular nutrient names and units onto the canonical nutrient set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use foodlab_core::constants::cache::REMOTE_RESPONSE_TTL_SECS;
use foodlab_core::constants::env_config::DEFAULT_SPOONACULAR_BASE_URL;
use foodlab_core::constants::service_names::SPOONACULAR_API;
use foodlab_core::constants::units::{
    MICROGRAMS_PER_MILLIGRAM, MILLIGRAMS_PER_GRAM, VITAMIN_A_MCG_PER_IU, VITAMIN_D_MCG_PER_IU,
};
use foodlab_core::errors::{AppError, AppResult};
use foodlab_core::models::{Nutrient, NutrientProfile, NutrientUnit, NutritionSource};
use serde::Deserialize;
use tracing::{debug, trace};

use super::throttle::{RateLimiter, TtlCache};
use super::NutritionProvider;
use crate::nutrition::scaler::scale_profile;

const KJ_PER_KCAL: f64 = 4.184;

/// Spoonacular nutrient names (lowercase) and their canonical nutrient
const NUTRIENT_SYNONYMS: &[(&str, Nutrient)] = &[
    ("calories", Nutrient::Calories),
    ("energy", Nutrient::Calories),
    ("protein", Nutrient::Protein),
    ("carbohydrates", Nutrient::Carbohydrates),
    ("carbohydrate", Nutrient::Carbohydrates),
    ("carbs", Nutrient::Carbohydrates),
    ("fat", Nutrient::Fat),
    ("total fat", Nutrient::Fat),
    ("fiber", Nutrient::Fiber),
    ("dietary fiber", Nutrient::Fiber),
    ("sugar", Nutrient::Sugar),
    ("sugars", Nutrient::Sugar),
    ("sodium", Nutrient::Sodium),
    ("saturated fat", Nutrient::SaturatedFat),
    ("cholesterol", Nutrient::Cholesterol),
    ("potassium", Nutrient::Potassium),
    ("calcium", Nutrient::Calcium),
    ("iron", Nutrient::Iron),
    ("magnesium", Nutrient::Magnesium),
    ("phosphorus", Nutrient::Phosphorus),
    ("zinc", Nutrient::Zinc),
    ("copper", Nutrient::Copper),
    ("manganese", Nutrient::Manganese),
    ("selenium", Nutrient::Selenium),
    ("iodine", Nutrient::Iodine),
    ("vitamin a", Nutrient::VitaminA),
    ("vitamin c", Nutrient::VitaminC),
    ("vitamin d", Nutrient::VitaminD),
    ("vitamin e", Nutrient::VitaminE),
    ("vitamin k", Nutrient::VitaminK),
    ("vitamin b1", Nutrient::VitaminB1),
    ("thiamin", Nutrient::VitaminB1),
    ("vitamin b2", Nutrient::VitaminB2),
    ("riboflavin", Nutrient::VitaminB2),
    ("vitamin b3", Nutrient::VitaminB3),
    ("niacin", Nutrient::VitaminB3),
    ("vitamin b5", Nutrient::VitaminB5),
    ("pantothenic acid", Nutrient::VitaminB5),
    ("vitamin b6", Nutrient::VitaminB6),
    ("vitamin b12", Nutrient::VitaminB12),
    ("folate", Nutrient::Folate),
    ("folic acid", Nutrient::Folate),
    ("choline", Nutrient::Choline),
    ("omega-3", Nutrient::Omega3),
    ("omega 3", Nutrient::Omega3),
    ("omega-3 fatty acids", Nutrient::Omega3),
    ("omega-6", Nutrient::Omega6),
    ("omega 6", Nutrient::Omega6),
    ("omega-6 fatty acids", Nutrient::Omega6),
];

/// Canonical nutrient for a Spoonacular nutrient name (case-insensitive)
#[must_use]
pub fn canonical_nutrient(name: &str) -> Option<Nutrient> {
    let name = name.trim().to_lowercase();
    NUTRIENT_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == name)
        .map(|(_, nutrient)| *nutrient)
}

/// Convert `amount` in `unit` to the canonical unit of `nutrient`
///
/// Returns `None` for unit pairs with no defined conversion.
#[must_use]
pub fn convert_amount(nutrient: Nutrient, amount: f64, unit: &str) -> Option<f64> {
    let unit = unit.trim().to_lowercase();
    let target = nutrient.unit();

    if unit == "iu" {
        return match nutrient {
            Nutrient::VitaminA => Some(amount * VITAMIN_A_MCG_PER_IU),
            Nutrient::VitaminD => Some(amount * VITAMIN_D_MCG_PER_IU),
            _ => None,
        };
    }

    if target == NutrientUnit::Kcal {
        return match unit.as_str() {
            "kcal" | "cal" | "calories" => Some(amount),
            "kj" => Some(amount / KJ_PER_KCAL),
            _ => None,
        };
    }

    let source_mg = match unit.as_str() {
        "g" => amount * MILLIGRAMS_PER_GRAM,
        "mg" => amount,
        "µg" | "μg" | "mcg" | "ug" => amount / MICROGRAMS_PER_MILLIGRAM,
        _ => return None,
    };
    match target {
        NutrientUnit::Gram => Some(source_mg / MILLIGRAMS_PER_GRAM),
        NutrientUnit::Milligram => Some(source_mg),
        NutrientUnit::Microgram => Some(source_mg * MICROGRAMS_PER_MILLIGRAM),
        NutrientUnit::Kcal => None,
    }
}

/// Spoonacular nutrient entry
#[derive(Debug, Clone, Deserialize)]
pub struct SpoonacularNutrient {
    /// Display name ("Vitamin A", "Calories")
    pub name: String,
    /// Amount for the requested quantity
    pub amount: f64,
    /// Unit label ("IU", "mg", "µg", "kcal")
    #[serde(default)]
    pub unit: String,
}

/// Map Spoonacular nutrients into a canonical profile, skipping unknown names and units
#[must_use]
pub fn map_nutrients(nutrients: &[SpoonacularNutrient]) -> NutrientProfile {
    let mut profile = NutrientProfile::new();
    for entry in nutrients {
        let Some(nutrient) = canonical_nutrient(&entry.name) else {
            trace!(name = %entry.name, "unmapped Spoonacular nutrient");
            continue;
        };
        if profile.contains(nutrient) {
            continue;
        }
        match convert_amount(nutrient, entry.amount, &entry.unit) {
            Some(value) => profile.set(nutrient, value),
            None => trace!(name = %entry.name, unit = %entry.unit, "unconvertible unit"),
        }
    }
    profile
}

#[derive(Debug, Clone, Deserialize)]
struct IngredientSearchResponse {
    #[serde(default)]
    results: Vec<IngredientHit>,
}

#[derive(Debug, Clone, Deserialize)]
struct IngredientHit {
    id: u64,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct IngredientInformation {
    #[serde(default)]
    nutrition: Option<IngredientNutrition>,
}

#[derive(Debug, Clone, Deserialize)]
struct IngredientNutrition {
    #[serde(default)]
    nutrients: Vec<SpoonacularNutrient>,
}

/// Spoonacular client configuration
#[derive(Debug, Clone)]
pub struct SpoonacularClientConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Response cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Requests per minute
    pub rate_limit_per_minute: u32,
}

impl Default for SpoonacularClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_SPOONACULAR_BASE_URL.to_owned(),
            cache_ttl_secs: REMOTE_RESPONSE_TTL_SECS,
            rate_limit_per_minute: 60,
        }
    }
}

/// Spoonacular ingredient client
pub struct SpoonacularClient {
    config: SpoonacularClientConfig,
    http_client: reqwest::Client,
    per_100g_cache: TtlCache<String, Option<NutrientProfile>>,
    rate_limiter: RateLimiter,
}

impl SpoonacularClient {
    /// Create a client over a shared HTTP client
    #[must_use]
    pub fn new(config: SpoonacularClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            rate_limiter: RateLimiter::per_minute(config.rate_limit_per_minute),
            per_100g_cache: TtlCache::new(Duration::from_secs(config.cache_ttl_secs)),
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
            .query(&[("apiKey", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::external_service(SPOONACULAR_API, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                SPOONACULAR_API,
                format!("HTTP {status}: {}", response.text().await.unwrap_or_default()),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service(SPOONACULAR_API, format!("JSON parse error: {e}"))
        })
    }

    /// Per-100 g profile of the best ingredient match, or `None` when nothing matches
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails or a body cannot be decoded
    pub async fn ingredient_per_100g(&self, name: &str) -> AppResult<Option<NutrientProfile>> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return Err(AppError::invalid_input("Ingredient name cannot be empty"));
        }
        if let Some(hit) = self.per_100g_cache.get(&key).await {
            return Ok(hit);
        }

        let search_url = format!("{}/food/ingredients/search", self.config.base_url);
        let search: IngredientSearchResponse = self
            .get_json(&search_url, &[("query", key.as_str()), ("number", "1")])
            .await?;

        let Some(hit) = search.results.first() else {
            debug!(query = %key, "Spoonacular search returned nothing");
            self.per_100g_cache.insert(key, None).await;
            return Ok(None);
        };

        let info_url = format!(
            "{}/food/ingredients/{}/information",
            self.config.base_url, hit.id
        );
        let info: IngredientInformation = self
            .get_json(&info_url, &[("amount", "100"), ("unit", "g")])
            .await?;

        let profile = info
            .nutrition
            .map(|n| map_nutrients(&n.nutrients))
            .filter(|p| !p.is_empty());
        debug!(
            ingredient_id = hit.id,
            ingredient = %hit.name,
            mapped = profile.as_ref().map_or(0, NutrientProfile::len),
            "Spoonacular match"
        );
        self.per_100g_cache.insert(key, profile.clone()).await;
        Ok(profile)
    }
}

#[async_trait]
impl NutritionProvider for SpoonacularClient {
    fn source(&self) -> NutritionSource {
        NutritionSource::Spoonacular
    }

    async fn lookup(&self, name: &str, amount: f64, unit: &str) -> AppResult<Option<NutrientProfile>> {
        Ok(self
            .ingredient_per_100g(name)
            .await?
            .map(|per_100g| scale_profile(&per_100g, amount, unit)))
    }
}
