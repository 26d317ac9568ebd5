// ABOUTME: Local catalog nutrition tier: search, confidence gate, serving conversion, scaling
// ABOUTME: Mediocre matches are rejected so the resolver falls through to remote sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use foodlab_core::constants::search::LOCAL_SEARCH_LIMIT;
use foodlab_core::errors::AppResult;
use foodlab_core::models::{NutrientProfile, NutritionSource};
use tracing::{debug, info};

use super::scaler::scale_profile;
use crate::external::NutritionProvider;
use crate::search::{CatalogSearch, ScoredFood};

/// Outcome of a local catalog lookup
#[derive(Debug, Clone)]
pub enum LocalMatch {
    /// Best candidate cleared the threshold
    Accepted {
        /// Winning candidate
        food: ScoredFood,
        /// Profile scaled to the requested amount
        profile: NutrientProfile,
    },
    /// Candidates exist but the best one scored under the threshold
    BelowConfidence {
        /// Best score seen
        best_score: i64,
    },
    /// No candidate, or the winner has no nutrition row
    NotFound,
    /// Catalog failed to open or validate
    StoreUnavailable,
}

fn is_serving_unit(unit: &str) -> bool {
    matches!(
        unit.trim().to_lowercase().as_str(),
        "serving" | "servings" | "portion" | "portions"
    )
}

/// First nutrition tier, backed by the local catalog
#[derive(Clone)]
pub struct LocalCatalogProvider {
    search: CatalogSearch,
}

impl LocalCatalogProvider {
    /// Tier over a catalog search
    #[must_use]
    pub fn new(search: CatalogSearch) -> Self {
        Self { search }
    }

    /// Threshold in effect
    #[must_use]
    pub fn threshold(&self) -> i64 {
        self.search.scoring().local_match_threshold
    }

    /// Look up `amount` of `unit` of `name`, reporting why nothing was accepted
    ///
    /// # Errors
    ///
    /// Returns a database error if the nutrition or serving rows cannot be read
    pub async fn find(&self, name: &str, amount: f64, unit: &str) -> AppResult<LocalMatch> {
        let Some(repository) = self.search.store().repository().await else {
            return Ok(LocalMatch::StoreUnavailable);
        };

        let hits = self.search.search(name, LOCAL_SEARCH_LIMIT).await;
        let Some(best) = hits.into_iter().next() else {
            return Ok(LocalMatch::NotFound);
        };

        let threshold = self.threshold();
        if best.score < threshold {
            debug!(
                query = name,
                food = %best.record.name,
                score = best.score,
                threshold,
                "local match below confidence"
            );
            return Ok(LocalMatch::BelowConfidence {
                best_score: best.score,
            });
        }

        let Some(per_100g) = repository.nutrient_profile(best.record.id).await? else {
            debug!(food_id = best.record.id, "local match has no nutrition row");
            return Ok(LocalMatch::NotFound);
        };

        let profile = if is_serving_unit(unit) {
            let serving = repository.default_serving(best.record.id).await?;
            scale_profile(&per_100g, amount * serving.grams, "g")
        } else {
            scale_profile(&per_100g, amount, unit)
        };

        info!(
            query = name,
            food = %best.record.name,
            score = best.score,
            "local catalog match accepted"
        );
        Ok(LocalMatch::Accepted {
            food: best,
            profile,
        })
    }
}

#[async_trait]
impl NutritionProvider for LocalCatalogProvider {
    fn source(&self) -> NutritionSource {
        NutritionSource::LocalCatalog
    }

    async fn lookup(&self, name: &str, amount: f64, unit: &str) -> AppResult<Option<NutrientProfile>> {
        Ok(match self.find(name, amount, unit).await? {
            LocalMatch::Accepted { profile, .. } => Some(profile),
            LocalMatch::BelowConfidence { .. } | LocalMatch::NotFound => None,
            LocalMatch::StoreUnavailable => {
                debug!("local catalog unavailable, skipping tier");
                None
            }
        })
    }
}
