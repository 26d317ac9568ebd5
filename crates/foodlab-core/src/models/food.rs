// ABOUTME: Catalog food records and named serving definitions
// ABOUTME: Enforces the one-default-serving invariant when servings are loaded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::units::REFERENCE_GRAMS;

/// A food in the local catalog (immutable reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Catalog row id
    pub id: i64,
    /// Upstream catalog id (USDA FDC id)
    pub fdc_id: i64,
    /// Canonical (cleaned, lowercase) name
    pub name: String,
    /// Original free-text description
    pub description: String,
    /// Simplified category (fruit, vegetable, grain, ...)
    pub category: String,
    /// Source dataset tag (`sr_legacy`, `foundation`, ...)
    pub source: String,
    /// Popularity weight, the starting point of relevance scoring
    pub popularity: i64,
}

/// A named portion of a food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingDefinition {
    /// Human label ("1 cup", "1 medium")
    pub description: String,
    /// Gram weight of the portion
    pub grams: f64,
    /// Whether this is the food's default portion
    pub is_default: bool,
}

impl ServingDefinition {
    /// The fallback serving used when a food has no portion data
    #[must_use]
    pub fn reference() -> Self {
        Self {
            description: "100 g".to_owned(),
            grams: REFERENCE_GRAMS,
            is_default: true,
        }
    }
}

/// Ensure a food's servings satisfy the catalog invariant
///
/// The result has at least one entry and exactly one default. When nothing is
/// flagged the lightest portion becomes default; when several are flagged only
/// the first keeps the flag.
#[must_use]
pub fn normalize_servings(mut servings: Vec<ServingDefinition>) -> Vec<ServingDefinition> {
    servings.retain(|s| s.grams.is_finite() && s.grams > 0.0);
    if servings.is_empty() {
        return vec![ServingDefinition::reference()];
    }

    let default_index = servings.iter().position(|s| s.is_default).unwrap_or_else(|| {
        servings
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.grams.total_cmp(&b.grams))
            .map_or(0, |(i, _)| i)
    });

    for (i, serving) in servings.iter_mut().enumerate() {
        serving.is_default = i == default_index;
    }
    servings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serving(description: &str, grams: f64, is_default: bool) -> ServingDefinition {
        ServingDefinition {
            description: description.to_owned(),
            grams,
            is_default,
        }
    }

    #[test]
    fn test_empty_servings_get_reference_default() {
        let servings = normalize_servings(Vec::new());
        assert_eq!(servings, vec![ServingDefinition::reference()]);
    }

    #[test]
    fn test_lightest_serving_becomes_default_when_none_flagged() {
        let servings = normalize_servings(vec![
            serving("1 cup", 185.0, false),
            serving("1 tbsp", 12.0, false),
            serving("1 oz", 28.0, false),
        ]);
        let defaults: Vec<_> = servings.iter().filter(|s| s.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].description, "1 tbsp");
    }

    #[test]
    fn test_only_first_flagged_default_survives() {
        let servings = normalize_servings(vec![
            serving("1 cup", 185.0, true),
            serving("1 tbsp", 12.0, true),
        ]);
        assert!(servings[0].is_default);
        assert!(!servings[1].is_default);
    }

    #[test]
    fn test_zero_gram_portions_are_dropped() {
        let servings = normalize_servings(vec![serving("pinch", 0.0, true)]);
        assert_eq!(servings, vec![ServingDefinition::reference()]);
    }
}
