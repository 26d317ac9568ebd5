// ABOUTME: Cached analysis payload, capture modality, and nutrition provenance
// ABOUTME: The qualitative part of an analysis is opaque JSON and is never recomputed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::nutrients::NutrientProfile;

/// How the food subject was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureModality {
    /// Photographed
    Image,
    /// Dictated
    Spoken,
    /// Typed by hand
    Typed,
}

impl CaptureModality {
    /// Stable lowercase label used in cache identities
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Spoken => "spoken",
            Self::Typed => "typed",
        }
    }

    /// Parse a lowercase label
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "image" | "photo" => Some(Self::Image),
            "spoken" | "voice" | "speech" => Some(Self::Spoken),
            "typed" | "text" => Some(Self::Typed),
            _ => None,
        }
    }
}

impl fmt::Display for CaptureModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tier produced a nutrient profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionSource {
    /// Bundled local catalog
    LocalCatalog,
    /// USDA `FoodData` Central
    Usda,
    /// Spoonacular ingredient database
    Spoonacular,
    /// Estimated by the qualitative analysis service
    AiEstimate,
}

impl NutritionSource {
    /// Tier label for logs and CLI output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalCatalog => "local",
            Self::Usda => "usda",
            Self::Spoonacular => "spoonacular",
            Self::AiEstimate => "ai_estimate",
        }
    }
}

impl fmt::Display for NutritionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete analysis of one food subject: numeric nutrition plus opaque details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    /// Subject name as identified upstream
    pub food_name: String,
    /// Nutrition for the requested serving, absent when every tier missed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutrientProfile>,
    /// Tier that supplied `nutrition`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_source: Option<NutritionSource>,
    /// Qualitative payload (scores, benefits text) produced externally
    #[serde(default)]
    pub details: serde_json::Value,
}

impl FoodAnalysis {
    /// Analysis carrying only a name and qualitative details
    pub fn new(food_name: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            food_name: food_name.into(),
            nutrition: None,
            nutrition_source: None,
            details,
        }
    }

    /// Attach a resolved nutrient profile and its tier
    #[must_use]
    pub fn with_nutrition(mut self, profile: NutrientProfile, source: NutritionSource) -> Self {
        self.nutrition = Some(profile);
        self.nutrition_source = Some(source);
        self
    }
}
