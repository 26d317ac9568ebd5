// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for caching, search scoring, units, and environment names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Analysis cache constants (TTL, schema version, key prefixes)
pub mod cache;
/// Environment variable names and their defaults
pub mod env_config;
/// Relevance ranking weights and resolver thresholds
pub mod search;
/// Unit conversion constants for serving scaling
pub mod units;

/// Service names used in structured logging
pub mod service_names {
    /// Library / CLI service name
    pub const FOODLAB: &str = "foodlab";
    /// USDA `FoodData` Central service label
    pub const USDA_API: &str = "USDA API";
    /// Spoonacular service label
    pub const SPOONACULAR_API: &str = "Spoonacular API";
}
