// ABOUTME: Nutrition lookup: serving scaler, local catalog tier, and tiered resolver
// ABOUTME: Local first, then remote tiers; the first acceptable profile wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Local catalog tier
pub mod local;
/// Ordered tier fallback
pub mod resolver;
/// Per-100 g to serving scaling
pub mod scaler;

pub use local::{LocalCatalogProvider, LocalMatch};
pub use resolver::{ResolvedNutrition, TieredNutritionResolver};
pub use scaler::{scale_profile, to_clamped_grams, MassUnit};
