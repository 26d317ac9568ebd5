// ABOUTME: Tiered nutrition resolver trying each provider once, strictly in order
// ABOUTME: Provider failures are logged and skipped; exhaustion yields no result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use foodlab_core::models::{NutrientProfile, NutritionSource};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::external::NutritionProvider;

/// A profile and the tier that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNutrition {
    /// Profile scaled to the requested amount
    pub profile: NutrientProfile,
    /// Producing tier
    pub source: NutritionSource,
}

/// Ordered fallback chain of nutrition providers
#[derive(Clone, Default)]
pub struct TieredNutritionResolver {
    tiers: Vec<Arc<dyn NutritionProvider>>,
}

impl TieredNutritionResolver {
    /// Resolver over `tiers`, tried first to last
    #[must_use]
    pub fn new(tiers: Vec<Arc<dyn NutritionProvider>>) -> Self {
        Self { tiers }
    }

    /// Configured tier sources in order
    #[must_use]
    pub fn sources(&self) -> Vec<NutritionSource> {
        self.tiers.iter().map(|tier| tier.source()).collect()
    }

    /// First acceptable profile for `amount` of `unit` of `name`
    ///
    /// `None` means every tier came up empty and the caller should estimate.
    pub async fn resolve(&self, name: &str, amount: f64, unit: &str) -> Option<ResolvedNutrition> {
        if name.trim().is_empty() {
            return None;
        }

        for tier in &self.tiers {
            let source = tier.source();
            match tier.lookup(name, amount, unit).await {
                Ok(Some(profile)) if !profile.is_empty() => {
                    info!(tier = source.as_str(), query = name, "nutrition resolved");
                    return Some(ResolvedNutrition { profile, source });
                }
                Ok(_) => {
                    debug!(tier = source.as_str(), query = name, "tier had no result");
                }
                Err(e) => {
                    warn!(
                        tier = source.as_str(),
                        query = name,
                        error = %e,
                        "tier lookup failed, falling through"
                    );
                }
            }
        }

        info!(query = name, "all nutrition tiers exhausted");
        None
    }
}
