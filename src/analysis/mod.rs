// ABOUTME: Cache-fronted food analysis pipeline over the tiered nutrition resolver
// ABOUTME: Cache lookup, nutrition resolution, qualitative analysis, then replace-on-write caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Analysis Pipeline
//!
//! The qualitative half of an analysis (scores, benefits text) comes from an
//! external [`AnalysisService`]. Its payload is opaque here: it is stored and
//! returned, never recomputed.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use foodlab_core::errors::{AppError, AppResult};
use foodlab_core::models::{CaptureModality, FoodAnalysis, Nutrient, NutrientProfile};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::cache::{AnalysisCache, AnalysisCacheEntry, ImageFingerprint};
use crate::nutrition::TieredNutritionResolver;

/// Produces the qualitative part of an analysis
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Analyze a described food, given its resolved nutrition when known
    async fn analyze(&self, description: &str, profile: Option<&NutrientProfile>)
        -> AppResult<Value>;
}

/// Offline analysis service that summarizes the resolved macros
#[derive(Debug, Default, Clone, Copy)]
pub struct NutritionSummaryService;

#[async_trait]
impl AnalysisService for NutritionSummaryService {
    async fn analyze(
        &self,
        description: &str,
        profile: Option<&NutrientProfile>,
    ) -> AppResult<Value> {
        let Some(profile) = profile else {
            return Ok(json!({
                "description": description,
                "nutrition_known": false,
            }));
        };
        let macros: serde_json::Map<String, Value> = [
            Nutrient::Calories,
            Nutrient::Protein,
            Nutrient::Carbohydrates,
            Nutrient::Fat,
            Nutrient::Fiber,
            Nutrient::Sugar,
        ]
        .into_iter()
        .filter_map(|n| Some((n.key().to_owned(), json!(profile.get(n)?))))
        .collect();
        Ok(json!({
            "description": description,
            "nutrition_known": true,
            "macros": macros,
        }))
    }
}

/// A request to analyze one food
#[derive(Debug, Clone)]
pub struct FoodRequest {
    /// Food name or description
    pub name: String,
    /// Serving amount
    pub amount: f64,
    /// Serving unit
    pub unit: String,
    /// How the food was captured
    pub modality: CaptureModality,
    /// Image bytes for photo captures
    pub image: Option<Bytes>,
}

impl FoodRequest {
    /// Request without an image
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        modality: CaptureModality,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            modality,
            image: None,
        }
    }

    /// Attach image bytes; the request becomes an image capture
    #[must_use]
    pub fn with_image(mut self, image: impl Into<Bytes>) -> Self {
        self.image = Some(image.into());
        self.modality = CaptureModality::Image;
        self
    }
}

/// Where an analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisOrigin {
    /// Served from the analysis cache
    Cache,
    /// Computed for this request
    Fresh,
}

/// Result of [`FoodAnalysisPipeline::analyze`]
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Cached entry holding the analysis
    pub entry: AnalysisCacheEntry,
    /// Cache hit or fresh analysis
    pub origin: AnalysisOrigin,
}

/// Cache → resolver → analysis service → cache
pub struct FoodAnalysisPipeline {
    cache: Arc<AnalysisCache>,
    resolver: TieredNutritionResolver,
    analyzer: Arc<dyn AnalysisService>,
}

impl FoodAnalysisPipeline {
    /// Pipeline over injected services
    #[must_use]
    pub fn new(
        cache: Arc<AnalysisCache>,
        resolver: TieredNutritionResolver,
        analyzer: Arc<dyn AnalysisService>,
    ) -> Self {
        Self {
            cache,
            resolver,
            analyzer,
        }
    }

    /// The cache in front of the pipeline
    #[must_use]
    pub fn cache(&self) -> &Arc<AnalysisCache> {
        &self.cache
    }

    async fn cached(
        &self,
        fingerprint: Option<&ImageFingerprint>,
        request: &FoodRequest,
    ) -> Option<AnalysisCacheEntry> {
        match fingerprint {
            Some(fp) => self.cache.get_by_image(fp).await,
            None => {
                self.cache
                    .get_by_name(&request.name, Some(request.modality))
                    .await
            }
        }
    }

    /// Analyze a food, serving a cached analysis when one exists
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a blank name, or the analysis service's error
    pub async fn analyze(&self, request: FoodRequest) -> AppResult<AnalysisOutcome> {
        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("Food name cannot be empty"));
        }
        let fingerprint = request.image.as_deref().map(ImageFingerprint::of);

        if let Some(entry) = self.cached(fingerprint.as_ref(), &request).await {
            info!(cache_key = %entry.cache_key, "analysis cache hit");
            return Ok(AnalysisOutcome {
                entry,
                origin: AnalysisOrigin::Cache,
            });
        }

        let resolved = self
            .resolver
            .resolve(&request.name, request.amount, &request.unit)
            .await;
        let details = self
            .analyzer
            .analyze(&request.name, resolved.as_ref().map(|r| &r.profile))
            .await?;

        let mut analysis = FoodAnalysis::new(request.name.clone(), details);
        if let Some(resolved) = resolved {
            analysis = analysis.with_nutrition(resolved.profile, resolved.source);
        }

        let stored = match &request.image {
            Some(image) => {
                self.cache
                    .put_with_image(analysis, image, Some(request.modality))
                    .await
            }
            None => self.cache.put(analysis, None, Some(request.modality)).await,
        };

        let entry = match stored {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "analysis cached in memory only");
                self.cached(fingerprint.as_ref(), &request)
                    .await
                    .ok_or_else(|| AppError::internal("analysis vanished after caching"))?
            }
        };

        Ok(AnalysisOutcome {
            entry,
            origin: AnalysisOrigin::Fresh,
        })
    }
}
