// ABOUTME: Composition root building every service from configuration
// ABOUTME: Owns the catalog, resolver tiers, analysis cache and pipeline; nothing is global
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::info;

use crate::analysis::{AnalysisService, FoodAnalysisPipeline};
use crate::cache::AnalysisCache;
use crate::catalog::CatalogStore;
use crate::config::FoodLabConfig;
use crate::external::{
    build_http_client, NutritionProvider, SpoonacularClient, SpoonacularClientConfig, UsdaClient,
    UsdaClientConfig,
};
use crate::nutrition::{LocalCatalogProvider, TieredNutritionResolver};
use crate::search::CatalogSearch;

/// Every long-lived service, constructed once and shared by reference
pub struct FoodLabResources {
    /// Configuration the services were built from
    pub config: FoodLabConfig,
    /// Local catalog search
    pub search: CatalogSearch,
    /// Local catalog tier
    pub local: LocalCatalogProvider,
    /// Ordered tiers
    pub resolver: TieredNutritionResolver,
    /// Analysis cache
    pub cache: Arc<AnalysisCache>,
}

impl FoodLabResources {
    /// Build services; remote tiers are included only when their API keys are set
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn build(config: FoodLabConfig) -> Self {
        let store = CatalogStore::open(&config.catalog);
        let search = CatalogSearch::new(store, config.scoring.clone());
        let local = LocalCatalogProvider::new(search.clone());

        let mut tiers: Vec<Arc<dyn NutritionProvider>> = vec![Arc::new(local.clone())];
        if config.usda.is_enabled() || config.spoonacular.is_enabled() {
            let http_client = build_http_client(config.http);
            if let Some(api_key) = config.usda.api_key.clone().filter(|_| config.usda.is_enabled()) {
                tiers.push(Arc::new(UsdaClient::new(
                    UsdaClientConfig {
                        api_key,
                        base_url: config.usda.base_url.clone(),
                        ..UsdaClientConfig::default()
                    },
                    http_client.clone(),
                )));
            }
            if let Some(api_key) = config
                .spoonacular
                .api_key
                .clone()
                .filter(|_| config.spoonacular.is_enabled())
            {
                tiers.push(Arc::new(SpoonacularClient::new(
                    SpoonacularClientConfig {
                        api_key,
                        base_url: config.spoonacular.base_url.clone(),
                        ..SpoonacularClientConfig::default()
                    },
                    http_client,
                )));
            }
        }
        let resolver = TieredNutritionResolver::new(tiers);
        info!(tiers = ?resolver.sources(), "nutrition resolver ready");

        let cache = Arc::new(AnalysisCache::open(&config.cache).await);

        Self {
            config,
            search,
            local,
            resolver,
            cache,
        }
    }

    /// Analysis pipeline using `analyzer` for the qualitative half
    #[must_use]
    pub fn pipeline(&self, analyzer: Arc<dyn AnalysisService>) -> FoodAnalysisPipeline {
        FoodAnalysisPipeline::new(Arc::clone(&self.cache), self.resolver.clone(), analyzer)
    }
}
