// ABOUTME: Catalog search entry point combining candidate gathering with relevance ranking
// ABOUTME: Never fails: blank queries and unavailable catalogs produce empty results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalog Search & Relevance Ranking

/// Query normalization
pub mod normalize;
/// Relevance scoring
pub mod ranker;
/// Rule-table interpreter
pub mod rules;

pub use normalize::{plural_variant, NormalizedQuery};
pub use ranker::{Candidate, MatchPath, RelevanceRanker, ScoredFood};

use tracing::{debug, warn};

use crate::catalog::CatalogStore;
use crate::config::ScoringConfig;

/// Searches the local catalog and ranks what it finds
#[derive(Clone)]
pub struct CatalogSearch {
    store: CatalogStore,
    ranker: RelevanceRanker,
}

impl CatalogSearch {
    /// Search over `store` with the given weights
    #[must_use]
    pub fn new(store: CatalogStore, scoring: ScoringConfig) -> Self {
        Self {
            store,
            ranker: RelevanceRanker::new(scoring),
        }
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Scoring in use
    #[must_use]
    pub const fn scoring(&self) -> &ScoringConfig {
        self.ranker.config()
    }

    /// Rank-ordered candidates for `query`, at most `limit`
    pub async fn search(&self, query: &str, limit: usize) -> Vec<ScoredFood> {
        let Some(normalized) = NormalizedQuery::parse(query) else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }
        let Some(repository) = self.store.repository().await else {
            return Vec::new();
        };

        let candidates = match repository.find_candidates(&normalized).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query = normalized.text(), error = %e, "catalog candidate query failed");
                return Vec::new();
            }
        };

        let ranked = self.ranker.rank(&normalized, candidates, limit);
        debug!(
            query = normalized.text(),
            hits = ranked.len(),
            best_score = ranked.first().map(|hit| hit.score),
            "catalog search"
        );
        ranked
    }
}
