// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory catalog fixtures, and stub nutrition providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::redundant_closure_for_method_calls
)]
//! Shared test utilities for `foodlab`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use foodlab::catalog::repository::insert_food;
use foodlab::catalog::schema::{set_metadata, DATABASE_VERSION_KEY};
use foodlab::catalog::store::{connect, connect_in_memory};
use foodlab::catalog::{CatalogStore, NewFood};
use foodlab::config::ScoringConfig;
use foodlab::errors::{AppError, AppResult};
use foodlab::external::NutritionProvider;
use foodlab::models::{Nutrient, NutrientProfile, NutritionSource, ServingDefinition};
use foodlab::nutrition::LocalCatalogProvider;
use foodlab::search::CatalogSearch;
use sqlx::SqlitePool;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Catalog food with the given macros per 100 g
pub fn food(fdc_id: i64, name: &str, popularity: i64, calories: f64, protein: f64) -> NewFood {
    NewFood {
        fdc_id,
        name: name.to_owned(),
        description: name.to_owned(),
        category: "other".to_owned(),
        source: "test".to_owned(),
        popularity,
        nutrients: NutrientProfile::new()
            .with(Nutrient::Calories, calories)
            .with(Nutrient::Protein, protein),
        servings: vec![ServingDefinition::reference()],
        aliases: Vec::new(),
    }
}

/// Same food with extra aliases
pub fn with_aliases(mut food: NewFood, aliases: &[&str]) -> NewFood {
    food.aliases = aliases.iter().map(|a| (*a).to_owned()).collect();
    food
}

/// Same food with a default serving of `grams`
pub fn with_default_serving(mut food: NewFood, description: &str, grams: f64) -> NewFood {
    food.servings = vec![ServingDefinition {
        description: description.to_owned(),
        grams,
        is_default: true,
    }];
    food
}

/// The fruit and grain fixture used across search and resolver tests
pub fn standard_foods() -> Vec<NewFood> {
    vec![
        food(1001, "bananas, raw", 80, 89.0, 1.1),
        food(1002, "banana bread", 40, 326.0, 4.3),
        food(1003, "quinoa, cooked", 60, 120.0, 4.4),
        food(1004, "pineapple pie", 0, 260.0, 2.0),
        with_aliases(food(1005, "zucchini, raw", 60, 17.0, 1.2), &["courgette"]),
        with_default_serving(food(1006, "apples, raw", 100, 52.0, 0.3), "1 medium", 182.0),
    ]
}

/// Write `foods` plus the version marker into `pool`
pub async fn seed_pool(pool: &SqlitePool, foods: &[NewFood]) -> Result<()> {
    {
        let mut conn = pool.acquire().await?;
        for food in foods {
            insert_food(&mut conn, food).await?;
        }
    }
    set_metadata(pool, DATABASE_VERSION_KEY, "1.0").await?;
    Ok(())
}

/// Ready in-memory catalog holding `foods`
pub async fn catalog_with(foods: &[NewFood]) -> Result<CatalogStore> {
    init_test_logging();
    let pool = connect_in_memory().await?;
    seed_pool(&pool, foods).await?;
    Ok(CatalogStore::from_pool(pool, Duration::from_secs(2)))
}

/// Ready in-memory catalog holding [`standard_foods`]
pub async fn standard_catalog() -> Result<CatalogStore> {
    catalog_with(&standard_foods()).await
}

/// Search over the standard catalog with default weights
pub async fn standard_search() -> Result<CatalogSearch> {
    Ok(CatalogSearch::new(
        standard_catalog().await?,
        ScoringConfig::default(),
    ))
}

/// Local tier over the standard catalog
pub async fn standard_local_provider() -> Result<LocalCatalogProvider> {
    Ok(LocalCatalogProvider::new(standard_search().await?))
}

/// Catalog file at `path` holding `foods` (closed before returning)
pub async fn write_catalog_file(path: &Path, foods: &[NewFood]) -> Result<()> {
    let pool = connect(path).await?;
    seed_pool(&pool, foods).await?;
    pool.close().await;
    Ok(())
}

/// Scripted answer for a [`StubProvider`]
#[derive(Clone)]
pub enum StubReply {
    /// Return this per-portion profile
    Profile(NutrientProfile),
    /// Return no result
    Empty,
    /// Fail with an external-service error
    Fail,
}

/// Nutrition provider that counts calls and returns a scripted reply
pub struct StubProvider {
    source: NutritionSource,
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(source: NutritionSource, reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            source,
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NutritionProvider for StubProvider {
    fn source(&self) -> NutritionSource {
        self.source
    }

    async fn lookup(
        &self,
        _name: &str,
        _amount: f64,
        _unit: &str,
    ) -> AppResult<Option<NutrientProfile>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Profile(profile) => Ok(Some(profile.clone())),
            StubReply::Empty => Ok(None),
            StubReply::Fail => Err(AppError::external_service(
                self.source.as_str(),
                "connection refused",
            )),
        }
    }
}

/// Profile with only calories set
pub fn kcal(value: f64) -> NutrientProfile {
    NutrientProfile::new().with(Nutrient::Calories, value)
}

/// Approximate float comparison
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
