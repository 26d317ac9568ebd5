// ABOUTME: Integration tests for the catalog store lifecycle and USDA import
// ABOUTME: Covers bundled-copy bootstrap, validation failures, import dedupe and the seeded repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use anyhow::Result;
use foodlab::catalog::import::{import_foods, read_export, write_import_metadata, UsdaDataset};
use foodlab::catalog::schema::validation_failure;
use foodlab::catalog::store::{connect, connect_in_memory};
use foodlab::catalog::{CatalogRepository, CatalogState, CatalogStore};
use foodlab::config::{CatalogConfig, ScoringConfig};
use foodlab::models::Nutrient;
use foodlab::search::CatalogSearch;
use serde_json::json;
use tempfile::TempDir;

fn catalog_config(dir: &TempDir, bundled: Option<&str>) -> CatalogConfig {
    CatalogConfig {
        path: dir.path().join("data").join("nutrition.db"),
        bundled_path: bundled.map(|name| dir.path().join(name)),
        open_timeout: Duration::from_secs(5),
    }
}

fn usda_export() -> serde_json::Value {
    json!({
        "SRLegacyFoods": [
            {
                "fdcId": 173944,
                "description": "Bananas, raw",
                "foodCategory": { "description": "Fruits and Fruit Juices" },
                "foodNutrients": [
                    { "nutrient": { "id": 1008 }, "amount": 89.0 },
                    { "nutrient": { "id": 1003 }, "amount": 1.09 },
                    { "nutrient": { "id": 1005 }, "amount": 22.84 }
                ],
                "foodPortions": [
                    { "modifier": "1 medium (7\" to 7-7/8\" long)", "gramWeight": 118.0 },
                    { "gramWeight": 150.0, "amount": 1.0, "measureUnit": { "name": "cup" } }
                ]
            },
            {
                "fdcId": 168917,
                "description": "Quinoa, cooked",
                "foodCategory": { "description": "Cereal Grains and Pasta" },
                "foodNutrients": [
                    { "nutrient": { "id": 1008 }, "amount": 120.0 },
                    { "nutrient": { "id": 1003 }, "amount": 4.4 }
                ]
            },
            {
                "fdcId": 999001,
                "description": "Water, tap",
                "foodNutrients": [
                    { "nutrient": { "id": 1003 }, "amount": 0.0 }
                ]
            },
            {
                "fdcId": 173944,
                "description": "Bananas, raw (duplicate row)",
                "foodNutrients": [
                    { "nutrient": { "id": 1008 }, "amount": 89.0 }
                ]
            }
        ]
    })
}

#[tokio::test]
async fn test_import_inserts_dedupes_and_skips() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let export_path = dir.path().join("sr_legacy.json");
    std::fs::write(&export_path, serde_json::to_vec(&usda_export())?)?;
    let pool = connect_in_memory().await?;

    let foods = read_export(&export_path, UsdaDataset::SrLegacy).await?;
    let stats = import_foods(&pool, &foods, UsdaDataset::SrLegacy).await?;

    assert_eq!(stats.read, 4);
    assert_eq!(stats.inserted, 2);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.skipped.len(), 1);
    assert!(stats.skipped[0].contains("No calorie data"));
    assert_eq!(stats.by_category.get("fruit"), Some(&1));

    assert!(validation_failure(&pool).await?.is_some());
    assert_eq!(write_import_metadata(&pool).await?, 2);
    assert!(validation_failure(&pool).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_imported_food_is_searchable_with_servings() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let export_path = dir.path().join("sr_legacy.json");
    std::fs::write(&export_path, serde_json::to_vec(&usda_export())?)?;
    let pool = connect_in_memory().await?;
    let foods = read_export(&export_path, UsdaDataset::SrLegacy).await?;
    import_foods(&pool, &foods, UsdaDataset::SrLegacy).await?;
    write_import_metadata(&pool).await?;

    let repository = CatalogRepository::new(pool.clone());
    let search = CatalogSearch::new(
        CatalogStore::from_pool(pool, Duration::from_secs(2)),
        ScoringConfig::default(),
    );
    let hits = search.search("banana", 5).await;
    let banana = &hits[0].record;
    assert_eq!(banana.name, "bananas, raw");
    assert_eq!(banana.source, "sr_legacy");

    let profile = repository.nutrient_profile(banana.id).await?.unwrap();
    assert_eq!(profile.get(Nutrient::Carbohydrates), Some(22.84));
    assert!(profile.get(Nutrient::Fat).is_none());

    let servings = repository.servings(banana.id).await?;
    assert_eq!(servings.len(), 2);
    assert_eq!(servings.iter().filter(|s| s.is_default).count(), 1);
    assert!((repository.default_serving(banana.id).await?.grams - 118.0).abs() < f64::EPSILON);

    let quinoa = &search.search("quinoa", 5).await[0].record;
    let reference = repository.default_serving(quinoa.id).await?;
    assert!((reference.grams - 100.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_bundled_catalog_is_copied_on_first_open() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    common::write_catalog_file(&dir.path().join("bundled.db"), &common::standard_foods()).await?;
    let config = catalog_config(&dir, Some("bundled.db"));

    let store = CatalogStore::open(&config);
    let repository = store.repository().await.unwrap();

    assert!(config.path.exists());
    assert_eq!(repository.food_count().await?, 6);
    assert!(matches!(store.state(), CatalogState::Ready(_)));
    Ok(())
}

#[tokio::test]
async fn test_existing_catalog_is_not_overwritten() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    common::write_catalog_file(&dir.path().join("bundled.db"), &common::standard_foods()).await?;
    let config = catalog_config(&dir, Some("bundled.db"));
    std::fs::create_dir_all(config.path.parent().unwrap())?;
    common::write_catalog_file(&config.path, &[common::food(1, "okra, raw", 60, 33.0, 1.9)])
        .await?;

    let repository = CatalogStore::open(&config).repository().await.unwrap();

    assert_eq!(repository.food_count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_unversioned_catalog_is_unavailable() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let config = catalog_config(&dir, None);

    let store = CatalogStore::open(&config);

    assert!(store.repository().await.is_none());
    match store.state() {
        CatalogState::Unavailable(reason) => assert!(reason.contains("database_version")),
        other => panic!("expected unavailable, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_is_unavailable() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let config = catalog_config(&dir, None);
    std::fs::create_dir_all(config.path.parent().unwrap())?;
    common::write_catalog_file(&config.path, &[]).await?;

    let store = CatalogStore::open(&config);

    assert!(store.repository().await.is_none());
    assert!(matches!(
        store.state(),
        CatalogState::Unavailable(reason) if reason.contains("empty")
    ));
    Ok(())
}

#[tokio::test]
async fn test_missing_bundled_catalog_is_unavailable() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let config = catalog_config(&dir, Some("does-not-exist.db"));

    let store = CatalogStore::open(&config);

    assert!(store.repository().await.is_none());
    assert!(!config.path.exists());
    Ok(())
}

#[tokio::test]
async fn test_file_catalog_round_trips_nutrients() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let path = dir.path().join("catalog.db");
    common::write_catalog_file(&path, &common::standard_foods()).await?;

    let pool = connect(&path).await?;
    let repository = CatalogRepository::new(pool);
    let food = repository.food(1).await?.unwrap();
    let profile = repository.nutrient_profile(food.id).await?.unwrap();

    assert_eq!(food.name, "bananas, raw");
    assert_eq!(profile.calories(), Some(89.0));
    assert_eq!(profile.len(), 2);
    assert!(repository.food(999).await?.is_none());
    Ok(())
}
