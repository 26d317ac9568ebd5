// ABOUTME: Unit tests for environment-driven FoodLab configuration
// ABOUTME: Validates defaults, overrides, tier enablement and rejection of bad values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::Path;

use foodlab::config::{FoodLabConfig, ScoringConfig};
use foodlab::errors::ErrorCode;
use serial_test::serial;

const VARS: &[&str] = &[
    "FOODLAB_DATA_DIR",
    "FOODLAB_CATALOG_PATH",
    "FOODLAB_BUNDLED_CATALOG",
    "FOODLAB_CATALOG_OPEN_TIMEOUT_SECS",
    "FOODLAB_CACHE_PATH",
    "FOODLAB_BLOB_DIR",
    "FOODLAB_CACHE_TTL_DAYS",
    "FOODLAB_LOCAL_MATCH_THRESHOLD",
    "USDA_API_KEY",
    "USDA_API_BASE_URL",
    "SPOONACULAR_API_KEY",
    "SPOONACULAR_API_BASE_URL",
    "HTTP_TIMEOUT_SECS",
    "HTTP_CONNECT_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_derive_from_data_dir() {
    clear_env();
    env::set_var("FOODLAB_DATA_DIR", "/tmp/foodlab-test");

    let config = FoodLabConfig::from_env().unwrap();

    assert_eq!(config.catalog.path, Path::new("/tmp/foodlab-test/nutrition.db"));
    assert_eq!(
        config.cache.snapshot_path,
        Path::new("/tmp/foodlab-test/analysis_cache.json")
    );
    assert_eq!(config.cache.blob_dir, Path::new("/tmp/foodlab-test/images"));
    assert_eq!(config.cache.ttl.num_days(), 30);
    assert!(config.catalog.bundled_path.is_none());
    assert_eq!(config.scoring.local_match_threshold, 50);
    assert!(!config.usda.is_enabled());
    assert!(!config.spoonacular.is_enabled());
    clear_env();
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("FOODLAB_DATA_DIR", "/tmp/foodlab-test");
    env::set_var("FOODLAB_CATALOG_PATH", "/srv/catalog.db");
    env::set_var("FOODLAB_BUNDLED_CATALOG", "/opt/foodlab/nutrition.db");
    env::set_var("FOODLAB_CACHE_TTL_DAYS", "7");
    env::set_var("FOODLAB_LOCAL_MATCH_THRESHOLD", "250");
    env::set_var("USDA_API_KEY", "usda-key");
    env::set_var("SPOONACULAR_API_KEY", "");
    env::set_var("HTTP_TIMEOUT_SECS", "5");

    let config = FoodLabConfig::from_env().unwrap();

    assert_eq!(config.catalog.path, Path::new("/srv/catalog.db"));
    assert_eq!(
        config.catalog.bundled_path.as_deref(),
        Some(Path::new("/opt/foodlab/nutrition.db"))
    );
    assert_eq!(config.cache.ttl.num_days(), 7);
    assert_eq!(config.scoring.local_match_threshold, 250);
    assert!(config.usda.is_enabled());
    assert!(!config.spoonacular.is_enabled());
    assert_eq!(config.http.timeout_secs, 5);

    let summary = config.summary();
    assert!(summary.contains("USDA tier: Enabled"));
    assert!(!summary.contains("usda-key"));
    clear_env();
}

#[test]
#[serial]
fn test_invalid_numbers_are_rejected() {
    clear_env();
    env::set_var("FOODLAB_LOCAL_MATCH_THRESHOLD", "high");

    let err = FoodLabConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    clear_env();
}

#[test]
#[serial]
fn test_non_positive_ttl_is_rejected() {
    clear_env();
    env::set_var("FOODLAB_CACHE_TTL_DAYS", "0");

    assert!(FoodLabConfig::from_env().is_err());
    clear_env();
}

#[test]
fn test_local_only_has_no_remote_tiers() {
    let config = FoodLabConfig::local_only(Path::new("/tmp/foodlab-local"));

    assert!(!config.usda.is_enabled());
    assert!(!config.spoonacular.is_enabled());
    assert_eq!(config.catalog.path, Path::new("/tmp/foodlab-local/nutrition.db"));
    assert_eq!(
        config.scoring.local_match_threshold,
        ScoringConfig::default().local_match_threshold
    );
}
