// ABOUTME: Environment variable names and defaults for FoodLab configuration
// ABOUTME: Single source of truth for every knob read by FoodLabConfig::from_env
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Root directory for catalog, cache snapshot, and image blobs
pub const DATA_DIR: &str = "FOODLAB_DATA_DIR";
/// Writable catalog database path
pub const CATALOG_PATH: &str = "FOODLAB_CATALOG_PATH";
/// Read-only bundled catalog copied on first run
pub const BUNDLED_CATALOG: &str = "FOODLAB_BUNDLED_CATALOG";
/// Bounded wait for catalog readiness
pub const CATALOG_OPEN_TIMEOUT_SECS: &str = "FOODLAB_CATALOG_OPEN_TIMEOUT_SECS";
/// Analysis cache snapshot file
pub const CACHE_PATH: &str = "FOODLAB_CACHE_PATH";
/// Image blob directory
pub const BLOB_DIR: &str = "FOODLAB_BLOB_DIR";
/// Analysis cache expiry in days
pub const CACHE_TTL_DAYS: &str = "FOODLAB_CACHE_TTL_DAYS";
/// Local tier confidence threshold
pub const LOCAL_MATCH_THRESHOLD: &str = "FOODLAB_LOCAL_MATCH_THRESHOLD";
/// USDA `FoodData` Central API key
pub const USDA_API_KEY: &str = "USDA_API_KEY";
/// USDA `FoodData` Central base URL
pub const USDA_API_BASE_URL: &str = "USDA_API_BASE_URL";
/// Spoonacular API key
pub const SPOONACULAR_API_KEY: &str = "SPOONACULAR_API_KEY";
/// Spoonacular base URL
pub const SPOONACULAR_API_BASE_URL: &str = "SPOONACULAR_API_BASE_URL";
/// Remote request timeout
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
/// Remote connect timeout
pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";

/// Default USDA base URL
pub const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
/// Default Spoonacular base URL
pub const DEFAULT_SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
/// Default data directory name under the platform data dir
pub const DEFAULT_DATA_DIR_NAME: &str = "foodlab";
/// Default catalog file name
pub const DEFAULT_CATALOG_FILE_NAME: &str = "nutrition.db";
/// Default remote request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// Default remote connect timeout in seconds
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
