// ABOUTME: Environment configuration for catalog, cache, remote tiers, and HTTP transport
// ABOUTME: Environment-only configuration; every knob has a default so nothing is mandatory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use chrono::TimeDelta;
use foodlab_core::constants::{cache, env_config, search};
use foodlab_core::errors::{AppError, AppResult};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use super::search::ScoringConfig;

/// Local catalog store configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Writable catalog database path
    pub path: PathBuf,
    /// Read-only bundled catalog copied into `path` on first run
    pub bundled_path: Option<PathBuf>,
    /// Bounded wait for the store to finish opening
    pub open_timeout: Duration,
}

/// Analysis cache configuration
#[derive(Debug, Clone)]
pub struct AnalysisCacheConfig {
    /// Snapshot file holding every entry
    pub snapshot_path: PathBuf,
    /// Content-addressed image blob directory
    pub blob_dir: PathBuf,
    /// Age past which an entry is stale
    pub ttl: TimeDelta,
}

impl AnalysisCacheConfig {
    /// Cache rooted at `dir` with the default TTL
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            snapshot_path: dir.join(cache::SNAPSHOT_FILE_NAME),
            blob_dir: dir.join(cache::BLOB_DIR_NAME),
            ttl: TimeDelta::days(cache::ANALYSIS_TTL_DAYS),
        }
    }
}

/// Credentials and endpoint for one remote nutrition source
#[derive(Debug, Clone)]
pub struct RemoteApiConfig {
    /// API key; the tier is disabled when absent
    pub api_key: Option<String>,
    /// Base URL
    pub base_url: String,
}

impl RemoteApiConfig {
    /// Whether the tier can be constructed
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Transport timeouts shared by all remote tiers
#[derive(Debug, Clone, Copy)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: env_config::DEFAULT_HTTP_TIMEOUT_SECS,
            connect_timeout_secs: env_config::DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete configuration for the nutrition pipeline
#[derive(Debug, Clone)]
pub struct FoodLabConfig {
    /// Root data directory
    pub data_dir: PathBuf,
    /// Local catalog store
    pub catalog: CatalogConfig,
    /// Analysis cache
    pub cache: AnalysisCacheConfig,
    /// Remote-A: USDA `FoodData` Central
    pub usda: RemoteApiConfig,
    /// Remote-B: Spoonacular
    pub spoonacular: RemoteApiConfig,
    /// Transport timeouts
    pub http: HttpClientConfig,
    /// Relevance ranking weights and the local confidence threshold
    pub scoring: ScoringConfig,
}

impl FoodLabConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a numeric variable cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let data_dir = env::var(env_config::DATA_DIR)
            .map_or_else(|_| default_data_dir(), PathBuf::from);

        let catalog = CatalogConfig {
            path: env_path(env_config::CATALOG_PATH)
                .unwrap_or_else(|| data_dir.join(env_config::DEFAULT_CATALOG_FILE_NAME)),
            bundled_path: env_path(env_config::BUNDLED_CATALOG),
            open_timeout: Duration::from_secs(parse_env_or(
                env_config::CATALOG_OPEN_TIMEOUT_SECS,
                search::CATALOG_OPEN_TIMEOUT_SECS,
            )?),
        };

        let ttl_days: i64 = parse_env_or(env_config::CACHE_TTL_DAYS, cache::ANALYSIS_TTL_DAYS)?;
        if ttl_days <= 0 {
            return Err(AppError::config(format!(
                "{} must be positive, got {ttl_days}",
                env_config::CACHE_TTL_DAYS
            )));
        }
        let cache = AnalysisCacheConfig {
            snapshot_path: env_path(env_config::CACHE_PATH)
                .unwrap_or_else(|| data_dir.join(cache::SNAPSHOT_FILE_NAME)),
            blob_dir: env_path(env_config::BLOB_DIR)
                .unwrap_or_else(|| data_dir.join(cache::BLOB_DIR_NAME)),
            ttl: TimeDelta::days(ttl_days),
        };

        let usda = RemoteApiConfig {
            api_key: env::var(env_config::USDA_API_KEY).ok(),
            base_url: env::var(env_config::USDA_API_BASE_URL)
                .unwrap_or_else(|_| env_config::DEFAULT_USDA_BASE_URL.to_owned()),
        };
        let spoonacular = RemoteApiConfig {
            api_key: env::var(env_config::SPOONACULAR_API_KEY).ok(),
            base_url: env::var(env_config::SPOONACULAR_API_BASE_URL)
                .unwrap_or_else(|_| env_config::DEFAULT_SPOONACULAR_BASE_URL.to_owned()),
        };

        let http = HttpClientConfig {
            timeout_secs: parse_env_or(
                env_config::HTTP_TIMEOUT_SECS,
                env_config::DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_env_or(
                env_config::HTTP_CONNECT_TIMEOUT_SECS,
                env_config::DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
            )?,
        };

        let scoring = ScoringConfig {
            local_match_threshold: parse_env_or(
                env_config::LOCAL_MATCH_THRESHOLD,
                search::LOCAL_MATCH_THRESHOLD,
            )?,
            ..ScoringConfig::default()
        };

        let config = Self {
            data_dir,
            catalog,
            cache,
            usda,
            spoonacular,
            http,
            scoring,
        };
        config.warn_on_disabled_tiers();
        Ok(config)
    }

    /// Configuration rooted at `dir` with remote tiers disabled
    ///
    /// Used by tests and by the CLI when it only inspects local state.
    #[must_use]
    pub fn local_only(dir: &Path) -> Self {
        Self {
            data_dir: dir.to_path_buf(),
            catalog: CatalogConfig {
                path: dir.join(env_config::DEFAULT_CATALOG_FILE_NAME),
                bundled_path: None,
                open_timeout: Duration::from_secs(search::CATALOG_OPEN_TIMEOUT_SECS),
            },
            cache: AnalysisCacheConfig::in_dir(dir),
            usda: RemoteApiConfig {
                api_key: None,
                base_url: env_config::DEFAULT_USDA_BASE_URL.to_owned(),
            },
            spoonacular: RemoteApiConfig {
                api_key: None,
                base_url: env_config::DEFAULT_SPOONACULAR_BASE_URL.to_owned(),
            },
            http: HttpClientConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }

    fn warn_on_disabled_tiers(&self) {
        if !self.usda.is_enabled() {
            warn!(
                "{} not set; USDA tier disabled",
                env_config::USDA_API_KEY
            );
        }
        if !self.spoonacular.is_enabled() {
            warn!(
                "{} not set; Spoonacular tier disabled",
                env_config::SPOONACULAR_API_KEY
            );
        }
    }

    /// Human-readable configuration summary (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FoodLab Configuration:\n\
             - Data dir: {}\n\
             - Catalog: {}\n\
             - Bundled catalog: {}\n\
             - Cache snapshot: {}\n\
             - Cache TTL: {} days\n\
             - Local match threshold: {}\n\
             - USDA tier: {}\n\
             - Spoonacular tier: {}",
            self.data_dir.display(),
            self.catalog.path.display(),
            self.catalog
                .bundled_path
                .as_ref()
                .map_or_else(|| "none".to_owned(), |p| p.display().to_string()),
            self.cache.snapshot_path.display(),
            self.cache.ttl.num_days(),
            self.scoring.local_match_threshold,
            if self.usda.is_enabled() { "Enabled" } else { "Disabled" },
            if self.spoonacular.is_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
        )
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env_config::DEFAULT_DATA_DIR_NAME)
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| {
            AppError::new(
                foodlab_core::errors::ErrorCode::ConfigInvalid,
                format!("{key}='{raw}' is invalid: {e}"),
            )
        }),
        _ => Ok(default),
    }
}
