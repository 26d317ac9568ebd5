// ABOUTME: Configuration module for catalog, cache, remote tiers, and search scoring
// ABOUTME: Re-exports environment configuration and the ranker's scoring tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: paths, TTLs, API keys and transport timeouts from env vars
//! - **Search**: relevance weights and declarative rule tables

/// Environment configuration
pub mod environment;
/// Search scoring configuration
pub mod search;

pub use environment::{
    AnalysisCacheConfig, CatalogConfig, FoodLabConfig, HttpClientConfig, RemoteApiConfig,
};
pub use search::{CrossCategoryRule, IngredientRule, KeywordAdjustment, ScoringConfig};
