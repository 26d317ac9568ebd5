// ABOUTME: Main library entry point for FoodLab food identity resolution and nutrition lookup
// ABOUTME: Catalog search, tiered nutrition resolution, and the content-addressed analysis cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FoodLab`
//!
//! Resolves a food described by text or image into numeric nutrition and
//! caches the full analysis.
//!
//! ## Architecture
//!
//! - **Search**: ranks local catalog candidates for a free-text query
//! - **Nutrition**: scales per-100 g profiles and falls back Local → USDA → Spoonacular
//! - **Cache**: one analysis per image fingerprint or (name, modality), 30-day expiry
//! - **Analysis**: cache-fronted pipeline that calls the qualitative analysis service
//! - **Resources**: composition root wiring the above from environment configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use foodlab::config::FoodLabConfig;
//! use foodlab::resources::FoodLabResources;
//!
//! #[tokio::main]
//! async fn main() -> foodlab::errors::AppResult<()> {
//!     let config = FoodLabConfig::from_env()?;
//!     let resources = FoodLabResources::build(config).await;
//!
//!     if let Some(resolved) = resources.resolver.resolve("quinoa", 150.0, "g").await {
//!         println!("{} kcal from {}", resolved.profile.calories().unwrap_or(0.0), resolved.source);
//!     }
//!     Ok(())
//! }
//! ```

/// Cache-fronted analysis pipeline
pub mod analysis;
/// Analysis cache
pub mod cache;
/// Local food catalog
pub mod catalog;
/// Configuration
pub mod config;
/// Error types
pub mod errors;
/// Remote nutrition providers
pub mod external;
/// Logging setup
pub mod logging;
/// Scaling, local tier, and resolver
pub mod nutrition;
/// Composition root
pub mod resources;
/// Catalog search and ranking
pub mod search;

pub use foodlab_core::models;
