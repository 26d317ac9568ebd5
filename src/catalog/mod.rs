// ABOUTME: Local food catalog backed by SQLite
// ABOUTME: Store lifecycle, schema, read repository, and USDA bulk import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Catalog
//!
//! Immutable reference data: foods, per-100 g nutrition, servings and aliases.
//! The writable database is copied from a bundled file on first run, migrated,
//! and validated before any search is served.

/// USDA `FoodData` Central export import
pub mod import;
/// Catalog read queries and row inserts
pub mod repository;
/// Table definitions and validation
pub mod schema;
/// Background open and bounded-wait access
pub mod store;

pub use repository::{CatalogRepository, NewFood};
pub use store::{CatalogState, CatalogStore};
