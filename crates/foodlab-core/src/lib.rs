// ABOUTME: Core types and constants for the FoodLab nutrition pipeline
// ABOUTME: Foundation crate with error handling, nutrient model, and domain constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FoodLab` Core
//!
//! Foundation crate providing shared types and constants for the food-identity
//! resolution and nutrition lookup pipeline. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Nutrient profiles, catalog records, servings, and cached analyses

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (nutrients, foods, servings, analyses)
pub mod models;
