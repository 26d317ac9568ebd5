// ABOUTME: Unit conversion constants for serving-size scaling and nutrient normalization
// ABOUTME: Mass factors in grams plus IU conversions for fat-soluble vitamins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Grams per kilogram
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Grams per avoirdupois ounce
pub const GRAMS_PER_OUNCE: f64 = 28.35;

/// Grams per avoirdupois pound
pub const GRAMS_PER_POUND: f64 = 453.6;

/// Grams per milligram
pub const GRAMS_PER_MILLIGRAM: f64 = 0.001;

/// Reference mass every catalog nutrient profile is expressed against
pub const REFERENCE_GRAMS: f64 = 100.0;

/// Lower clamp applied to a requested serving before scaling
pub const MIN_SERVING_GRAMS: f64 = 10.0;

/// Upper clamp applied to a requested serving before scaling
pub const MAX_SERVING_GRAMS: f64 = 2000.0;

/// Vitamin A: micrograms RAE per international unit
pub const VITAMIN_A_MCG_PER_IU: f64 = 0.3;

/// Vitamin D: micrograms per international unit
pub const VITAMIN_D_MCG_PER_IU: f64 = 0.025;

/// Milligrams per gram
pub const MILLIGRAMS_PER_GRAM: f64 = 1000.0;

/// Micrograms per milligram
pub const MICROGRAMS_PER_MILLIGRAM: f64 = 1000.0;
