// ABOUTME: Nutrient scaler converting per-100 g profiles to a requested amount and unit
// ABOUTME: Fixed mass-unit table, clamped gram range, linear scaling that keeps absent values absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodlab_core::constants::units::{
    GRAMS_PER_KILOGRAM, GRAMS_PER_MILLIGRAM, GRAMS_PER_OUNCE, GRAMS_PER_POUND, MAX_SERVING_GRAMS,
    MIN_SERVING_GRAMS, REFERENCE_GRAMS,
};
use foodlab_core::models::NutrientProfile;

/// Mass units understood by the scaler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MassUnit {
    /// Kilograms
    Kilogram,
    /// Grams (also the fallback for unknown units)
    Gram,
    /// Avoirdupois ounces
    Ounce,
    /// Pounds
    Pound,
    /// Milligrams
    Milligram,
}

impl MassUnit {
    /// Parse a unit label; unrecognized labels fall back to grams
    #[must_use]
    pub fn parse(unit: &str) -> Self {
        match unit.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Self::Kilogram,
            "oz" | "ounce" | "ounces" => Self::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => Self::Pound,
            "mg" | "milligram" | "milligrams" => Self::Milligram,
            _ => Self::Gram,
        }
    }

    /// Grams in one unit
    #[must_use]
    pub const fn grams(self) -> f64 {
        match self {
            Self::Kilogram => GRAMS_PER_KILOGRAM,
            Self::Gram => 1.0,
            Self::Ounce => GRAMS_PER_OUNCE,
            Self::Pound => GRAMS_PER_POUND,
            Self::Milligram => GRAMS_PER_MILLIGRAM,
        }
    }
}

/// Convert `amount` of `unit` to grams, clamped to the supported serving range
#[must_use]
pub fn to_clamped_grams(amount: f64, unit: &str) -> f64 {
    let grams = amount * MassUnit::parse(unit).grams();
    if grams.is_nan() {
        return MIN_SERVING_GRAMS;
    }
    grams.clamp(MIN_SERVING_GRAMS, MAX_SERVING_GRAMS)
}

/// Scale a per-100 g profile to `amount` of `unit`
#[must_use]
pub fn scale_profile(per_100g: &NutrientProfile, amount: f64, unit: &str) -> NutrientProfile {
    per_100g.scaled_by(to_clamped_grams(amount, unit) / REFERENCE_GRAMS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodlab_core::models::Nutrient;

    #[test]
    fn test_unit_table() {
        assert!((to_clamped_grams(1.0, "kg") - 1000.0).abs() < f64::EPSILON);
        assert!((to_clamped_grams(1.0, "Ounce") - 28.35).abs() < 1e-9);
        assert!((to_clamped_grams(1.0, "lb") - 453.6).abs() < 1e-9);
        assert!((to_clamped_grams(150.0, "cups") - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamping() {
        assert!((to_clamped_grams(5.0, "g") - 10.0).abs() < f64::EPSILON);
        assert!((to_clamped_grams(10.0, "kg") - 2000.0).abs() < f64::EPSILON);
        assert!((to_clamped_grams(500.0, "mg") - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_absent_stays_absent() {
        let profile = NutrientProfile::new().with(Nutrient::Protein, 4.0);
        let scaled = scale_profile(&profile, 200.0, "g");
        assert_eq!(scaled.protein(), Some(8.0));
        assert!(!scaled.contains(Nutrient::Calories));
    }
}
