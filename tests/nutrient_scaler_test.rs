// ABOUTME: Integration tests for per-100 g nutrient scaling
// ABOUTME: Covers identity at 100 g, linearity, unit conversion, clamping and absent nutrients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::approx_eq;
use foodlab::models::{Nutrient, NutrientProfile};
use foodlab::nutrition::{scale_profile, to_clamped_grams, MassUnit};

fn per_100g() -> NutrientProfile {
    NutrientProfile::new()
        .with(Nutrient::Calories, 120.0)
        .with(Nutrient::Protein, 4.4)
        .with(Nutrient::Iron, 1.5)
}

#[test]
fn test_100_grams_is_identity() {
    let profile = per_100g();
    assert_eq!(scale_profile(&profile, 100.0, "g"), profile);
}

#[test]
fn test_scaling_is_linear() {
    let double = scale_profile(&per_100g(), 200.0, "g");

    assert!(approx_eq(double.get(Nutrient::Calories).unwrap(), 240.0));
    assert!(approx_eq(double.get(Nutrient::Protein).unwrap(), 8.8));
    assert!(approx_eq(double.get(Nutrient::Iron).unwrap(), 3.0));
}

#[test]
fn test_absent_nutrients_stay_absent() {
    let scaled = scale_profile(&per_100g(), 250.0, "g");

    assert_eq!(scaled.len(), 3);
    assert!(!scaled.contains(Nutrient::Fat));
    assert!(scaled.get(Nutrient::VitaminC).is_none());
}

#[test]
fn test_zero_valued_nutrient_is_kept() {
    let profile = NutrientProfile::new().with(Nutrient::Sugar, 0.0);
    let scaled = scale_profile(&profile, 300.0, "g");

    assert_eq!(scaled.get(Nutrient::Sugar), Some(0.0));
}

#[test]
fn test_units_convert_to_grams() {
    let one_kg = scale_profile(&per_100g(), 1.0, "kg");
    assert!(approx_eq(one_kg.calories().unwrap(), 1200.0));

    let one_pound = scale_profile(&per_100g(), 1.0, "lb");
    assert!(approx_eq(one_pound.calories().unwrap(), 120.0 * 4.536));

    assert_eq!(MassUnit::parse("OZ"), MassUnit::Ounce);
    assert_eq!(MassUnit::parse("handful"), MassUnit::Gram);
}

#[test]
fn test_portions_are_clamped() {
    assert!(approx_eq(to_clamped_grams(1.0, "g"), 10.0));
    assert!(approx_eq(to_clamped_grams(10.0, "kg"), 2000.0));
    assert!(approx_eq(to_clamped_grams(f64::NAN, "g"), 10.0));

    let tiny = scale_profile(&per_100g(), 500.0, "mg");
    assert!(approx_eq(tiny.calories().unwrap(), 12.0));
}
