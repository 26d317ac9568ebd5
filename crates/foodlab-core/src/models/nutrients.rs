// ABOUTME: Canonical nutrient set with units and USDA identifiers
// ABOUTME: NutrientProfile keeps "unknown" (absent) distinct from a measured zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unit a canonical nutrient value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientUnit {
    /// Kilocalories
    Kcal,
    /// Grams
    #[serde(rename = "g")]
    Gram,
    /// Milligrams
    #[serde(rename = "mg")]
    Milligram,
    /// Micrograms
    #[serde(rename = "mcg")]
    Microgram,
}

impl NutrientUnit {
    /// Short unit label
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kcal => "kcal",
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Microgram => "mcg",
        }
    }
}

/// The canonical nutrient set every tier maps into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Energy
    Calories,
    /// Protein
    Protein,
    /// Carbohydrate, by difference
    Carbohydrates,
    /// Total lipid
    Fat,
    /// Total dietary fiber
    Fiber,
    /// Total sugars
    Sugar,
    /// Sodium
    Sodium,
    /// Saturated fatty acids
    SaturatedFat,
    /// Cholesterol
    Cholesterol,
    /// Potassium
    Potassium,
    /// Calcium
    Calcium,
    /// Iron
    Iron,
    /// Magnesium
    Magnesium,
    /// Phosphorus
    Phosphorus,
    /// Zinc
    Zinc,
    /// Copper
    Copper,
    /// Manganese
    Manganese,
    /// Selenium
    Selenium,
    /// Iodine
    Iodine,
    /// Vitamin A (RAE)
    VitaminA,
    /// Vitamin C
    VitaminC,
    /// Vitamin D (D2 + D3)
    VitaminD,
    /// Vitamin E (alpha-tocopherol)
    VitaminE,
    /// Vitamin K (phylloquinone)
    VitaminK,
    /// Thiamin
    VitaminB1,
    /// Riboflavin
    VitaminB2,
    /// Niacin
    VitaminB3,
    /// Pantothenic acid
    VitaminB5,
    /// Vitamin B6
    VitaminB6,
    /// Vitamin B12
    VitaminB12,
    /// Folate (DFE)
    Folate,
    /// Choline
    Choline,
    /// Omega-3 fatty acids
    #[serde(rename = "omega_3")]
    Omega3,
    /// Omega-6 fatty acids
    #[serde(rename = "omega_6")]
    Omega6,
}

impl Nutrient {
    /// Every canonical nutrient, in catalog column order
    pub const ALL: [Self; 34] = [
        Self::Calories,
        Self::Protein,
        Self::Carbohydrates,
        Self::Fat,
        Self::Fiber,
        Self::Sugar,
        Self::Sodium,
        Self::SaturatedFat,
        Self::Cholesterol,
        Self::Potassium,
        Self::Calcium,
        Self::Iron,
        Self::Magnesium,
        Self::Phosphorus,
        Self::Zinc,
        Self::Copper,
        Self::Manganese,
        Self::Selenium,
        Self::Iodine,
        Self::VitaminA,
        Self::VitaminC,
        Self::VitaminD,
        Self::VitaminE,
        Self::VitaminK,
        Self::VitaminB1,
        Self::VitaminB2,
        Self::VitaminB3,
        Self::VitaminB5,
        Self::VitaminB6,
        Self::VitaminB12,
        Self::Folate,
        Self::Choline,
        Self::Omega3,
        Self::Omega6,
    ];

    /// Column name in the catalog `nutrition` table (also the serialized key)
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbohydrates => "carbohydrates",
            Self::Fat => "fat",
            Self::Fiber => "fiber",
            Self::Sugar => "sugar",
            Self::Sodium => "sodium",
            Self::SaturatedFat => "saturated_fat",
            Self::Cholesterol => "cholesterol",
            Self::Potassium => "potassium",
            Self::Calcium => "calcium",
            Self::Iron => "iron",
            Self::Magnesium => "magnesium",
            Self::Phosphorus => "phosphorus",
            Self::Zinc => "zinc",
            Self::Copper => "copper",
            Self::Manganese => "manganese",
            Self::Selenium => "selenium",
            Self::Iodine => "iodine",
            Self::VitaminA => "vitamin_a",
            Self::VitaminC => "vitamin_c",
            Self::VitaminD => "vitamin_d",
            Self::VitaminE => "vitamin_e",
            Self::VitaminK => "vitamin_k",
            Self::VitaminB1 => "vitamin_b1",
            Self::VitaminB2 => "vitamin_b2",
            Self::VitaminB3 => "vitamin_b3",
            Self::VitaminB5 => "vitamin_b5",
            Self::VitaminB6 => "vitamin_b6",
            Self::VitaminB12 => "vitamin_b12",
            Self::Folate => "folate",
            Self::Choline => "choline",
            Self::Omega3 => "omega_3",
            Self::Omega6 => "omega_6",
        }
    }

    /// Canonical unit for this nutrient
    #[must_use]
    pub const fn unit(self) -> NutrientUnit {
        match self {
            Self::Calories => NutrientUnit::Kcal,
            Self::Protein
            | Self::Carbohydrates
            | Self::Fat
            | Self::Fiber
            | Self::Sugar
            | Self::SaturatedFat
            | Self::Omega3
            | Self::Omega6 => NutrientUnit::Gram,
            Self::Selenium
            | Self::Iodine
            | Self::VitaminA
            | Self::VitaminD
            | Self::VitaminK
            | Self::VitaminB12
            | Self::Folate => NutrientUnit::Microgram,
            Self::Sodium
            | Self::Cholesterol
            | Self::Potassium
            | Self::Calcium
            | Self::Iron
            | Self::Magnesium
            | Self::Phosphorus
            | Self::Zinc
            | Self::Copper
            | Self::Manganese
            | Self::VitaminC
            | Self::VitaminE
            | Self::VitaminB1
            | Self::VitaminB2
            | Self::VitaminB3
            | Self::VitaminB5
            | Self::VitaminB6
            | Self::Choline => NutrientUnit::Milligram,
        }
    }

    /// USDA `FoodData` Central nutrient id for this nutrient
    #[must_use]
    pub const fn usda_id(self) -> u32 {
        match self {
            Self::Calories => 1008,
            Self::Protein => 1003,
            Self::Carbohydrates => 1005,
            Self::Fat => 1004,
            Self::Fiber => 1079,
            Self::Sugar => 2000,
            Self::Sodium => 1093,
            Self::SaturatedFat => 1258,
            Self::Cholesterol => 1253,
            Self::Potassium => 1092,
            Self::Calcium => 1087,
            Self::Iron => 1089,
            Self::Magnesium => 1090,
            Self::Phosphorus => 1091,
            Self::Zinc => 1095,
            Self::Copper => 1098,
            Self::Manganese => 1101,
            Self::Selenium => 1103,
            Self::Iodine => 1100,
            Self::VitaminA => 1106,
            Self::VitaminC => 1162,
            Self::VitaminD => 1114,
            Self::VitaminE => 1109,
            Self::VitaminK => 1185,
            Self::VitaminB1 => 1165,
            Self::VitaminB2 => 1166,
            Self::VitaminB3 => 1167,
            Self::VitaminB5 => 1170,
            Self::VitaminB6 => 1175,
            Self::VitaminB12 => 1178,
            Self::Folate => 1177,
            Self::Choline => 1180,
            Self::Omega3 => 1404,
            Self::Omega6 => 1405,
        }
    }

    /// Look up a nutrient by its USDA nutrient id
    #[must_use]
    pub fn from_usda_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.usda_id() == id)
    }

    /// Look up a nutrient by its catalog column name
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.key() == key)
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Nutrient values for a specific amount of food
///
/// Catalog and remote sources fill this per 100 g; the scaler produces a copy
/// for the requested serving. A nutrient missing from the map is unknown, which
/// is not the same thing as a measured zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientProfile {
    values: BTreeMap<Nutrient, f64>,
}

impl NutrientProfile {
    /// Create an empty profile
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, value);
        self
    }

    /// Set a value; non-finite values are ignored
    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        if value.is_finite() {
            self.values.insert(nutrient, value);
        }
    }

    /// Set a value only when one is present
    pub fn set_opt(&mut self, nutrient: Nutrient, value: Option<f64>) {
        if let Some(v) = value {
            self.set(nutrient, v);
        }
    }

    /// Value for a nutrient, `None` when unknown
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        self.values.get(&nutrient).copied()
    }

    /// Whether the nutrient has a known value
    #[must_use]
    pub fn contains(&self, nutrient: Nutrient) -> bool {
        self.values.contains_key(&nutrient)
    }

    /// Number of known nutrients
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no nutrient is known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate known nutrients in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        self.values.iter().map(|(n, v)| (*n, *v))
    }

    /// Multiply every known value by `factor`; unknown values stay unknown
    #[must_use]
    pub fn scaled_by(&self, factor: f64) -> Self {
        Self {
            values: self
                .values
                .iter()
                .map(|(n, v)| (*n, v * factor))
                .collect(),
        }
    }

    /// Energy in kcal
    #[must_use]
    pub fn calories(&self) -> Option<f64> {
        self.get(Nutrient::Calories)
    }

    /// Protein in grams
    #[must_use]
    pub fn protein(&self) -> Option<f64> {
        self.get(Nutrient::Protein)
    }

    /// Carbohydrates in grams
    #[must_use]
    pub fn carbohydrates(&self) -> Option<f64> {
        self.get(Nutrient::Carbohydrates)
    }

    /// Fat in grams
    #[must_use]
    pub fn fat(&self) -> Option<f64> {
        self.get(Nutrient::Fat)
    }
}

impl FromIterator<(Nutrient, f64)> for NutrientProfile {
    fn from_iter<I: IntoIterator<Item = (Nutrient, f64)>>(iter: I) -> Self {
        let mut profile = Self::new();
        for (nutrient, value) in iter {
            profile.set(nutrient, value);
        }
        profile
    }
}
