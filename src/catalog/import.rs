// ABOUTME: Bulk import of USDA FoodData Central JSON exports into the catalog
// ABOUTME: Name cleaning, category mapping, popularity weights, alias generation, validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::Utc;
use foodlab_core::constants::search::CATALOG_DATABASE_VERSION;
use foodlab_core::errors::{AppError, AppResult};
use foodlab_core::models::{Nutrient, NutrientProfile, ServingDefinition};
use regex::Regex;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::repository::{fdc_id_exists, insert_food, NewFood};
use super::schema::{self, DATABASE_VERSION_KEY};
use crate::search::plural_variant;

const POPULAR_FOODS_100: &[&str] = &[
    "apple", "banana", "chicken", "beef", "rice", "bread", "egg", "milk", "salmon", "broccoli",
    "potato", "tomato", "onion", "carrot", "cheese", "yogurt", "pasta", "oatmeal", "orange",
    "strawberry",
];

const POPULAR_FOODS_80: &[&str] = &[
    "avocado",
    "spinach",
    "almond",
    "peanut butter",
    "olive oil",
    "honey",
    "garlic",
    "lemon",
    "lettuce",
    "cucumber",
    "pepper",
    "corn",
    "beans",
    "tuna",
    "shrimp",
    "turkey",
    "pork",
    "bacon",
];

const PROCESSED_MARKERS: &[&str] = &["prepared", "cooked", "processed", "canned", "frozen"];

/// (misspelling or regional name, canonical name)
const COMMON_ALIASES: &[(&str, &str)] = &[
    ("brocolli", "broccoli"),
    ("avacado", "avocado"),
    ("aubergine", "eggplant"),
    ("courgette", "zucchini"),
];

const MAX_CALORIES_PER_100G: f64 = 900.0;

/// Which top-level array of an export file to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsdaDataset {
    /// `SRLegacyFoods`
    SrLegacy,
    /// `FoundationFoods`
    Foundation,
}

impl UsdaDataset {
    /// Source tag stored with each food
    #[must_use]
    pub const fn source_tag(self) -> &'static str {
        match self {
            Self::SrLegacy => "sr_legacy",
            Self::Foundation => "foundation",
        }
    }
}

#[derive(Debug, Deserialize)]
struct UsdaExport {
    #[serde(rename = "SRLegacyFoods", default)]
    sr_legacy_foods: Vec<UsdaFood>,
    #[serde(rename = "FoundationFoods", default)]
    foundation_foods: Vec<UsdaFood>,
}

/// One food from an export file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaFood {
    /// FDC id
    #[serde(default)]
    pub fdc_id: Option<i64>,
    /// Upstream description
    #[serde(default)]
    pub description: String,
    /// Upstream category
    #[serde(default)]
    pub food_category: Option<UsdaCategory>,
    /// Nutrient amounts per 100 g
    #[serde(default)]
    pub food_nutrients: Vec<UsdaFoodNutrient>,
    /// Portions
    #[serde(default)]
    pub food_portions: Vec<UsdaPortion>,
}

/// Upstream food category
#[derive(Debug, Clone, Deserialize)]
pub struct UsdaCategory {
    /// Category label
    #[serde(default)]
    pub description: String,
}

/// Nutrient amount entry
#[derive(Debug, Clone, Deserialize)]
pub struct UsdaFoodNutrient {
    /// Nutrient identity
    #[serde(default)]
    pub nutrient: Option<UsdaNutrientRef>,
    /// Amount per 100 g
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Nutrient identity
#[derive(Debug, Clone, Deserialize)]
pub struct UsdaNutrientRef {
    /// USDA nutrient id
    pub id: u32,
}

/// Portion entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaPortion {
    /// Free-text label
    #[serde(default)]
    pub modifier: Option<String>,
    /// Gram weight
    #[serde(default)]
    pub gram_weight: Option<f64>,
    /// Count of units
    #[serde(default)]
    pub amount: Option<f64>,
    /// Unit of measure
    #[serde(default)]
    pub measure_unit: Option<UsdaMeasureUnit>,
}

/// Unit of measure
#[derive(Debug, Clone, Deserialize)]
pub struct UsdaMeasureUnit {
    /// Unit name
    #[serde(default)]
    pub name: Option<String>,
}

/// Outcome of importing one export file
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    /// Foods read from the file
    pub read: usize,
    /// Foods written
    pub inserted: usize,
    /// Foods already present (by FDC id)
    pub duplicates: usize,
    /// Foods rejected by validation, with the reason
    pub skipped: Vec<String>,
    /// Inserted count per simplified category
    pub by_category: BTreeMap<String, usize>,
}

/// Lowercased name with parenthetical notes removed and whitespace collapsed
#[must_use]
pub fn clean_food_name(description: &str) -> String {
    let without_notes = Regex::new(r"\s*\([^)]*\)")
        .map_or_else(|_| description.to_owned(), |re| re.replace_all(description, "").into_owned());
    without_notes
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Map an upstream category label onto the simplified category set
#[must_use]
pub fn map_category(usda_category: &str) -> &'static str {
    let c = usda_category.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| c.contains(w));

    if c.is_empty() {
        "other"
    } else if any(&["fruit"]) {
        "fruit"
    } else if any(&["vegetable", "mushroom"]) {
        "vegetable"
    } else if any(&["beef", "pork", "lamb", "game"]) {
        "meat"
    } else if any(&["poultry"]) {
        "poultry"
    } else if any(&["fish", "shellfish", "seafood"]) {
        "seafood"
    } else if any(&["dairy", "milk", "cheese", "egg"]) {
        "dairy"
    } else if any(&["grain", "bread", "cereal", "pasta"]) {
        "grain"
    } else if any(&["legume", "bean", "tofu"]) {
        "legume"
    } else if any(&["nut", "seed"]) {
        "nut"
    } else if any(&["fat", "oil"]) {
        "oil"
    } else if any(&["spice", "sauce", "condiment"]) {
        "condiment"
    } else if any(&["beverage", "drink"]) {
        "beverage"
    } else if any(&["snack", "candy", "sweet"]) {
        "snack"
    } else if any(&["fast food", "restaurant", "meal"]) {
        "prepared"
    } else {
        "other"
    }
}

/// Popularity weight from name and description
#[must_use]
pub fn popularity_score(name: &str, description: &str) -> i64 {
    let name = name.to_lowercase();
    let description = description.to_lowercase();
    let mentions = |food: &&str| name.contains(food) || description.contains(food);

    if POPULAR_FOODS_100.iter().any(mentions) {
        100
    } else if POPULAR_FOODS_80.iter().any(mentions) {
        80
    } else if PROCESSED_MARKERS.iter().any(|m| description.contains(m)) {
        40
    } else {
        60
    }
}

/// Plural/singular variant, misspellings, and two-word reorder; never the name itself
#[must_use]
pub fn generate_aliases(name: &str) -> Vec<String> {
    let name = name.to_lowercase();
    let mut aliases = BTreeSet::new();

    if let Some(variant) = plural_variant(&name) {
        aliases.insert(variant);
    }

    for (misspelling, correct) in COMMON_ALIASES {
        if name.contains(correct) {
            aliases.insert((*misspelling).to_owned());
        }
        if name.contains(misspelling) {
            aliases.insert((*correct).to_owned());
        }
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if let [first, second] = words.as_slice() {
        aliases.insert(format!("{second}, {first}"));
    }

    aliases.remove(&name);
    aliases.into_iter().collect()
}

fn extract_nutrients(food: &UsdaFood) -> NutrientProfile {
    food.food_nutrients
        .iter()
        .filter_map(|fnut| {
            let nutrient = Nutrient::from_usda_id(fnut.nutrient.as_ref()?.id)?;
            Some((nutrient, fnut.amount?))
        })
        .collect()
}

fn extract_portions(food: &UsdaFood) -> Vec<ServingDefinition> {
    let mut portions: Vec<ServingDefinition> = food
        .food_portions
        .iter()
        .filter_map(|p| {
            let grams = p.gram_weight.filter(|g| *g > 0.0)?;
            let description = p
                .modifier
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| {
                    let unit = p
                        .measure_unit
                        .as_ref()
                        .and_then(|u| u.name.as_deref())
                        .unwrap_or("serving");
                    format!("{} {unit}", p.amount.unwrap_or(1.0))
                });
            Some(ServingDefinition {
                description,
                grams,
                is_default: false,
            })
        })
        .collect();
    if let Some(first) = portions.first_mut() {
        first.is_default = true;
    }
    portions
}

/// Reject foods without usable calorie data
///
/// # Errors
///
/// Returns the rejection reason
pub fn validate_food(nutrients: &NutrientProfile, category: &str) -> Result<(), String> {
    match nutrients.calories() {
        None => Err("No calorie data".to_owned()),
        Some(kcal) if kcal <= 0.0 => Err("No calorie data".to_owned()),
        Some(kcal) if kcal > MAX_CALORIES_PER_100G && category != "oil" => {
            Err(format!("Calories too high: {kcal}"))
        }
        Some(_) => Ok(()),
    }
}

/// Convert one upstream food into a catalog row, or the reason it was rejected
///
/// # Errors
///
/// Returns the rejection reason
pub fn prepare_food(food: &UsdaFood, dataset: UsdaDataset) -> Result<NewFood, String> {
    let fdc_id = food.fdc_id.ok_or_else(|| "missing fdcId".to_owned())?;
    let name = clean_food_name(&food.description);
    let category = map_category(
        food.food_category
            .as_ref()
            .map_or("", |c| c.description.as_str()),
    );
    let nutrients = extract_nutrients(food);
    validate_food(&nutrients, category)
        .map_err(|reason| format!("FDC {fdc_id}: {} - {reason}", food.description))?;

    Ok(NewFood {
        fdc_id,
        popularity: popularity_score(&name, &food.description),
        aliases: generate_aliases(&name),
        name,
        description: food.description.clone(),
        category: category.to_owned(),
        source: dataset.source_tag().to_owned(),
        nutrients,
        servings: extract_portions(food),
    })
}

/// Parse an export file and pick the array for `dataset`
///
/// # Errors
///
/// Returns a storage error if the file cannot be read, or a serialization error on bad JSON
pub async fn read_export(path: &Path, dataset: UsdaDataset) -> AppResult<Vec<UsdaFood>> {
    let raw = tokio::fs::read(path).await.map_err(|e| {
        AppError::storage(format!("cannot read {}: {e}", path.display()))
    })?;
    let export: UsdaExport = serde_json::from_slice(&raw)?;
    Ok(match dataset {
        UsdaDataset::SrLegacy => export.sr_legacy_foods,
        UsdaDataset::Foundation => export.foundation_foods,
    })
}

/// Import foods into the catalog inside one transaction
///
/// # Errors
///
/// Returns a database error if the transaction fails; nothing is written in that case
pub async fn import_foods(
    pool: &SqlitePool,
    foods: &[UsdaFood],
    dataset: UsdaDataset,
) -> AppResult<ImportStats> {
    let mut stats = ImportStats {
        read: foods.len(),
        ..ImportStats::default()
    };
    let mut tx = pool.begin().await?;

    for food in foods {
        let prepared = match prepare_food(food, dataset) {
            Ok(prepared) => prepared,
            Err(reason) => {
                debug!(%reason, "skipping food");
                stats.skipped.push(reason);
                continue;
            }
        };
        if fdc_id_exists(&mut tx, prepared.fdc_id).await? {
            stats.duplicates += 1;
            continue;
        }
        insert_food(&mut tx, &prepared).await?;
        stats.inserted += 1;
        *stats.by_category.entry(prepared.category).or_default() += 1;
    }

    tx.commit().await?;
    info!(
        dataset = dataset.source_tag(),
        read = stats.read,
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        skipped = stats.skipped.len(),
        "import finished"
    );
    Ok(stats)
}

/// Write the version and import bookkeeping into `metadata`
///
/// # Errors
///
/// Returns a database error if a write fails
pub async fn write_import_metadata(pool: &SqlitePool) -> AppResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM foods")
        .fetch_one(pool)
        .await?;
    let now = Utc::now();
    schema::set_metadata(pool, DATABASE_VERSION_KEY, CATALOG_DATABASE_VERSION).await?;
    schema::set_metadata(pool, "usda_data_date", &now.format("%Y-%m-%d").to_string()).await?;
    schema::set_metadata(pool, "total_foods", &total.to_string()).await?;
    schema::set_metadata(pool, "last_updated", &now.to_rfc3339()).await?;
    Ok(total)
}
