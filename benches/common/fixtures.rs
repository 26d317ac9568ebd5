// ABOUTME: Benchmark fixtures generating deterministic food catalogs
// ABOUTME: Produces ranker candidates and seeded in-memory catalogs of configurable size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deterministic catalog data for reproducible measurements.

use foodlab::catalog::repository::insert_food;
use foodlab::catalog::schema::{set_metadata, DATABASE_VERSION_KEY};
use foodlab::catalog::store::connect_in_memory;
use foodlab::catalog::NewFood;
use foodlab::errors::AppResult;
use foodlab::models::{FoodRecord, Nutrient, NutrientProfile, ServingDefinition};
use foodlab::search::Candidate;
use sqlx::SqlitePool;

/// Predefined catalog sizes
#[derive(Debug, Clone, Copy)]
pub enum CatalogSize {
    /// Typical candidate pool for a common word
    Small,
    /// Full candidate pool limit
    Large,
}

impl CatalogSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 50,
            Self::Large => 500,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "50",
            Self::Large => "500",
        }
    }
}

const BASES: &[&str] = &["banana", "apple", "tomato", "chicken", "rice", "bean"];
const QUALIFIERS: &[&str] = &[
    "raw",
    "cooked",
    "bread",
    "canned",
    "frozen",
    "juice",
    "pie",
    "soup",
    "salad",
    "dried",
];

fn food_name(index: usize) -> String {
    let base = BASES[index % BASES.len()];
    let qualifier = QUALIFIERS[(index / BASES.len()) % QUALIFIERS.len()];
    if index % 3 == 0 {
        format!("{base}s, {qualifier}")
    } else {
        format!("{base} {qualifier} {index}")
    }
}

/// Foods matching the common bases, cycling through qualifiers
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn generate_foods(size: CatalogSize) -> Vec<NewFood> {
    (0..size.count())
        .map(|i| {
            let name = food_name(i);
            NewFood {
                fdc_id: 100_000 + i as i64,
                description: name.clone(),
                name,
                category: "other".to_owned(),
                source: "bench".to_owned(),
                popularity: [40, 60, 80, 100][i % 4],
                nutrients: NutrientProfile::new()
                    .with(Nutrient::Calories, 50.0 + (i % 300) as f64)
                    .with(Nutrient::Protein, (i % 25) as f64),
                servings: vec![ServingDefinition::reference()],
                aliases: Vec::new(),
            }
        })
        .collect()
}

/// Name-path candidates for the ranker
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn generate_candidates(size: CatalogSize) -> Vec<Candidate> {
    generate_foods(size)
        .into_iter()
        .enumerate()
        .map(|(i, food)| {
            Candidate::by_name(FoodRecord {
                id: i as i64 + 1,
                fdc_id: food.fdc_id,
                name: food.name,
                description: food.description,
                category: food.category,
                source: food.source,
                popularity: food.popularity,
            })
        })
        .collect()
}

/// In-memory catalog seeded with [`generate_foods`]
///
/// # Errors
///
/// Returns a database error if seeding fails
pub async fn seeded_catalog(size: CatalogSize) -> AppResult<SqlitePool> {
    let pool = connect_in_memory().await?;
    {
        let mut conn = pool.acquire().await?;
        for food in generate_foods(size) {
            insert_food(&mut conn, &food).await?;
        }
    }
    set_metadata(&pool, DATABASE_VERSION_KEY, "1.0").await?;
    Ok(pool)
}
