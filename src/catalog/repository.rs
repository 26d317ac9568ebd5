// ABOUTME: Catalog queries: candidate gathering, nutrient profiles, servings, and inserts
// ABOUTME: Rows are mapped into core models; serving invariants are enforced on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodlab_core::errors::AppResult;
use foodlab_core::models::{
    normalize_servings, FoodRecord, Nutrient, NutrientProfile, ServingDefinition,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::search::{Candidate, NormalizedQuery};

/// A food ready to be written to the catalog
#[derive(Debug, Clone)]
pub struct NewFood {
    /// Upstream id
    pub fdc_id: i64,
    /// Cleaned canonical name
    pub name: String,
    /// Original description
    pub description: String,
    /// Simplified category
    pub category: String,
    /// Source dataset tag
    pub source: String,
    /// Popularity weight
    pub popularity: i64,
    /// Per-100 g nutrients
    pub nutrients: NutrientProfile,
    /// Portions
    pub servings: Vec<ServingDefinition>,
    /// Alternate search names
    pub aliases: Vec<String>,
}

fn like_pattern(form: &str) -> String {
    let escaped = form
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn food_from_row(row: &SqliteRow) -> FoodRecord {
    FoodRecord {
        id: row.get("id"),
        fdc_id: row.get("fdc_id"),
        name: row.get("name"),
        description: row.get("description"),
        category: row.get("category"),
        source: row.get("data_source"),
        popularity: row.get("popularity_score"),
    }
}

/// Read access to the catalog tables
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Repository over an open pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Gather records whose name or any alias contains the query or its variant
    ///
    /// Every matching record is returned; ordering is left to the ranker.
    /// Name hits come first, then alias hits; each group is in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails
    pub async fn find_candidates(&self, query: &NormalizedQuery) -> AppResult<Vec<Candidate>> {
        let primary = like_pattern(query.text());
        let variant = query.variant().map_or_else(|| primary.clone(), like_pattern);

        let name_rows = sqlx::query(
            r"
            SELECT id, fdc_id, name, description, category, data_source, popularity_score
            FROM foods
            WHERE lower(name) LIKE $1 ESCAPE '\' OR lower(name) LIKE $2 ESCAPE '\'
            ORDER BY id
            ",
        )
        .bind(&primary)
        .bind(&variant)
        .fetch_all(&self.pool)
        .await?;

        let alias_rows = sqlx::query(
            r"
            SELECT f.id, f.fdc_id, f.name, f.description, f.category, f.data_source,
                   f.popularity_score, a.alias
            FROM aliases a
            JOIN foods f ON f.id = a.food_id
            WHERE lower(a.alias) LIKE $1 ESCAPE '\' OR lower(a.alias) LIKE $2 ESCAPE '\'
            ORDER BY f.id
            ",
        )
        .bind(&primary)
        .bind(&variant)
        .fetch_all(&self.pool)
        .await?;

        let mut candidates: Vec<Candidate> = name_rows
            .iter()
            .map(|row| Candidate::by_name(food_from_row(row)))
            .collect();
        candidates.extend(alias_rows.iter().map(|row| {
            let alias: String = row.get("alias");
            Candidate::by_alias(food_from_row(row), alias)
        }));
        Ok(candidates)
    }

    /// Fetch a food by catalog id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn food(&self, food_id: i64) -> AppResult<Option<FoodRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, fdc_id, name, description, category, data_source, popularity_score
            FROM foods WHERE id = $1
            ",
        )
        .bind(food_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(food_from_row))
    }

    /// Per-100 g nutrient profile; absent columns stay absent
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn nutrient_profile(&self, food_id: i64) -> AppResult<Option<NutrientProfile>> {
        let row = sqlx::query("SELECT * FROM nutrition WHERE food_id = $1")
            .bind(food_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut profile = NutrientProfile::new();
        for nutrient in Nutrient::ALL {
            let value: Option<f64> = row.try_get(nutrient.key())?;
            profile.set_opt(nutrient, value);
        }
        Ok(Some(profile))
    }

    /// Servings with exactly one default, synthesizing "100 g" when none exist
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn servings(&self, food_id: i64) -> AppResult<Vec<ServingDefinition>> {
        let rows = sqlx::query(
            "SELECT description, grams, is_default FROM servings WHERE food_id = $1 ORDER BY id",
        )
        .bind(food_id)
        .fetch_all(&self.pool)
        .await?;

        let servings = rows
            .iter()
            .map(|row| ServingDefinition {
                description: row.get("description"),
                grams: row.get("grams"),
                is_default: row.get::<i64, _>("is_default") != 0,
            })
            .collect();
        Ok(normalize_servings(servings))
    }

    /// The food's default serving
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn default_serving(&self, food_id: i64) -> AppResult<ServingDefinition> {
        let servings = self.servings(food_id).await?;
        Ok(servings
            .into_iter()
            .find(|s| s.is_default)
            .unwrap_or_else(ServingDefinition::reference))
    }

    /// Number of foods in the catalog
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn food_count(&self) -> AppResult<i64> {
        Ok(sqlx::query("SELECT COUNT(*) AS n FROM foods")
            .fetch_one(&self.pool)
            .await?
            .get("n"))
    }
}

/// Whether a food with this upstream id already exists
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn fdc_id_exists(conn: &mut SqliteConnection, fdc_id: i64) -> AppResult<bool> {
    let row = sqlx::query("SELECT id FROM foods WHERE fdc_id = $1")
        .bind(fdc_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Insert a food with its nutrients, servings and aliases; returns the new id
///
/// # Errors
///
/// Returns a database error if any insert fails (including duplicate `fdc_id`)
pub async fn insert_food(conn: &mut SqliteConnection, food: &NewFood) -> AppResult<i64> {
    let food_id = sqlx::query(
        r"
        INSERT INTO foods (fdc_id, name, description, category, data_source, popularity_score)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(food.fdc_id)
    .bind(&food.name)
    .bind(&food.description)
    .bind(&food.category)
    .bind(&food.source)
    .bind(food.popularity)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    let columns: Vec<&str> = Nutrient::ALL.iter().map(|n| n.key()).collect();
    let placeholders: Vec<String> = (2..=Nutrient::ALL.len() + 1).map(|i| format!("${i}")).collect();
    let sql = format!(
        "INSERT INTO nutrition (food_id, {}) VALUES ($1, {})",
        columns.join(", "),
        placeholders.join(", ")
    );
    let mut insert = sqlx::query(&sql).bind(food_id);
    for nutrient in Nutrient::ALL {
        insert = insert.bind(food.nutrients.get(nutrient));
    }
    insert.execute(&mut *conn).await?;

    for serving in &food.servings {
        sqlx::query(
            "INSERT INTO servings (food_id, description, grams, is_default) VALUES ($1, $2, $3, $4)",
        )
        .bind(food_id)
        .bind(&serving.description)
        .bind(serving.grams)
        .bind(i64::from(serving.is_default))
        .execute(&mut *conn)
        .await?;
    }

    for alias in &food.aliases {
        sqlx::query("INSERT INTO aliases (food_id, alias) VALUES ($1, $2)")
            .bind(food_id)
            .bind(alias)
            .execute(&mut *conn)
            .await?;
    }

    Ok(food_id)
}
