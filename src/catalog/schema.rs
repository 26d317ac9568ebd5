// ABOUTME: SQLite schema for the food catalog (foods, nutrition, servings, aliases, metadata)
// ABOUTME: Idempotent CREATE IF NOT EXISTS migrations plus the readiness validation query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodlab_core::errors::AppResult;
use foodlab_core::models::Nutrient;
use sqlx::{Row, SqlitePool};

/// Metadata key holding the catalog schema version
pub const DATABASE_VERSION_KEY: &str = "database_version";

/// Create every catalog table and index if missing
///
/// # Errors
///
/// Returns a database error if any statement fails
pub async fn ensure_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS foods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            fdc_id INTEGER UNIQUE NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT 'other',
            data_source TEXT NOT NULL DEFAULT '',
            popularity_score INTEGER NOT NULL DEFAULT 60
        )
        ",
    )
    .execute(pool)
    .await?;

    let nutrient_columns: Vec<String> = Nutrient::ALL
        .iter()
        .map(|n| format!("{} REAL", n.key()))
        .collect();
    sqlx::query(&format!(
        r"
        CREATE TABLE IF NOT EXISTS nutrition (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_id INTEGER UNIQUE NOT NULL REFERENCES foods(id) ON DELETE CASCADE,
            {}
        )
        ",
        nutrient_columns.join(",\n            ")
    ))
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS servings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_id INTEGER NOT NULL REFERENCES foods(id) ON DELETE CASCADE,
            description TEXT NOT NULL,
            grams REAL NOT NULL,
            is_default INTEGER NOT NULL DEFAULT 0
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS aliases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_id INTEGER NOT NULL REFERENCES foods(id) ON DELETE CASCADE,
            alias TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS metadata (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    for index in [
        "CREATE INDEX IF NOT EXISTS idx_foods_name ON foods(name)",
        "CREATE INDEX IF NOT EXISTS idx_foods_category ON foods(category)",
        "CREATE INDEX IF NOT EXISTS idx_foods_popularity ON foods(popularity_score DESC)",
        "CREATE INDEX IF NOT EXISTS idx_aliases_alias ON aliases(alias)",
        "CREATE INDEX IF NOT EXISTS idx_nutrition_food_id ON nutrition(food_id)",
        "CREATE INDEX IF NOT EXISTS idx_servings_food_id ON servings(food_id)",
    ] {
        sqlx::query(index).execute(pool).await?;
    }

    Ok(())
}

/// Reason the catalog cannot serve lookups, or `None` when it is usable
///
/// # Errors
///
/// Returns a database error if the validation queries fail
pub async fn validation_failure(pool: &SqlitePool) -> AppResult<Option<String>> {
    let version: Option<String> = sqlx::query("SELECT value FROM metadata WHERE key = $1")
        .bind(DATABASE_VERSION_KEY)
        .fetch_optional(pool)
        .await?
        .map(|row| row.get("value"));
    if version.is_none() {
        return Ok(Some(format!("metadata is missing {DATABASE_VERSION_KEY}")));
    }

    let food_count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM foods")
        .fetch_one(pool)
        .await?
        .get("n");
    if food_count == 0 {
        return Ok(Some("foods table is empty".to_owned()));
    }

    Ok(None)
}

/// Insert or replace one metadata value
///
/// # Errors
///
/// Returns a database error if the write fails
pub async fn set_metadata(pool: &SqlitePool, key: &str, value: &str) -> AppResult<()> {
    sqlx::query("INSERT OR REPLACE INTO metadata (key, value) VALUES ($1, $2)")
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    Ok(())
}
