// ABOUTME: Relevance ranking weights and local-tier acceptance threshold
// ABOUTME: Empirically tuned values kept as named constants for behavioral parity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bonus when the candidate name equals the query
pub const EXACT_MATCH_BONUS: i64 = 1000;

/// Bonus when the candidate name starts with the query
pub const PREFIX_MATCH_BONUS: i64 = 500;

/// Bonus when the query is a whole word inside the candidate name
pub const WHOLE_WORD_BONUS: i64 = 200;

/// Bonus for a plain substring match
pub const SUBSTRING_BONUS: i64 = 100;

/// Bonus for each query token found in name or description
pub const TOKEN_PRESENT_BONUS: i64 = 50;

/// Extra bonus when a query token starts the name
pub const TOKEN_LEADS_NAME_BONUS: i64 = 50;

/// Penalty when a query token follows a comma (modifier position)
pub const TOKEN_AFTER_COMMA_PENALTY: i64 = -30;

/// Flat penalty for candidates reached only through an alias
pub const ALIAS_MATCH_PENALTY: i64 = -30;

/// Simple-food penalty when the name contains a comma
pub const SIMPLE_FOOD_COMMA_PENALTY: i64 = -200;

/// Simple-food penalty when the text contains a processed-food keyword
pub const SIMPLE_FOOD_PROCESSED_PENALTY: i64 = -300;

/// Longest query still treated as a "simple food"
pub const SIMPLE_FOOD_MAX_LEN: usize = 12;

/// Minimum best score for accepting a local catalog match
pub const LOCAL_MATCH_THRESHOLD: i64 = 50;

/// Number of local candidates considered by the resolver
pub const LOCAL_SEARCH_LIMIT: usize = 5;

/// Seconds the first catalog caller waits for the store to open
pub const CATALOG_OPEN_TIMEOUT_SECS: u64 = 5;

/// Catalog schema version written to the `metadata` table
pub const CATALOG_DATABASE_VERSION: &str = "1.0";
