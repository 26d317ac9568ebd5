// ABOUTME: Integration tests for catalog search over an in-memory SQLite catalog
// ABOUTME: Covers relevance ordering, plural and alias matching, limits, and unavailable stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use foodlab::catalog::CatalogStore;
use foodlab::config::ScoringConfig;
use foodlab::search::CatalogSearch;

#[tokio::test]
async fn test_raw_fruit_outranks_baked_good() -> Result<()> {
    let search = common::standard_search().await?;

    let hits = search.search("banana", 10).await;

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].record.name, "bananas, raw");
    assert_eq!(hits[0].score, 480);
    assert_eq!(hits[1].record.name, "banana bread");
    assert_eq!(hits[1].score, 340);
    Ok(())
}

#[tokio::test]
async fn test_plural_query_finds_singular_names() -> Result<()> {
    let search = common::standard_search().await?;

    let hits = search.search("Bananas", 10).await;

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].record.name, "bananas, raw");
    assert!(hits[0].score > hits[1].score);
    Ok(())
}

#[tokio::test]
async fn test_substring_match_ranks_below_prefix() -> Result<()> {
    let search = common::standard_search().await?;

    let hits = search.search("apple", 10).await;

    let names: Vec<&str> = hits.iter().map(|h| h.record.name.as_str()).collect();
    assert_eq!(names, vec!["apples, raw", "pineapple pie"]);
    assert!(hits[1].score < 0);
    Ok(())
}

#[tokio::test]
async fn test_alias_hit_is_reported() -> Result<()> {
    let search = common::standard_search().await?;

    let hits = search.search("courgette", 10).await;

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.name, "zucchini, raw");
    assert!(hits[0].via_alias);
    Ok(())
}

#[tokio::test]
async fn test_name_and_alias_hits_collapse_to_one_result() -> Result<()> {
    let foods = vec![common::with_aliases(
        common::food(2001, "kale, raw", 50, 49.0, 4.3),
        &["leafy kale"],
    )];
    let search = CatalogSearch::new(common::catalog_with(&foods).await?, ScoringConfig::default());

    let hits = search.search("kale", 10).await;

    assert_eq!(hits.len(), 1);
    assert!(!hits[0].via_alias);
    Ok(())
}

#[tokio::test]
async fn test_limit_truncates_results() -> Result<()> {
    let search = common::standard_search().await?;

    let hits = search.search("banana", 1).await;

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.name, "bananas, raw");
    assert!(search.search("banana", 0).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_query_returns_nothing() -> Result<()> {
    let search = common::standard_search().await?;

    assert!(search.search("", 10).await.is_empty());
    assert!(search.search("   ", 10).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_like_wildcards_are_literal() -> Result<()> {
    let search = common::standard_search().await?;

    assert!(search.search("%", 10).await.is_empty());
    assert!(search.search("_", 10).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unavailable_store_returns_empty() {
    common::init_test_logging();
    let search = CatalogSearch::new(
        CatalogStore::unavailable("catalog missing"),
        ScoringConfig::default(),
    );

    assert!(search.search("banana", 10).await.is_empty());
}

#[tokio::test]
async fn test_custom_weights_change_ordering() -> Result<()> {
    let scoring = ScoringConfig {
        simple_food_processed_penalty: 0,
        simple_food_comma_penalty: 0,
        ..ScoringConfig::default()
    };
    let search = CatalogSearch::new(common::standard_catalog().await?, scoring);

    let hits = search.search("banana", 10).await;

    assert_eq!(hits[0].score, 680);
    assert_eq!(hits[1].score, 640);
    Ok(())
}

#[tokio::test]
async fn test_exact_match_found_among_many_weaker_matches() -> Result<()> {
    let mut foods: Vec<_> = (0..600)
        .map(|i| common::food(20_000 + i, &format!("apple pie {i}"), 60, 237.0, 1.9))
        .collect();
    foods.push(common::food(30_000, "apple", 50, 52.0, 0.3));
    let search = CatalogSearch::new(common::catalog_with(&foods).await?, ScoringConfig::default());

    let hits = search.search("apple", 5).await;

    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].record.name, "apple");
    assert!(hits[0].score > hits[1].score);
    Ok(())
}

#[tokio::test]
async fn test_equal_scores_keep_catalog_order() -> Result<()> {
    let foods = vec![
        common::food(40_001, "kiwi, gold", 60, 63.0, 1.2),
        common::food(40_002, "kiwi, green", 60, 61.0, 1.1),
        common::food(40_003, "kiwi, red", 60, 60.0, 1.0),
    ];
    let search = CatalogSearch::new(common::catalog_with(&foods).await?, ScoringConfig::default());

    let hits = search.search("kiwi", 10).await;

    let names: Vec<&str> = hits.iter().map(|h| h.record.name.as_str()).collect();
    assert_eq!(names, ["kiwi, gold", "kiwi, green", "kiwi, red"]);
    assert!(hits.windows(2).all(|w| w[0].score == w[1].score));
    Ok(())
}
