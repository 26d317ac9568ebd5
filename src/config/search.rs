// ABOUTME: Relevance scoring configuration with declarative ingredient and cross-category rules
// ABOUTME: Rule tables map a query group to keyword sets and weights interpreted by the ranker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Search scoring configuration
//!
//! Every magnitude used by the ranker lives here. The defaults reproduce the
//! tuned production values; override them per instance instead of editing the
//! ranker.

use foodlab_core::constants::search;

/// A keyword set and the score delta applied when any keyword appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordAdjustment {
    /// Keywords matched as substrings of the candidate text
    pub keywords: &'static [&'static str],
    /// Score delta (negative for penalties)
    pub weight: i64,
}

/// Preparation-state rule for one family of common single-ingredient foods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientRule {
    /// Rule name used in trace output
    pub group: &'static str,
    /// Query terms that activate the rule (plural forms match automatically)
    pub query_terms: &'static [&'static str],
    /// Adjustments applied independently, each at most once
    pub adjustments: &'static [KeywordAdjustment],
}

/// Fixed penalty for a known misleading query/text co-occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossCategoryRule {
    /// Query token that activates the rule
    pub query_term: &'static str,
    /// Keyword that must appear in the candidate text
    pub text_keyword: &'static str,
    /// Score delta
    pub weight: i64,
}

const RAW_FRESH: &[&str] = &["raw", "fresh"];
const COOKED: &[&str] = &["cooked"];

const fn adjust(keywords: &'static [&'static str], weight: i64) -> KeywordAdjustment {
    KeywordAdjustment { keywords, weight }
}

/// Default preparation-state rules
pub const DEFAULT_INGREDIENT_RULES: &[IngredientRule] = &[
    IngredientRule {
        group: "tomato",
        query_terms: &["tomato"],
        adjustments: &[
            adjust(
                &["canned", "juice", "sauce", "paste", "ketchup", "soup", "puree", "dried"],
                -400,
            ),
            adjust(RAW_FRESH, 200),
        ],
    },
    IngredientRule {
        group: "pepper",
        query_terms: &["pepper"],
        adjustments: &[
            adjust(&["pickled", "stuffed", "sauce", "canned", "spices"], -400),
            adjust(RAW_FRESH, 200),
        ],
    },
    IngredientRule {
        group: "mushroom",
        query_terms: &["mushroom"],
        adjustments: &[
            adjust(&["canned", "soup", "fried", "cream of"], -300),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "spinach",
        query_terms: &["spinach"],
        adjustments: &[
            adjust(&["canned", "frozen", "creamed", "souffle", "dip"], -300),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "corn",
        query_terms: &["corn"],
        adjustments: &[
            adjust(
                &[
                    "canned",
                    "syrup",
                    "chips",
                    "tortilla",
                    "flour",
                    "starch",
                    "popcorn",
                    "cream style",
                    "fried",
                ],
                -350,
            ),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "beans",
        query_terms: &["bean"],
        adjustments: &[
            adjust(&["canned", "baked", "refried", "soup", "sauce"], -300),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "peas",
        query_terms: &["pea"],
        adjustments: &[
            adjust(&["canned", "frozen", "soup"], -300),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "onion",
        query_terms: &["onion"],
        adjustments: &[
            adjust(
                &["rings", "fried", "powder", "dehydrated", "soup", "pickled"],
                -350,
            ),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "cucumber",
        query_terms: &["cucumber"],
        adjustments: &[
            adjust(&["pickled", "pickle", "dill"], -400),
            adjust(RAW_FRESH, 200),
        ],
    },
    IngredientRule {
        group: "celery",
        query_terms: &["celery"],
        adjustments: &[
            adjust(&["soup", "salt", "seed", "cream"], -300),
            adjust(RAW_FRESH, 200),
        ],
    },
    IngredientRule {
        group: "asparagus",
        query_terms: &["asparagus"],
        adjustments: &[
            adjust(&["canned", "soup", "frozen"], -300),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "zucchini/squash",
        query_terms: &["zucchini", "squash"],
        adjustments: &[
            adjust(&["fried", "breaded", "bread", "canned", "soup", "frozen"], -300),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
    IngredientRule {
        group: "vegetables",
        query_terms: &["vegetable", "veggies"],
        adjustments: &[
            adjust(&["canned", "soup", "juice", "frozen", "cocktail"], -300),
            adjust(COOKED, -100),
            adjust(RAW_FRESH, 150),
        ],
    },
];

/// Default misleading co-occurrence penalties
pub const DEFAULT_CROSS_CATEGORY_RULES: &[CrossCategoryRule] = &[
    CrossCategoryRule {
        query_term: "steak",
        text_keyword: "fries",
        weight: -300,
    },
    CrossCategoryRule {
        query_term: "potato",
        text_keyword: "chips",
        weight: -300,
    },
    CrossCategoryRule {
        query_term: "rice",
        text_keyword: "pudding",
        weight: -300,
    },
];

/// Keywords that mark a processed or prepared product for simple-food queries
pub const DEFAULT_PROCESSED_KEYWORDS: &[&str] = &[
    "pie", "cake", "cookie", "croissant", "bread", "muffin", "pastry", "doughnut", "cooked",
    "prepared", "canned", "frozen",
];

/// Scoring weights and rule tables for the relevance ranker
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Name equals query
    pub exact_match_bonus: i64,
    /// Name starts with query
    pub prefix_match_bonus: i64,
    /// Query is a whole word of the name
    pub whole_word_bonus: i64,
    /// Name contains query
    pub substring_bonus: i64,
    /// Per query token present in name or description
    pub token_present_bonus: i64,
    /// Per query token that starts the name
    pub token_leads_name_bonus: i64,
    /// Per query token in modifier position (after a comma)
    pub token_after_comma_penalty: i64,
    /// Candidates matched only through an alias
    pub alias_match_penalty: i64,
    /// Simple-food query and the name has a comma
    pub simple_food_comma_penalty: i64,
    /// Simple-food query and the text has a processed keyword
    pub simple_food_processed_penalty: i64,
    /// Longest single-token query treated as simple
    pub simple_food_max_len: usize,
    /// Processed-food keywords
    pub processed_keywords: &'static [&'static str],
    /// Preparation-state rules
    pub ingredient_rules: &'static [IngredientRule],
    /// Misleading co-occurrence rules
    pub cross_category_rules: &'static [CrossCategoryRule],
    /// Minimum best score for a local catalog match to be accepted
    pub local_match_threshold: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            exact_match_bonus: search::EXACT_MATCH_BONUS,
            prefix_match_bonus: search::PREFIX_MATCH_BONUS,
            whole_word_bonus: search::WHOLE_WORD_BONUS,
            substring_bonus: search::SUBSTRING_BONUS,
            token_present_bonus: search::TOKEN_PRESENT_BONUS,
            token_leads_name_bonus: search::TOKEN_LEADS_NAME_BONUS,
            token_after_comma_penalty: search::TOKEN_AFTER_COMMA_PENALTY,
            alias_match_penalty: search::ALIAS_MATCH_PENALTY,
            simple_food_comma_penalty: search::SIMPLE_FOOD_COMMA_PENALTY,
            simple_food_processed_penalty: search::SIMPLE_FOOD_PROCESSED_PENALTY,
            simple_food_max_len: search::SIMPLE_FOOD_MAX_LEN,
            processed_keywords: DEFAULT_PROCESSED_KEYWORDS,
            ingredient_rules: DEFAULT_INGREDIENT_RULES,
            cross_category_rules: DEFAULT_CROSS_CATEGORY_RULES,
            local_match_threshold: search::LOCAL_MATCH_THRESHOLD,
        }
    }
}
