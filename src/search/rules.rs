// ABOUTME: Interpreter for the declarative ingredient and cross-category scoring rules
// ABOUTME: Each rule is table data; this module only decides activation and sums weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::search::{CrossCategoryRule, IngredientRule};

/// Whether a query token names `term` or one of its simple plurals
#[must_use]
pub fn token_matches_term(token: &str, term: &str) -> bool {
    token
        .strip_prefix(term)
        .is_some_and(|rest| matches!(rest, "" | "s" | "es"))
}

/// Score delta from one ingredient rule, zero when the query does not activate it
#[must_use]
pub fn ingredient_adjustment(rule: &IngredientRule, tokens: &[String], text: &str) -> i64 {
    let active = tokens
        .iter()
        .any(|t| rule.query_terms.iter().any(|term| token_matches_term(t, term)));
    if !active {
        return 0;
    }
    rule.adjustments
        .iter()
        .filter(|adj| adj.keywords.iter().any(|k| text.contains(k)))
        .map(|adj| adj.weight)
        .sum()
}

/// Score delta from one cross-category rule
#[must_use]
pub fn cross_category_adjustment(rule: &CrossCategoryRule, tokens: &[String], text: &str) -> i64 {
    let active = tokens.iter().any(|t| token_matches_term(t, rule.query_term));
    if active && text.contains(rule.text_keyword) {
        rule.weight
    } else {
        0
    }
}

/// Total delta from every rule table
#[must_use]
pub fn rule_adjustments(
    ingredient_rules: &[IngredientRule],
    cross_category_rules: &[CrossCategoryRule],
    tokens: &[String],
    text: &str,
) -> i64 {
    let ingredient: i64 = ingredient_rules
        .iter()
        .map(|r| ingredient_adjustment(r, tokens, text))
        .sum();
    let cross: i64 = cross_category_rules
        .iter()
        .map(|r| cross_category_adjustment(r, tokens, text))
        .sum();
    ingredient + cross
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::search::{DEFAULT_CROSS_CATEGORY_RULES, DEFAULT_INGREDIENT_RULES};

    fn tokens(q: &str) -> Vec<String> {
        q.split_whitespace().map(ToOwned::to_owned).collect()
    }

    fn rule(group: &str) -> &'static IngredientRule {
        DEFAULT_INGREDIENT_RULES
            .iter()
            .find(|r| r.group == group)
            .unwrap()
    }

    #[test]
    fn test_term_matching() {
        assert!(token_matches_term("tomato", "tomato"));
        assert!(token_matches_term("tomatoes", "tomato"));
        assert!(token_matches_term("beans", "bean"));
        assert!(!token_matches_term("peanut", "pea"));
    }

    #[test]
    fn test_tomato_processing_penalty() {
        let t = tokens("tomato");
        assert_eq!(
            ingredient_adjustment(rule("tomato"), &t, "tomato products, canned, sauce"),
            -400
        );
        assert_eq!(
            ingredient_adjustment(rule("tomato"), &t, "tomatoes, red, ripe, raw"),
            200
        );
    }

    #[test]
    fn test_cooked_and_fresh_combine() {
        let t = tokens("spinach");
        assert_eq!(
            ingredient_adjustment(rule("spinach"), &t, "spinach, cooked, boiled"),
            -100
        );
        assert_eq!(
            ingredient_adjustment(rule("spinach"), &t, "spinach, frozen, cooked"),
            -400
        );
    }

    #[test]
    fn test_inactive_rule_is_zero() {
        let t = tokens("apple");
        assert_eq!(
            ingredient_adjustment(rule("tomato"), &t, "tomato sauce, canned"),
            0
        );
    }

    #[test]
    fn test_cross_category() {
        let total = rule_adjustments(
            &[],
            DEFAULT_CROSS_CATEGORY_RULES,
            &tokens("steak"),
            "steak and fries",
        );
        assert_eq!(total, -300);
    }
}
