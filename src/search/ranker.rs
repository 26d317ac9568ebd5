// ABOUTME: Relevance ranker scoring catalog candidates against a normalized query
// ABOUTME: Popularity base, tiered match bonus, token bonuses, rule tables, simple-food penalties
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use foodlab_core::models::FoodRecord;
use serde::Serialize;
use tracing::trace;

use super::normalize::NormalizedQuery;
use super::rules::rule_adjustments;
use crate::config::search::ScoringConfig;

/// How a candidate was reached during gathering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPath {
    /// The canonical name contains the query
    Name,
    /// Only an alias contains the query
    Alias(String),
}

/// A catalog record gathered for scoring
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Catalog record
    pub record: FoodRecord,
    /// Which text matched
    pub path: MatchPath,
}

impl Candidate {
    /// Candidate matched on its name
    #[must_use]
    pub const fn by_name(record: FoodRecord) -> Self {
        Self {
            record,
            path: MatchPath::Name,
        }
    }

    /// Candidate matched through `alias`
    #[must_use]
    pub fn by_alias(record: FoodRecord, alias: impl Into<String>) -> Self {
        Self {
            record,
            path: MatchPath::Alias(alias.into()),
        }
    }
}

/// A ranked search hit
#[derive(Debug, Clone, Serialize)]
pub struct ScoredFood {
    /// Catalog record
    pub record: FoodRecord,
    /// Relevance score
    pub score: i64,
    /// Whether the winning path was an alias
    pub via_alias: bool,
}

/// Scores and orders catalog candidates
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    config: ScoringConfig,
}

impl RelevanceRanker {
    /// Ranker using the given weights
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Active scoring configuration
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Highest applicable match bonus for `matched` among exact, prefix, whole word, substring
    fn match_bonus(&self, query: &NormalizedQuery, matched: &str) -> i64 {
        let c = &self.config;
        if query.forms().any(|f| matched == f) {
            c.exact_match_bonus
        } else if query.forms().any(|f| matched.starts_with(f)) {
            c.prefix_match_bonus
        } else if query.is_whole_word_of(matched) {
            c.whole_word_bonus
        } else if query.forms().any(|f| matched.contains(f)) {
            c.substring_bonus
        } else {
            0
        }
    }

    /// Score one candidate
    #[must_use]
    pub fn score(&self, query: &NormalizedQuery, candidate: &Candidate) -> i64 {
        let c = &self.config;
        let record = &candidate.record;
        let name = record.name.to_lowercase();
        let text = format!("{name} {}", record.description.to_lowercase());

        let mut score = record.popularity;
        score += match &candidate.path {
            MatchPath::Name => self.match_bonus(query, &name),
            MatchPath::Alias(alias) => {
                self.match_bonus(query, &alias.to_lowercase()) + c.alias_match_penalty
            }
        };

        for token in query.tokens() {
            if text.contains(token.as_str()) {
                score += c.token_present_bonus;
            }
            if name.starts_with(token.as_str()) {
                score += c.token_leads_name_bonus;
            }
            if name.contains(&format!(", {token}")) {
                score += c.token_after_comma_penalty;
            }
        }

        score += rule_adjustments(
            c.ingredient_rules,
            c.cross_category_rules,
            query.tokens(),
            &text,
        );

        if query.is_simple(c.simple_food_max_len) {
            if text.contains(',') {
                score += c.simple_food_comma_penalty;
            }
            let processed = c
                .processed_keywords
                .iter()
                .any(|k| text.contains(k) && !name.starts_with(k));
            if processed {
                score += c.simple_food_processed_penalty;
            }
        }

        trace!(query = query.text(), food = %record.name, score, "scored candidate");
        score
    }

    /// Score, deduplicate by food id keeping the best path, and return up to `limit` hits
    ///
    /// Ties keep catalog order (ascending record id).
    #[must_use]
    pub fn rank(
        &self,
        query: &NormalizedQuery,
        candidates: Vec<Candidate>,
        limit: usize,
    ) -> Vec<ScoredFood> {
        let mut best: HashMap<i64, ScoredFood> = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            let score = self.score(query, &candidate);
            let via_alias = matches!(candidate.path, MatchPath::Alias(_));
            match best.get_mut(&candidate.record.id) {
                Some(existing) if existing.score >= score => {}
                Some(existing) => {
                    existing.score = score;
                    existing.via_alias = via_alias;
                }
                None => {
                    best.insert(
                        candidate.record.id,
                        ScoredFood {
                            record: candidate.record,
                            score,
                            via_alias,
                        },
                    );
                }
            }
        }

        let mut ranked: Vec<ScoredFood> = best.into_values().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.record.id.cmp(&b.record.id)));
        ranked.truncate(limit);
        ranked
    }
}
