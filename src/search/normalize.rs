// ABOUTME: Query normalization for catalog search (case folding, plural variant, tokens)
// ABOUTME: Precompiles whole-word patterns once per query so scoring stays allocation-light
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;

/// A search query prepared for candidate gathering and scoring
#[derive(Debug, Clone)]
pub struct NormalizedQuery {
    text: String,
    variant: Option<String>,
    tokens: Vec<String>,
    word_patterns: Vec<Regex>,
}

impl NormalizedQuery {
    /// Normalize raw user input; returns `None` for blank queries
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        let variant = plural_variant(&text);
        let tokens = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        let word_patterns = std::iter::once(&text)
            .chain(variant.as_ref())
            .filter_map(|form| Regex::new(&format!(r"\b{}\b", regex::escape(form))).ok())
            .collect();

        Some(Self {
            text,
            variant,
            tokens,
            word_patterns,
        })
    }

    /// Trimmed, lowercased query
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Naive singular/plural counterpart of the query
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Query followed by its variant
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.text.as_str()).chain(self.variant.as_deref())
    }

    /// Whitespace/comma separated query tokens
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether the query is a single short token
    #[must_use]
    pub fn is_simple(&self, max_len: usize) -> bool {
        self.tokens.len() == 1 && self.text.chars().count() <= max_len
    }

    /// Whether any form of the query is a whole word of `text`
    #[must_use]
    pub fn is_whole_word_of(&self, text: &str) -> bool {
        self.word_patterns.iter().any(|re| re.is_match(text))
    }
}

/// Add or strip a trailing "s"
#[must_use]
pub fn plural_variant(text: &str) -> Option<String> {
    match text.strip_suffix('s') {
        Some("") => None,
        Some(singular) => Some(singular.to_owned()),
        None => Some(format!("{text}s")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_lowercases() {
        let q = NormalizedQuery::parse("  Banana  ").unwrap();
        assert_eq!(q.text(), "banana");
        assert_eq!(q.variant(), Some("bananas"));
        assert_eq!(q.tokens(), ["banana"]);
    }

    #[test]
    fn test_blank_query() {
        assert!(NormalizedQuery::parse("   ").is_none());
    }

    #[test]
    fn test_plural_variant() {
        assert_eq!(plural_variant("apples").as_deref(), Some("apple"));
        assert_eq!(plural_variant("apple").as_deref(), Some("apples"));
        assert_eq!(plural_variant("s"), None);
    }

    #[test]
    fn test_whole_word() {
        let q = NormalizedQuery::parse("pea").unwrap();
        assert!(q.is_whole_word_of("soup, pea"));
        assert!(q.is_whole_word_of("split peas, raw"));
        assert!(!q.is_whole_word_of("peanut butter"));
    }

    #[test]
    fn test_simple_query() {
        assert!(NormalizedQuery::parse("banana").unwrap().is_simple(12));
        assert!(!NormalizedQuery::parse("chicken breast").unwrap().is_simple(12));
        assert!(!NormalizedQuery::parse("pomegranatejuice").unwrap().is_simple(12));
    }
}
