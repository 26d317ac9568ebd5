// ABOUTME: Analysis cache identities: SHA-256 image fingerprints and normalized subject names
// ABOUTME: Derives the content-based cache key that guarantees one entry per identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use foodlab_core::constants::cache::{IMAGE_KEY_PREFIX, TEXT_KEY_PREFIX};
use foodlab_core::errors::{AppError, AppResult};
use foodlab_core::models::CaptureModality;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Deterministic content hash of an image (lowercase SHA-256 hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageFingerprint(String);

impl ImageFingerprint {
    /// Fingerprint image bytes
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    /// Accept an existing fingerprint string
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error unless the value is 64 hex characters
    pub fn parse(value: &str) -> AppResult<Self> {
        let value = value.trim().to_lowercase();
        if value.len() == 64 && value.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(value))
        } else {
            Err(AppError::invalid_input(format!(
                "'{value}' is not a SHA-256 image fingerprint"
            )))
        }
    }

    /// Hex string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, trim, and collapse whitespace and punctuation into single spaces
#[must_use]
pub fn normalize_subject_name(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// What makes two analyses "the same" for caching purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheIdentity {
    /// Image analyses are identified by their fingerprint alone
    Image(ImageFingerprint),
    /// Everything else by normalized name and capture modality
    Subject {
        /// Normalized subject name
        name: String,
        /// Capture modality, part of the identity
        modality: Option<CaptureModality>,
    },
}

impl CacheIdentity {
    /// Identity for an analysis of `name`, preferring the fingerprint when present
    #[must_use]
    pub fn new(
        name: &str,
        fingerprint: Option<&ImageFingerprint>,
        modality: Option<CaptureModality>,
    ) -> Self {
        fingerprint.map_or_else(
            || Self::Subject {
                name: normalize_subject_name(name),
                modality,
            },
            |fp| Self::Image(fp.clone()),
        )
    }

    /// Content-derived cache key
    #[must_use]
    pub fn cache_key(&self) -> String {
        match self {
            Self::Image(fp) => format!("{IMAGE_KEY_PREFIX}{fp}"),
            Self::Subject { name, modality } => {
                let modality = modality.map_or("any", CaptureModality::as_str);
                let digest = Sha256::digest(format!("{modality}\n{name}").as_bytes());
                format!("{TEXT_KEY_PREFIX}{}", hex::encode(digest))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_subject_name() {
        assert_eq!(normalize_subject_name("  Banana  "), "banana");
        assert_eq!(normalize_subject_name("Mac-and-Cheese!!"), "mac and cheese");
        assert_eq!(normalize_subject_name("Green\t  Beans,raw"), "green beans raw");
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = ImageFingerprint::of(b"jpeg bytes");
        let b = ImageFingerprint::of(b"jpeg bytes");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(ImageFingerprint::parse(a.as_str()).is_ok());
        assert!(ImageFingerprint::parse("../etc/passwd").is_err());
    }

    #[test]
    fn test_modality_is_part_of_identity() {
        let typed = CacheIdentity::new("Banana", None, Some(CaptureModality::Typed));
        let spoken = CacheIdentity::new("banana", None, Some(CaptureModality::Spoken));
        let typed_again = CacheIdentity::new(" BANANA ", None, Some(CaptureModality::Typed));
        assert_ne!(typed.cache_key(), spoken.cache_key());
        assert_eq!(typed.cache_key(), typed_again.cache_key());
    }

    #[test]
    fn test_fingerprint_wins_over_name() {
        let fp = ImageFingerprint::of(b"img");
        let a = CacheIdentity::new("apple", Some(&fp), Some(CaptureModality::Image));
        let b = CacheIdentity::new("pear", Some(&fp), None);
        assert_eq!(a, b);
        assert!(a.cache_key().starts_with("img:"));
    }
}
