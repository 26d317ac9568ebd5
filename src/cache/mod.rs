// ABOUTME: Analysis cache holding full food analyses keyed by image fingerprint or subject identity
// ABOUTME: Replace-never-merge writes, 30-day expiry on read, favorites, and companion image blobs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Cache
//!
//! The full entry collection lives in memory behind one async mutex and is
//! written to a snapshot file after every mutation. The mutex makes "remove the
//! old entry for this identity, then insert" a single critical section, so two
//! concurrent saves of the same food can never leave duplicates behind.
//! Snapshots written without that guarantee are deduplicated on load, newest
//! entry winning.
//!
//! Image bytes are kept in a separate [`BlobStore`] keyed by fingerprint. A
//! failure in one store is logged and never rolls back the other.

/// Image blob storage
pub mod blob;
/// Fingerprints, name normalization and cache keys
pub mod identity;
/// Snapshot file format
pub mod persistence;

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use foodlab_core::constants::cache::CACHE_SCHEMA_VERSION;
use foodlab_core::errors::AppResult;
use foodlab_core::models::{CaptureModality, FoodAnalysis};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

pub use blob::{BlobStore, FileBlobStore, InMemoryBlobStore};
pub use identity::{normalize_subject_name, CacheIdentity, ImageFingerprint};
pub use persistence::{CacheSnapshot, SnapshotFile};

use crate::config::AnalysisCacheConfig;

/// One cached analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisCacheEntry {
    /// Content-derived key
    pub cache_key: String,
    /// Subject name as analyzed
    pub subject_name: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Schema version the entry was written with
    #[serde(default = "persistence::legacy_schema_version")]
    pub schema_version: u32,
    /// Full analysis payload
    pub analysis: FoodAnalysis,
    /// Image fingerprint for image analyses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_fingerprint: Option<ImageFingerprint>,
    /// How the subject was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modality: Option<CaptureModality>,
    /// User favorite flag
    #[serde(default)]
    pub is_favorite: bool,
    /// Follow-up suggestions attached after the analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<serde_json::Value>,
}

impl AnalysisCacheEntry {
    /// Identity this entry occupies
    #[must_use]
    pub fn identity(&self) -> CacheIdentity {
        CacheIdentity::new(
            &self.subject_name,
            self.image_fingerprint.as_ref(),
            self.modality,
        )
    }

    /// Whether the entry is older than `ttl` at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now - self.created_at > ttl
    }
}

/// Sort newest first and keep one entry per identity and per cache key
///
/// Returns the dropped entries.
fn keep_newest_per_identity(entries: &mut Vec<AnalysisCacheEntry>) -> Vec<AnalysisCacheEntry> {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let mut identities = HashSet::new();
    let mut keys = HashSet::new();
    let mut dropped = Vec::new();
    for entry in std::mem::take(entries) {
        let fresh_identity = identities.insert(entry.identity());
        let fresh_key = keys.insert(entry.cache_key.clone());
        if fresh_identity && fresh_key {
            entries.push(entry);
        } else {
            dropped.push(entry);
        }
    }
    dropped
}

/// Cache of full food analyses
pub struct AnalysisCache {
    entries: Mutex<Vec<AnalysisCacheEntry>>,
    snapshot: Option<SnapshotFile>,
    blobs: Arc<dyn BlobStore>,
    ttl: TimeDelta,
}

impl AnalysisCache {
    /// File-backed cache from configuration, loading any existing snapshot
    pub async fn open(config: &AnalysisCacheConfig) -> Self {
        Self::with_stores(
            Some(SnapshotFile::new(&config.snapshot_path)),
            Arc::new(FileBlobStore::new(&config.blob_dir)),
            config.ttl,
        )
        .await
    }

    /// Cache over explicit stores; `snapshot: None` keeps everything in memory
    pub async fn with_stores(
        snapshot: Option<SnapshotFile>,
        blobs: Arc<dyn BlobStore>,
        ttl: TimeDelta,
    ) -> Self {
        let mut entries = match &snapshot {
            Some(file) => file.load().await,
            None => Vec::new(),
        };
        let dropped = keep_newest_per_identity(&mut entries);
        info!(entries = entries.len(), "analysis cache loaded");

        let cache = Self {
            entries: Mutex::new(entries),
            snapshot,
            blobs,
            ttl,
        };
        if !dropped.is_empty() {
            warn!(duplicates = dropped.len(), "duplicate analyses dropped from snapshot");
            cache.forget_duplicates(&dropped).await;
        }
        cache
    }

    /// Persist the deduplicated set and delete blobs no surviving entry references
    async fn forget_duplicates(&self, dropped: &[AnalysisCacheEntry]) {
        let entries = self.entries.lock().await;
        if let Err(e) = self.persist(&entries).await {
            warn!(error = %e, "failed to persist deduplicated cache");
        }
        let orphaned: HashSet<ImageFingerprint> = dropped
            .iter()
            .filter_map(|e| e.image_fingerprint.as_ref())
            .filter(|fp| !entries.iter().any(|e| e.image_fingerprint.as_ref() == Some(*fp)))
            .cloned()
            .collect();
        drop(entries);
        for fingerprint in &orphaned {
            self.delete_blob(fingerprint).await;
        }
    }

    /// Memory-only cache with in-memory blobs
    pub async fn in_memory(ttl: TimeDelta) -> Self {
        Self::with_stores(None, Arc::new(InMemoryBlobStore::new()), ttl).await
    }

    /// Expiry window
    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    async fn persist(&self, entries: &MutexGuard<'_, Vec<AnalysisCacheEntry>>) -> AppResult<()> {
        match &self.snapshot {
            Some(file) => file.save(entries).await,
            None => Ok(()),
        }
    }

    async fn delete_blob(&self, fingerprint: &ImageFingerprint) {
        if let Err(e) = self.blobs.delete(fingerprint.as_str()).await {
            warn!(fingerprint = %fingerprint, error = %e, "failed to delete image blob");
        }
    }

    /// Find a live entry; an expired match is removed and reported as a miss
    async fn find_live<F>(&self, matches: F) -> Option<AnalysisCacheEntry>
    where
        F: Fn(&AnalysisCacheEntry) -> bool + Send,
    {
        let mut entries = self.entries.lock().await;
        let index = entries.iter().position(|e| matches(e))?;

        if !entries[index].is_expired(Utc::now(), self.ttl) {
            return Some(entries[index].clone());
        }

        let expired = entries.remove(index);
        info!(cache_key = %expired.cache_key, "expired analysis removed");
        if let Err(e) = self.persist(&entries).await {
            warn!(error = %e, "failed to persist cache after expiry");
        }
        drop(entries);
        if let Some(fingerprint) = &expired.image_fingerprint {
            self.delete_blob(fingerprint).await;
        }
        None
    }

    /// Entry for `cache_key`
    pub async fn get(&self, cache_key: &str) -> Option<AnalysisCacheEntry> {
        self.find_live(|e| e.cache_key == cache_key).await
    }

    /// Entry for an image fingerprint
    pub async fn get_by_image(&self, fingerprint: &ImageFingerprint) -> Option<AnalysisCacheEntry> {
        let identity = CacheIdentity::Image(fingerprint.clone());
        self.find_live(|e| e.identity() == identity).await
    }

    /// Entry for a subject name and modality
    pub async fn get_by_name(
        &self,
        name: &str,
        modality: Option<CaptureModality>,
    ) -> Option<AnalysisCacheEntry> {
        let identity = CacheIdentity::new(name, None, modality);
        self.find_live(|e| e.identity() == identity).await
    }

    /// Insert an analysis, replacing any entry with the same identity or key
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written; the in-memory insert still applies
    pub async fn put(
        &self,
        analysis: FoodAnalysis,
        fingerprint: Option<ImageFingerprint>,
        modality: Option<CaptureModality>,
    ) -> AppResult<AnalysisCacheEntry> {
        let identity = CacheIdentity::new(&analysis.food_name, fingerprint.as_ref(), modality);
        let entry = AnalysisCacheEntry {
            cache_key: identity.cache_key(),
            subject_name: analysis.food_name.clone(),
            created_at: Utc::now(),
            schema_version: CACHE_SCHEMA_VERSION,
            analysis,
            image_fingerprint: fingerprint,
            modality,
            is_favorite: false,
            suggestions: None,
        };

        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| e.cache_key != entry.cache_key && e.identity() != identity);
        let replaced = before - entries.len();
        entries.push(entry.clone());
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(cache_key = %entry.cache_key, replaced, "analysis cached");
        self.persist(&entries).await?;
        Ok(entry)
    }

    /// Store the image blob under its fingerprint, then insert the analysis
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written
    pub async fn put_with_image(
        &self,
        analysis: FoodAnalysis,
        image: &[u8],
        modality: Option<CaptureModality>,
    ) -> AppResult<AnalysisCacheEntry> {
        let fingerprint = ImageFingerprint::of(image);
        if let Err(e) = self.blobs.save(image, fingerprint.as_str()).await {
            warn!(fingerprint = %fingerprint, error = %e, "failed to store image blob");
        }
        self.put(analysis, Some(fingerprint), modality).await
    }

    /// Stored image for a fingerprint
    pub async fn load_image(&self, fingerprint: &ImageFingerprint) -> Option<Bytes> {
        match self.blobs.load(fingerprint.as_str()).await {
            Ok(blob) => blob,
            Err(e) => {
                warn!(fingerprint = %fingerprint, error = %e, "failed to load image blob");
                None
            }
        }
    }

    /// Remove an entry and its image blob; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written
    pub async fn delete(&self, cache_key: &str) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        let Some(index) = entries.iter().position(|e| e.cache_key == cache_key) else {
            return Ok(false);
        };
        let removed = entries.remove(index);
        self.persist(&entries).await?;
        drop(entries);

        if let Some(fingerprint) = &removed.image_fingerprint {
            self.delete_blob(fingerprint).await;
        }
        Ok(true)
    }

    async fn update<F>(&self, cache_key: &str, apply: F) -> AppResult<bool>
    where
        F: FnOnce(&mut AnalysisCacheEntry) + Send,
    {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.iter_mut().find(|e| e.cache_key == cache_key) else {
            return Ok(false);
        };
        apply(entry);
        self.persist(&entries).await?;
        Ok(true)
    }

    /// Set or clear the favorite flag; returns whether the entry exists
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written
    pub async fn set_favorite(&self, cache_key: &str, favorite: bool) -> AppResult<bool> {
        self.update(cache_key, |e| e.is_favorite = favorite).await
    }

    /// Replace the embedded suggestions; returns whether the entry exists
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written
    pub async fn update_suggestions(
        &self,
        cache_key: &str,
        suggestions: serde_json::Value,
    ) -> AppResult<bool> {
        self.update(cache_key, |e| e.suggestions = Some(suggestions))
            .await
    }

    /// Remove every entry and its blob
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written
    pub async fn clear(&self) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        let removed: Vec<AnalysisCacheEntry> = entries.drain(..).collect();
        self.persist(&entries).await?;
        drop(entries);

        for fingerprint in removed.iter().filter_map(|e| e.image_fingerprint.as_ref()) {
            self.delete_blob(fingerprint).await;
        }
        info!(removed = removed.len(), "analysis cache cleared");
        Ok(())
    }

    /// Live entries, newest first
    pub async fn list(&self) -> Vec<AnalysisCacheEntry> {
        let now = Utc::now();
        self.entries
            .lock()
            .await
            .iter()
            .filter(|e| !e.is_expired(now, self.ttl))
            .cloned()
            .collect()
    }

    /// Stored entries including any not yet expired on read
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_expired_get_removes_entry() {
        let cache = AnalysisCache::in_memory(TimeDelta::days(30)).await;
        let entry = cache
            .put(FoodAnalysis::new("Banana", json!({})), None, None)
            .await
            .unwrap();

        cache.entries.lock().await[0].created_at = Utc::now() - TimeDelta::days(31);

        assert!(cache.get(&entry.cache_key).await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[test]
    fn test_entry_expiry_boundary() {
        let now = Utc::now();
        let entry = AnalysisCacheEntry {
            cache_key: "txt:x".to_owned(),
            subject_name: "x".to_owned(),
            created_at: now - TimeDelta::days(30),
            schema_version: CACHE_SCHEMA_VERSION,
            analysis: FoodAnalysis::new("x", serde_json::Value::Null),
            image_fingerprint: None,
            modality: None,
            is_favorite: false,
            suggestions: None,
        };
        assert!(!entry.is_expired(now, TimeDelta::days(30)));
        assert!(entry.is_expired(now + TimeDelta::seconds(1), TimeDelta::days(30)));
    }
}
