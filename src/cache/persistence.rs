// ABOUTME: Versioned JSON snapshot of every analysis cache entry
// ABOUTME: Atomic temp-file-and-rename writes; unreadable snapshots start the cache empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use foodlab_core::constants::cache::CACHE_SCHEMA_VERSION;
use foodlab_core::errors::AppResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::AnalysisCacheEntry;

/// Schema version assumed for data written before versioning existed
pub(crate) const fn legacy_schema_version() -> u32 {
    1
}

/// On-disk cache format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Format version of the file
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    /// Entries, newest first
    #[serde(default)]
    pub entries: Vec<AnalysisCacheEntry>,
}

/// Reads and writes the snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Snapshot at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load entries; a missing file is empty, a corrupt one is logged and treated as empty
    pub async fn load(&self) -> Vec<AnalysisCacheEntry> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cache snapshot yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cache snapshot unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<CacheSnapshot>(&raw) {
            Ok(snapshot) => {
                if snapshot.schema_version > CACHE_SCHEMA_VERSION {
                    warn!(
                        found = snapshot.schema_version,
                        supported = CACHE_SCHEMA_VERSION,
                        "cache snapshot written by a newer version, unknown fields ignored"
                    );
                }
                snapshot.entries
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cache snapshot corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Write all entries as one unit
    ///
    /// # Errors
    ///
    /// Returns a serialization or storage error if the snapshot cannot be written
    pub async fn save(&self, entries: &[AnalysisCacheEntry]) -> AppResult<()> {
        #[derive(Serialize)]
        struct SnapshotRef<'a> {
            schema_version: u32,
            entries: &'a [AnalysisCacheEntry],
        }

        let body = serde_json::to_vec_pretty(&SnapshotRef {
            schema_version: CACHE_SCHEMA_VERSION,
            entries,
        })?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
