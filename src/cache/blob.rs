// ABOUTME: Content-addressed image blob storage keyed by fingerprint
// ABOUTME: File-backed store for production and a DashMap store for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use foodlab_core::errors::{AppError, AppResult};

/// Image blob storage, independent from cache metadata
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, overwriting any previous blob
    async fn save(&self, bytes: &[u8], key: &str) -> AppResult<()>;

    /// Blob under `key`, `None` when absent
    async fn load(&self, key: &str) -> AppResult<Option<Bytes>>;

    /// Remove the blob; removing a missing blob is not an error
    async fn delete(&self, key: &str) -> AppResult<()>;
}

fn validate_key(key: &str) -> AppResult<()> {
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!("invalid blob key '{key}'")))
    }
}

/// Blobs stored as one file per key in a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Store rooted at `dir` (created lazily)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn save(&self, bytes: &[u8], key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let tmp = self.dir.join(format!("{key}.tmp"));
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn load(&self, key: &str) -> AppResult<Option<Bytes>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Blobs kept in memory
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: DashMap<String, Bytes>,
}

impl InMemoryBlobStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no blobs are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn save(&self, bytes: &[u8], key: &str) -> AppResult<()> {
        validate_key(key)?;
        self.blobs.insert(key.to_owned(), Bytes::copy_from_slice(bytes));
        Ok(())
    }

    async fn load(&self, key: &str) -> AppResult<Option<Bytes>> {
        Ok(self.blobs.get(key).map(|b| b.value().clone()))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_blob_roundtrip_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("images"));
        store.save(b"first", "abc123").await.unwrap();
        store.save(b"second", "abc123").await.unwrap();
        assert_eq!(store.load("abc123").await.unwrap().unwrap(), Bytes::from_static(b"second"));

        store.delete("abc123").await.unwrap();
        assert!(store.load("abc123").await.unwrap().is_none());
        store.delete("abc123").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_keys() {
        let store = InMemoryBlobStore::new();
        assert!(store.save(b"x", "../escape").await.is_err());
    }
}
