// ABOUTME: Analysis cache constants for TTL, snapshot schema version, and key prefixes
// ABOUTME: Shared by the cache service, its persistence layer, and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Entries older than this are treated as stale on lookup
pub const ANALYSIS_TTL_DAYS: i64 = 30;

/// Current schema version written into every snapshot and entry
pub const CACHE_SCHEMA_VERSION: u32 = 2;

/// Key prefix for entries identified by an image fingerprint
pub const IMAGE_KEY_PREFIX: &str = "img:";

/// Key prefix for entries identified by normalized name and modality
pub const TEXT_KEY_PREFIX: &str = "txt:";

/// File name of the snapshot inside the data directory
pub const SNAPSHOT_FILE_NAME: &str = "analysis_cache.json";

/// Directory name of the image blob area inside the data directory
pub const BLOB_DIR_NAME: &str = "images";

/// Remote client response cache TTL (24 hours)
pub const REMOTE_RESPONSE_TTL_SECS: u64 = 86_400;
