// ABOUTME: Error types re-exported from the core crate
// ABOUTME: Single import path for AppError, ErrorCode and AppResult inside the library
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling

pub use foodlab_core::errors::{AppError, AppResult, ErrorCode};
