// ABOUTME: Re-exports command modules for foodlab-cli
// ABOUTME: Provides access to food lookup and cache management commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod cache;
pub mod food;
