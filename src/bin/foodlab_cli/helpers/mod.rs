// ABOUTME: Re-exports helper modules for foodlab-cli
// ABOUTME: Provides access to display formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
