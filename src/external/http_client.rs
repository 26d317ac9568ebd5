// ABOUTME: Pooled HTTP client shared by the remote nutrition tiers
// ABOUTME: Built once by the composition root with configured transport timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::warn;

use crate::config::HttpClientConfig;

/// Build the client used by every remote tier
///
/// Falls back to a default client if the configured builder is rejected.
#[must_use]
pub fn build_http_client(config: HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(concat!("foodlab/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "HTTP client builder failed, using defaults");
            Client::new()
        })
}
