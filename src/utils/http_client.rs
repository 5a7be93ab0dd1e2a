// ABOUTME: Shared HTTP client construction with timeout configuration
// ABOUTME: Used by the upstream weather and LLM clients so both build clients the same way
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails, so callers never have to
/// handle a construction error on the request path.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a new HTTP client, surfacing builder failures to the caller
///
/// # Errors
///
/// Returns the builder error if the TLS backend cannot be initialized
pub fn try_create_client(
    timeout_secs: u64,
    connect_timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
}
