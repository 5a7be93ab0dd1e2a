// ABOUTME: Main library entry point for the Wellness Pulse aggregator
// ABOUTME: Combines simulated health metrics, current weather, and an LLM wellness insight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Wellness Pulse
//!
//! A small HTTP service that answers `GET /` and `POST /` with one JSON document:
//! simulated health metrics, the current weather for a fixed location, and a short
//! wellness insight written by an OpenAI-compatible chat model.
//!
//! ## Architecture
//!
//! - **Metrics**: random synthesis within plausible ranges, with client overrides
//! - **Weather**: one `OpenWeatherMap` lookup per request, failures returned as data
//! - **Insight**: one chat completion per request, with canned fallbacks
//! - **Routes**: the `/` handler that always answers 200
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wellness_pulse::config::environment::ServerConfig;
//! use wellness_pulse::server::{run, ServerResources};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::new(config)?;
//!     run(resources).await?;
//!     Ok(())
//! }
//! ```

/// Environment-driven server configuration
pub mod config;

/// Unified error handling
pub use pulse_core::errors;

/// Service-wide constants
pub use pulse_core::constants;

/// Wellness insight generation
pub mod insight;

/// LLM provider abstraction and the OpenAI-compatible client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Simulated health metrics
pub mod metrics;

/// HTTP middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Server resources and lifecycle
pub mod server;

/// Shared utilities
pub mod utils;

/// Current-weather lookups
pub mod weather;
