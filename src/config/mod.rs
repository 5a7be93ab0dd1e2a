// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven configuration built once at startup and injected into components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! Configuration is read from the environment exactly once, when the process starts.
//! The resulting [`environment::ServerConfig`] is passed into the weather service and
//! insight generator constructors; nothing on the request path reads the environment.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    Environment, InsightConfig, InsightMode, LlmApiConfig, ServerConfig, WeatherApiConfig,
};
