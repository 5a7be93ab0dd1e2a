// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for metric synthesis, upstream providers, and fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Plausible ranges and wire names for simulated health metrics
pub mod metrics;

/// Service identity used in logs
pub mod service_names {
    /// Name of the HTTP server binary
    pub const WELLNESS_PULSE_SERVER: &str = "wellness-pulse-server";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    /// Default bind host
    pub const DEFAULT_HOST: &str = "127.0.0.1";
}

/// Weather provider defaults
pub mod weather {
    /// `OpenWeatherMap` API base URL
    pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
    /// Current-weather endpoint path
    pub const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
    /// Location queried on every request unless configured otherwise
    pub const DEFAULT_LOCATION: &str = "Bengaluru";
    /// Unit system requested from the provider
    pub const UNITS: &str = "metric";
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
}

/// LLM provider defaults
pub mod llm {
    /// `DeepSeek` chat API base URL
    pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
    /// Model used for insights
    pub const DEEPSEEK_MODEL: &str = "deepseek-chat";
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Output budget for the one-sentence free-text insight
    pub const FREE_TEXT_MAX_TOKENS: u32 = 50;
    /// Output budget for the JSON insight
    pub const STRUCTURED_MAX_TOKENS: u32 = 100;
}

/// Canned text substituted when an upstream call fails
pub mod fallbacks {
    /// Free-text insight shown when the model could not be used
    pub const FREE_TEXT_INSIGHT: &str = "You're doing well today — keep up your routine!";
    /// Structured insight used when the model reply is unusable
    pub const STRUCTURED_INSIGHT: &str = "Stay mindful and hydrated.";
    /// Structured insight used when the model could not be reached
    pub const STRUCTURED_UNAVAILABLE_INSIGHT: &str = "AI unavailable - stay mindful and hydrated.";
    /// Wellness state used whenever a structured insight falls back
    pub const WELLNESS_STATE: u8 = 2;
    /// Weather error text when the provider omits a message
    pub const WEATHER_UNKNOWN_ERROR: &str = "unknown error";
}
