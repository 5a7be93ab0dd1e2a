// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, upstream mock responses, and router construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `wellness_pulse`

use axum::Router;
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use wellness_pulse::config::environment::{InsightConfig, InsightMode, ServerConfig};
use wellness_pulse::routes::create_router;
use wellness_pulse::server::ServerResources;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT_LOGGER: Once = Once::new();

pub const WEATHER_KEY: &str = "test-weather-key";
pub const LLM_KEY: &str = "test-llm-key";
pub const WEATHER_PATH: &str = "/data/2.5/weather";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// `OpenWeatherMap` success body
pub fn weather_body(description: &str, temp: f64, humidity: u32) -> Value {
    json!({
        "coord": {"lon": 77.6, "lat": 12.97},
        "weather": [{"id": 802, "main": "Clouds", "description": description, "icon": "03d"}],
        "main": {"temp": temp, "feels_like": temp + 1.0, "humidity": humidity, "pressure": 1012},
        "name": "Bengaluru",
        "cod": 200
    })
}

/// Chat completion body whose reply is `content`
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 14, "total_tokens": 134}
    })
}

/// Mount a weather response on `server`
pub async fn mount_weather(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Mount a chat completion response on `server`
pub async fn mount_completion(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Configuration pointing both upstreams at mock servers
pub fn test_config(weather: &MockServer, llm: &MockServer, mode: InsightMode) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.weather.base_url = weather.uri();
    config.weather.api_key = Some(WEATHER_KEY.to_owned());
    config.weather.request_timeout_seconds = 5;
    config.llm.base_url = format!("{}/v1", llm.uri());
    config.llm.api_key = Some(LLM_KEY.to_owned());
    config.llm.request_timeout_seconds = 5;
    config.insight = InsightConfig::for_mode(mode);
    config
}

/// Full application router over `config`
pub fn test_router(config: ServerConfig) -> Router {
    init_test_logging();
    let resources = ServerResources::new(config).expect("resources");
    create_router(Arc::new(resources))
}
