// ABOUTME: Prompt construction for the wellness insight variants
// ABOUTME: Embeds the serialized metrics and weather reading into the coach conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Insight Prompts
//!
//! Both variants share the same system role. The user message carries the full
//! pretty-printed `health_data` and `weather_data` objects, error-shaped weather
//! included, so the model always sees exactly what the client will see.

use crate::config::environment::InsightMode;
use crate::llm::ChatMessage;
use crate::metrics::HealthMetrics;
use crate::weather::WeatherReading;
use serde::Serialize;

/// System role framing the assistant as a wellness coach
pub const WELLNESS_COACH_SYSTEM_PROMPT: &str =
    "You are a wellness coach who gives short, friendly advice.";

/// Build the two-message conversation for `mode`
#[must_use]
pub fn build_messages(
    mode: InsightMode,
    metrics: &HealthMetrics,
    weather: &WeatherReading,
) -> Vec<ChatMessage> {
    let user_prompt = match mode {
        InsightMode::FreeText => free_text_prompt(metrics, weather),
        InsightMode::Structured => structured_prompt(metrics, weather),
    };

    vec![
        ChatMessage::system(WELLNESS_COACH_SYSTEM_PROMPT),
        ChatMessage::user(user_prompt),
    ]
}

/// Prompt asking for one short, positive, actionable sentence
#[must_use]
pub fn free_text_prompt(metrics: &HealthMetrics, weather: &WeatherReading) -> String {
    format!(
        "Based on the following personal wellness and weather data, generate one short, \
         positive, and actionable insight.\n\
         Keep it under 20 words.\n\n\
         {}",
        context_block(metrics, weather)
    )
}

/// Prompt asking for a bare JSON object with an insight and a wellness state
#[must_use]
pub fn structured_prompt(metrics: &HealthMetrics, weather: &WeatherReading) -> String {
    format!(
        "Based on the following personal wellness and weather data, assess the person's \
         overall wellness and give one short, positive, and actionable insight \
         (under 20 words).\n\n\
         {}\n\n\
         Respond with ONLY a JSON object of the form \
         {{\"insight\": \"<advice>\", \"state\": <1, 2 or 3>}} \
         where state 1 = poor, 2 = average, 3 = good.\n\
         Do not output anything else: no markdown, no code fences, no explanation.",
        context_block(metrics, weather)
    )
}

fn context_block(metrics: &HealthMetrics, weather: &WeatherReading) -> String {
    format!(
        "Health Data: {}\nWeather: {}",
        pretty_json(metrics),
        pretty_json(weather)
    )
}

fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_owned())
}
