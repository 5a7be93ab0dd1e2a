// ABOUTME: Wellness insight generation over an LLM provider with tagged fallback outcomes
// ABOUTME: Supports free-text and structured (insight + wellness state) deployment variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Insight Generator
//!
//! [`InsightGenerator::generate`] makes one chat-completion call and reports what
//! happened as an [`InsightOutcome`] instead of raising:
//!
//! - `Generated`: the model produced a usable insight
//! - `Degraded`: the model answered, but the structured reply was unusable and
//!   defaults were substituted
//! - `Fallback`: the provider failed, answered non-2xx, or returned nothing
//!
//! The request handler turns a `Fallback` into canned text via
//! [`InsightGenerator::fallback_insight`].

/// Prompt construction for both insight variants
pub mod prompts;

use crate::config::environment::{InsightConfig, InsightMode};
use crate::llm::{ChatRequest, LlmProvider};
use crate::metrics::HealthMetrics;
use crate::weather::WeatherReading;
use pulse_core::constants::fallbacks;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Coarse wellness classification emitted by the structured variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WellnessState {
    /// 1: poor
    Poor,
    /// 2: average
    Average,
    /// 3: good
    Good,
}

impl WellnessState {
    /// Map a 1-3 level to a state
    #[must_use]
    pub const fn from_level(level: u64) -> Option<Self> {
        match level {
            1 => Some(Self::Poor),
            2 => Some(Self::Average),
            3 => Some(Self::Good),
            _ => None,
        }
    }

    /// Numeric level on the wire
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Poor => 1,
            Self::Average => 2,
            Self::Good => 3,
        }
    }

    /// State used whenever a structured insight falls back
    #[must_use]
    pub fn fallback() -> Self {
        Self::from_level(u64::from(fallbacks::WELLNESS_STATE)).unwrap_or(Self::Average)
    }
}

impl From<WellnessState> for u8 {
    fn from(state: WellnessState) -> Self {
        state.level()
    }
}

impl TryFrom<u8> for WellnessState {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::from_level(u64::from(level))
            .ok_or_else(|| format!("wellness state must be 1, 2 or 3, got {level}"))
    }
}

/// Advisory text, plus a wellness state in the structured variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    /// Advice shown to the user; never empty
    pub text: String,
    /// Wellness state, present only in the structured variant
    pub state: Option<WellnessState>,
}

impl Insight {
    /// Free-text insight
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: None,
        }
    }

    /// Structured insight
    #[must_use]
    pub fn structured(text: impl Into<String>, state: WellnessState) -> Self {
        Self {
            text: text.into(),
            state: Some(state),
        }
    }
}

/// What happened while generating an insight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    /// Model produced a usable insight
    Generated(Insight),
    /// Model answered, but defaults replaced some or all of the reply
    Degraded {
        /// Insight after defaults were applied
        insight: Insight,
        /// Why the reply was unusable
        reason: String,
    },
    /// Provider could not be used; the caller supplies canned text
    Fallback {
        /// Why the provider could not be used
        reason: String,
    },
}

impl InsightOutcome {
    /// Short label used in diagnostics
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        match self {
            Self::Generated(_) => "ok",
            Self::Degraded { .. } => "degraded",
            Self::Fallback { .. } => "fallback",
        }
    }
}

impl fmt::Display for InsightOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated(insight) => write!(f, "generated: {}", insight.text),
            Self::Degraded { reason, .. } => write!(f, "degraded: {reason}"),
            Self::Fallback { reason } => write!(f, "fallback: {reason}"),
        }
    }
}

/// Generates wellness insights from metrics and weather
pub struct InsightGenerator {
    provider: Arc<dyn LlmProvider>,
    config: InsightConfig,
}

impl InsightGenerator {
    /// Create a generator over `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: InsightConfig) -> Self {
        Self { provider, config }
    }

    /// Canned insight for a `Fallback` outcome
    #[must_use]
    pub fn fallback_insight(&self) -> Insight {
        match self.config.mode {
            InsightMode::FreeText => Insight::text(fallbacks::FREE_TEXT_INSIGHT),
            InsightMode::Structured => Insight::structured(
                fallbacks::STRUCTURED_UNAVAILABLE_INSIGHT,
                WellnessState::fallback(),
            ),
        }
    }

    /// Ask the model for an insight about `metrics` and `weather`
    ///
    /// `weather` may be error-shaped; it is embedded in the prompt unchanged.
    #[instrument(skip_all, fields(provider = %self.provider.name(), mode = %self.config.mode))]
    pub async fn generate(
        &self,
        metrics: &HealthMetrics,
        weather: &WeatherReading,
    ) -> InsightOutcome {
        let messages = prompts::build_messages(self.config.mode, metrics, weather);
        let request = ChatRequest::new(messages, self.config.max_tokens());

        let response = match self.provider.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Insight provider call failed: {e}");
                return InsightOutcome::Fallback {
                    reason: e.to_string(),
                };
            }
        };

        debug!(
            model = %response.model,
            chars = response.content.len(),
            "Insight reply received"
        );

        let outcome = match self.config.mode {
            InsightMode::FreeText => parse_free_text_reply(&response.content),
            InsightMode::Structured => parse_structured_reply(&response.content),
        };

        if let InsightOutcome::Degraded { reason, .. } | InsightOutcome::Fallback { reason } =
            &outcome
        {
            warn!("Insight reply unusable: {reason}");
        }

        outcome
    }
}

/// Interpret a free-text reply
#[must_use]
pub fn parse_free_text_reply(raw: &str) -> InsightOutcome {
    let text = raw.trim();
    if text.is_empty() {
        InsightOutcome::Fallback {
            reason: "model returned an empty reply".to_owned(),
        }
    } else {
        InsightOutcome::Generated(Insight::text(text))
    }
}

/// Interpret a structured reply: one parse attempt, then per-field defaults
#[must_use]
pub fn parse_structured_reply(raw: &str) -> InsightOutcome {
    let value: Value = match serde_json::from_str(strip_code_fence(raw)) {
        Ok(value) => value,
        Err(e) => {
            return InsightOutcome::Degraded {
                insight: Insight::structured(
                    fallbacks::STRUCTURED_INSIGHT,
                    WellnessState::fallback(),
                ),
                reason: format!("reply is not valid JSON: {e}"),
            };
        }
    };

    let text = value
        .get("insight")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let state = value.get("state").and_then(parse_state);

    match (text, state) {
        (Some(text), Some(state)) => InsightOutcome::Generated(Insight::structured(text, state)),
        (text, state) => {
            let mut missing = Vec::new();
            if text.is_none() {
                missing.push("insight");
            }
            if state.is_none() {
                missing.push("state");
            }
            InsightOutcome::Degraded {
                insight: Insight::structured(
                    text.unwrap_or(fallbacks::STRUCTURED_INSIGHT),
                    state.unwrap_or_else(WellnessState::fallback),
                ),
                reason: format!("reply missing or invalid: {}", missing.join(", ")),
            }
        }
    }
}

fn parse_state(value: &Value) -> Option<WellnessState> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .and_then(WellnessState::from_level)
}

/// Remove a surrounding markdown code fence, if the model added one anyway
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop an info string such as `json` on the opening fence line
    let inner = match inner.split_once('\n') {
        Some((first_line, rest)) if !first_line.trim_start().starts_with('{') => rest,
        _ => inner,
    };
    inner.trim()
}
