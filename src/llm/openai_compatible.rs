// ABOUTME: OpenAI-compatible chat completion client used for wellness insights
// ABOUTME: Works with DeepSeek, OpenAI, Ollama, vLLM, and any endpoint speaking the same API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Sends `POST {base_url}/chat/completions` with `{model, messages, max_tokens}` and
//! reads `choices[0].message.content`. HTTP failures are classified into
//! [`ErrorCode`]s so callers can log a precise reason before falling back.

use async_trait::async_trait;
use pulse_core::constants::llm;
use pulse_core::errors::{AppError, ErrorCode};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider};
use crate::config::environment::LlmApiConfig;
use crate::utils::http_client::try_create_client;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// Body of `POST /chat/completions`
#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    model: Option<String>,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    name: &'static str,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for the configured endpoint and model
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &LlmApiConfig) -> Result<Self, AppError> {
        let client = try_create_client(config.request_timeout_seconds, llm::CONNECT_TIMEOUT_SECS)
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            name: provider_label(&config.base_url),
        })
    }

    /// Add the bearer header when an API key is configured
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Parse error response from API
    fn parse_error_response(&self, status: StatusCode, body: &str) -> AppError {
        let service = self.name;

        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let detail = error_response.error;
            match status.as_u16() {
                401 | 403 => AppError::new(
                    ErrorCode::ExternalAuthFailed,
                    format!("{service} authentication failed: {}", detail.message),
                ),
                429 => AppError::new(
                    ErrorCode::ExternalRateLimited,
                    extract_rate_limit_message(&detail.message),
                ),
                _ => AppError::external_service(
                    service,
                    format!(
                        "{} ({status}) - {}",
                        detail.error_type.as_deref().unwrap_or("unknown"),
                        detail.message
                    ),
                ),
            }
        } else {
            match status.as_u16() {
                401 | 403 => AppError::new(
                    ErrorCode::ExternalAuthFailed,
                    format!("{service} authentication failed ({status})"),
                ),
                429 => AppError::new(ErrorCode::ExternalRateLimited, RATE_LIMIT_MESSAGE),
                _ => AppError::external_service(
                    service,
                    format!(
                        "API error ({status}): {}",
                        body.chars().take(200).collect::<String>()
                    ),
                ),
            }
        }
    }
}

const RATE_LIMIT_MESSAGE: &str = "LLM rate limit reached. Please wait a moment and try again.";

/// Log label for the endpoint behind `base_url`
fn provider_label(base_url: &str) -> &'static str {
    if base_url.contains("deepseek.com") {
        "DeepSeek"
    } else if base_url.contains("openai.com") {
        "OpenAI"
    } else if base_url.contains(":11434") {
        "Ollama"
    } else {
        "OpenAI-compatible LLM"
    }
}

/// Turn an OpenAI-style "try again in 2.4s" hint into whole seconds
fn extract_rate_limit_message(message: &str) -> String {
    const RETRY_MARKER: &str = "try again in ";

    let seconds = message
        .to_lowercase()
        .find(RETRY_MARKER)
        .and_then(|pos| message.get(pos + RETRY_MARKER.len()..))
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect::<String>()
        })
        .and_then(|digits| digits.parse::<f64>().ok());

    match seconds {
        Some(seconds) => format!(
            "LLM rate limit reached. Please try again in {} seconds.",
            seconds.ceil() as u64
        ),
        None => RATE_LIMIT_MESSAGE.to_owned(),
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        self.name
    }

    #[instrument(skip(self, request), fields(provider = self.name, model = %self.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let body = CompletionBody {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
        };

        debug!(
            "Sending chat completion request with {} messages, max_tokens={}",
            body.messages.len(),
            body.max_tokens
        );

        let http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to {}: {e}", self.name);
                AppError::external_unavailable(self.name, format!("request failed: {e}"))
                    .with_source(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read API response: {e}");
            AppError::external_unavailable(self.name, format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(self.parse_error_response(status, &text));
        }

        let parsed: OpenAiResponse = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse API response: {e}");
            AppError::external_service(self.name, format!("failed to parse response: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(self.name, "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();
        debug!("Received response: {} chars", content.len());

        Ok(ChatResponse {
            content,
            model: parsed.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}
