// ABOUTME: Chat-completion seam between the insight generator and a language model
// ABOUTME: Defines the prompt message types, the completion reply, and the provider contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! The insight generator talks to a language model only through [`LlmProvider`],
//! so the HTTP client can be replaced by a scripted provider in tests. A request
//! is always one system prompt plus one user prompt with an output budget; the
//! reply is the first choice's text.
//!
//! ```rust,no_run
//! use wellness_pulse::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(
//!         vec![
//!             ChatMessage::system("You are a wellness coach who gives short, friendly advice."),
//!             ChatMessage::user("I slept five hours. Any tips?"),
//!         ],
//!         50,
//!     );
//!     let reply = provider.complete(&request).await;
//! }
//! ```

mod openai_compatible;

pub use openai_compatible::OpenAiCompatibleProvider;

use async_trait::async_trait;
use pulse_core::errors::AppError;
use serde::Serialize;

/// Author of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Coach persona instructions
    System,
    /// Metrics and weather context
    User,
}

/// One prompt message, serialized as `{"role": ..., "content": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Author of the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// User message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Prompt messages plus the output budget for one completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Conversation messages, in order
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens the model may generate
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Request for `messages` capped at `max_tokens`
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            max_tokens,
        }
    }
}

/// Text of the first completion choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// Reply text; empty when the provider sent `null`
    pub content: String,
    /// Model that produced the reply
    pub model: String,
}

/// Chat-completion backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Label used in log fields and error messages (e.g. "DeepSeek")
    fn name(&self) -> &str;

    /// Run one completion
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] classified by failure kind: transport failures are
    /// `EXTERNAL_SERVICE_UNAVAILABLE`, rejected keys `EXTERNAL_AUTH_FAILED`,
    /// throttling `EXTERNAL_RATE_LIMITED`, anything else `EXTERNAL_SERVICE_ERROR`.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}
