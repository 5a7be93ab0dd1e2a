// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, insight variant selection, and upstream provider settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use anyhow::{Context, Result};
use pulse_core::constants::{llm, ports, weather};
use pulse_core::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment type for deployment-specific behaviour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which insight variant the deployment serves
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InsightMode {
    /// One short advisory sentence, no wellness state
    #[default]
    FreeText,
    /// JSON reply carrying an insight and a 1-3 wellness state
    Structured,
}

impl InsightMode {
    /// Parse from string, falling back to free text for unknown values
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for InsightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "free_text" | "freetext" | "text" => Ok(Self::FreeText),
            "structured" | "json" => Ok(Self::Structured),
            other => Err(format!(
                "unknown insight mode '{other}' (expected free_text or structured)"
            )),
        }
    }
}

impl fmt::Display for InsightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeText => write!(f, "free_text"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// Provider base URL
    pub base_url: String,
    /// Provider API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Location queried on every request
    pub location: String,
    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: weather::OPENWEATHER_BASE_URL.to_owned(),
            api_key: None,
            location: weather::DEFAULT_LOCATION.to_owned(),
            request_timeout_seconds: weather::REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Chat-completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmApiConfig {
    /// Base URL of the `OpenAI`-compatible API (ending before `/chat/completions`)
    pub base_url: String,
    /// Bearer token
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for LlmApiConfig {
    fn default() -> Self {
        Self {
            base_url: llm::DEEPSEEK_BASE_URL.to_owned(),
            api_key: None,
            model: llm::DEEPSEEK_MODEL.to_owned(),
            request_timeout_seconds: llm::REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Insight generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Variant served by this deployment
    pub mode: InsightMode,
    /// Output budget for the free-text variant
    pub free_text_max_tokens: u32,
    /// Output budget for the structured variant
    pub structured_max_tokens: u32,
}

impl InsightConfig {
    /// Config for `mode` with the standard output budgets
    #[must_use]
    pub fn for_mode(mode: InsightMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Output budget for the configured mode
    #[must_use]
    pub const fn max_tokens(&self) -> u32 {
        match self.mode {
            InsightMode::FreeText => self.free_text_max_tokens,
            InsightMode::Structured => self.structured_max_tokens,
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            mode: InsightMode::FreeText,
            free_text_max_tokens: llm::FREE_TEXT_MAX_TOKENS,
            structured_max_tokens: llm::STRUCTURED_MAX_TOKENS,
        }
    }
}

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Weather provider settings
    pub weather: WeatherApiConfig,
    /// LLM provider settings
    pub llm: LlmApiConfig,
    /// Insight variant settings
    pub insight: InsightConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: ports::DEFAULT_HOST.to_owned(),
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::Development,
            weather: WeatherApiConfig::default(),
            llm: LlmApiConfig::default(),
            insight: InsightConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let insight_mode = match optional_env("INSIGHT_MODE") {
            Some(raw) => raw
                .parse::<InsightMode>()
                .map_err(anyhow::Error::msg)
                .context("Invalid INSIGHT_MODE")?,
            None => InsightMode::default(),
        };

        Ok(Self {
            host: env_var_or("HOST", ports::DEFAULT_HOST),
            http_port: parse_env_or("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            weather: WeatherApiConfig {
                base_url: env_var_or("OPENWEATHER_API_BASE", weather::OPENWEATHER_BASE_URL),
                api_key: optional_env("OPENWEATHER_API_KEY"),
                location: env_var_or("WEATHER_LOCATION", weather::DEFAULT_LOCATION),
                request_timeout_seconds: parse_env_or(
                    "WEATHER_REQUEST_TIMEOUT_SECS",
                    weather::REQUEST_TIMEOUT_SECS,
                )?,
            },
            llm: LlmApiConfig {
                base_url: env_var_or("DEEPSEEK_API_BASE", llm::DEEPSEEK_BASE_URL),
                api_key: optional_env("DEEPSEEK_API_KEY"),
                model: env_var_or("INSIGHT_LLM_MODEL", llm::DEEPSEEK_MODEL),
                request_timeout_seconds: parse_env_or(
                    "LLM_REQUEST_TIMEOUT_SECS",
                    llm::REQUEST_TIMEOUT_SECS,
                )?,
            },
            insight: InsightConfig::for_mode(insight_mode),
        })
    }

    /// Validate configuration values
    ///
    /// Missing API keys are allowed: the service still answers, with fallback content.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error for a zero port or an empty location/URL
    pub fn validate(&self) -> AppResult<()> {
        if self.http_port == 0 {
            return Err(invalid("HTTP_PORT must be greater than zero"));
        }
        if self.weather.location.trim().is_empty() {
            return Err(invalid("WEATHER_LOCATION must not be empty"));
        }
        if self.weather.base_url.trim().is_empty() {
            return Err(invalid("OPENWEATHER_API_BASE must not be empty"));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(invalid("DEEPSEEK_API_BASE must not be empty"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(invalid("INSIGHT_LLM_MODEL must not be empty"));
        }

        if self.weather.api_key.is_none() {
            warn!("OPENWEATHER_API_KEY is not set; weather_data will always carry an error");
        }
        if self.llm.api_key.is_none() {
            warn!("DEEPSEEK_API_KEY is not set; insights will fall back to canned text");
        }

        Ok(())
    }

    /// Human-readable configuration summary; API keys are never printed
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Wellness Pulse Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Weather: {} ({}), location {}, key {}\n\
             - Insight LLM: {} model {}, key {}\n\
             - Insight Mode: {} (max_tokens {})",
            self.host,
            self.http_port,
            self.environment,
            self.weather.base_url,
            weather::UNITS,
            self.weather.location,
            key_state(self.weather.api_key.as_deref()),
            self.llm.base_url,
            self.llm.model,
            key_state(self.llm.api_key.as_deref()),
            self.insight.mode,
            self.insight.max_tokens(),
        )
    }
}

fn invalid(message: &str) -> AppError {
    AppError::new(ErrorCode::ConfigInvalid, message)
}

const fn key_state(key: Option<&str>) -> &'static str {
    if key.is_some() {
        "configured"
    } else {
        "missing"
    }
}

/// Read a variable, using `default` when unset
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read a variable, treating unset and blank as absent
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse a variable, using `default` when unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .with_context(|| format!("Invalid value for {key}: '{raw}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_mode_parsing() {
        assert_eq!("free_text".parse::<InsightMode>(), Ok(InsightMode::FreeText));
        assert_eq!("free-text".parse::<InsightMode>(), Ok(InsightMode::FreeText));
        assert_eq!("Structured".parse::<InsightMode>(), Ok(InsightMode::Structured));
        assert_eq!(" json ".parse::<InsightMode>(), Ok(InsightMode::Structured));
        assert!("poetry".parse::<InsightMode>().is_err());
        assert_eq!(InsightMode::from_str_or_default("poetry"), InsightMode::FreeText);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("invalid"),
            Environment::Development
        );
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_max_tokens_follow_mode() {
        assert_eq!(InsightConfig::for_mode(InsightMode::FreeText).max_tokens(), 50);
        assert_eq!(InsightConfig::for_mode(InsightMode::Structured).max_tokens(), 100);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_location() {
        let mut config = ServerConfig::default();
        config.weather.location = "   ".into();

        let error = config.validate().unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
        assert!(error.message.contains("WEATHER_LOCATION"));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = ServerConfig {
            http_port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_never_prints_keys() {
        let mut config = ServerConfig::default();
        config.weather.api_key = Some("weather-secret-123".into());
        config.llm.api_key = Some("sk-secret-456".into());

        let summary = config.summary();
        assert!(!summary.contains("weather-secret-123"));
        assert!(!summary.contains("sk-secret-456"));
        assert!(summary.contains("configured"));
        assert!(summary.contains("Bengaluru"));
    }

    #[test]
    fn test_serialized_config_omits_keys() {
        let mut config = ServerConfig::default();
        config.llm.api_key = Some("sk-secret-456".into());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret-456"));
    }
}
