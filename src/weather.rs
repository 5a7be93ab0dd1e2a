// ABOUTME: Current-weather client for the configured location backed by OpenWeatherMap
// ABOUTME: Folds every provider, transport, and parse failure into an error-shaped reading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weather service integration
//!
//! [`WeatherService::fetch_weather`] never fails: a successful lookup yields
//! [`WeatherReading::Current`], anything else yields [`WeatherReading::Unavailable`]
//! carrying a human-readable reason. No caching and no retries; each request
//! performs exactly one provider call.

use crate::config::environment::WeatherApiConfig;
use crate::utils::http_client::create_client_with_timeout;
use pulse_core::constants::{fallbacks, weather};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::{debug, instrument, warn};

/// Weather service for fetching current conditions
pub struct WeatherService {
    /// HTTP client for weather API requests
    client: Client,
    /// Weather API configuration
    config: WeatherApiConfig,
}

/// Current conditions at a location, serialized as the success shape of `weather_data`
///
/// Numbers are carried as the provider wrote them, so `88` stays an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    /// Provider's condition description (e.g. "light rain")
    #[serde(rename = "weather")]
    pub description: String,
    /// Temperature in Celsius
    #[serde(rename = "temperature")]
    pub temperature_celsius: Number,
    /// Relative humidity percentage
    #[serde(rename = "humidity")]
    pub humidity_percent: Number,
}

/// Outcome of one weather lookup
///
/// Serializes untagged: either the [`WeatherConditions`] object or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherReading {
    /// Provider answered with usable conditions
    Current(WeatherConditions),
    /// Lookup failed; `error` says why
    Unavailable {
        /// Failure reason
        error: String,
    },
}

impl WeatherReading {
    /// True for a successful lookup
    #[must_use]
    pub const fn is_current(&self) -> bool {
        matches!(self, Self::Current(_))
    }

    /// Failure reason, if the lookup failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Current(_) => None,
            Self::Unavailable { error } => Some(error),
        }
    }
}

/// `OpenWeatherMap` current-weather response structure
#[derive(Debug, Deserialize)]
struct OpenWeatherCurrentResponse {
    /// Condition descriptions, most relevant first
    weather: Vec<OpenWeatherCondition>,
    /// Temperature and humidity block
    main: OpenWeatherMain,
}

/// Weather condition description from `OpenWeatherMap`
#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

/// Main measurement block from `OpenWeatherMap`
#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: Number,
    humidity: Number,
}

/// `OpenWeatherMap` error body
#[derive(Debug, Deserialize)]
struct OpenWeatherErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl WeatherService {
    /// Create a new weather service from configuration
    #[must_use]
    pub fn new(config: WeatherApiConfig) -> Self {
        Self {
            client: create_client_with_timeout(
                config.request_timeout_seconds,
                weather::CONNECT_TIMEOUT_SECS,
            ),
            config,
        }
    }

    /// Current conditions at the configured location
    pub async fn current_reading(&self) -> WeatherReading {
        self.fetch_weather(&self.config.location).await
    }

    /// Current conditions at `location`, with failures returned as data
    #[instrument(skip(self), fields(provider = "openweathermap"))]
    pub async fn fetch_weather(&self, location: &str) -> WeatherReading {
        match self.fetch_current(location).await {
            Ok(conditions) => {
                debug!(
                    temperature = %conditions.temperature_celsius,
                    humidity = %conditions.humidity_percent,
                    "Weather lookup succeeded"
                );
                WeatherReading::Current(conditions)
            }
            Err(e) => {
                warn!("Weather lookup failed: {e}");
                WeatherReading::Unavailable {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Fetch current weather from `OpenWeatherMap`
    async fn fetch_current(&self, location: &str) -> Result<WeatherConditions, WeatherError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)?;

        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            weather::CURRENT_WEATHER_PATH
        );

        debug!("Fetching current weather from: {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("appid", api_key), ("units", weather::UNITS)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            let message = serde_json::from_str::<OpenWeatherErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallbacks::WEATHER_UNKNOWN_ERROR.to_owned());
            debug!(%status, "OpenWeather API returned an error status");
            return Err(WeatherError::Provider { message });
        }

        let parsed: OpenWeatherCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or(WeatherError::DataUnavailable)?;

        Ok(WeatherConditions {
            description,
            temperature_celsius: parsed.main.temp,
            humidity_percent: parsed.main.humidity,
        })
    }
}

/// Weather service errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// No API key was configured
    #[error("OpenWeather API key not configured")]
    MissingApiKey,

    /// Provider answered with a status other than 200
    #[error("Weather API failed: {message}")]
    Provider {
        /// Provider's `message` field, or a generic placeholder
        message: String,
    },

    /// Provider answered 200 with a body we could not read
    #[error("Invalid weather response: {0}")]
    InvalidResponse(String),

    /// Provider answered without any condition entry
    #[error("Weather data unavailable: response contained no conditions")]
    DataUnavailable,

    /// Network communication error, with the request URL stripped
    #[error("{0}")]
    Network(reqwest::Error),
}

impl From<reqwest::Error> for WeatherError {
    // The URL carries `appid` in its query string
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.without_url())
    }
}
