// ABOUTME: Logging configuration and structured logging setup for the Wellness Pulse server
// ABOUTME: Configures log levels, output format, and noise reduction for dependency crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging built on `tracing-subscriber`

use crate::config::environment::Environment;
use anyhow::Result;
use pulse_core::constants::service_names;
use serde_json::json;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Dependency crates whose logs are capped regardless of `RUST_LOG`
const NOISE_DIRECTIVES: [&str; 4] = [
    "hyper=warn",
    "hyper_util=warn",
    "reqwest=warn",
    "tower_http=info",
];

/// Logging configuration
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to pretty
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::WELLNESS_PULSE_SERVER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map_or(LogFormat::Pretty, |value| LogFormat::from_str_or_default(&value));
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // Production logs carry full context
        let is_production = Environment::from_str_or_default(&environment).is_production();

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::WELLNESS_PULSE_SERVER.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Filter built from `level` plus the noise-reduction directives
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(&self.level);
        for directive in NOISE_DIRECTIVES {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
        if let Ok(directive) = format!("wellness_pulse={}", self.level).parse() {
            filter = filter.add_directive(directive);
        }
        filter
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Wellness Pulse starting up"
        );

        let logging_summary = json!({
            "level": self.level,
            "format": format!("{:?}", self.format),
            "features": {
                "location": self.include_location,
                "thread": self.include_thread,
                "spans": self.include_spans
            }
        });

        info!("Logging configured: {logging_summary}");
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
