// ABOUTME: Wellness pulse route handlers serving health metrics, weather, and an AI insight
// ABOUTME: GET and POST on / run the synthesize, weather, insight pipeline and always answer 200
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Wellness pulse routes
//!
//! `GET /` returns fully randomized metrics. `POST /` accepts a JSON object with any
//! subset of the nine metric fields and echoes those values back. Upstream failures
//! never change the status code; they show up inside `weather_data`, as fallback
//! insight text, and in the `x-upstream-status` response header.

use crate::{
    errors::{AppError, AppResult},
    insight::{Insight, InsightOutcome, WellnessState},
    metrics::{self, HealthMetrics, MetricOverrides},
    server::ServerResources,
    weather::WeatherReading,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Response header summarizing how each upstream call went
pub const UPSTREAM_STATUS_HEADER: &str = "x-upstream-status";

/// Body returned by `GET /` and `POST /`
#[derive(Debug, Clone, Serialize)]
pub struct WellnessResponse {
    /// Metrics used for this request
    pub health_data: HealthMetrics,
    /// Weather reading, success- or error-shaped
    pub weather_data: WeatherReading,
    /// Insight text; never empty
    pub insight: String,
    /// Wellness state, present only in the structured variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<WellnessState>,
}

/// Wellness pulse routes
pub struct WellnessRoutes;

impl WellnessRoutes {
    /// Create the `/` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_get).post(Self::handle_post))
            .with_state(resources)
    }

    /// Handle `GET /`
    async fn handle_get(State(resources): State<Arc<ServerResources>>) -> Response {
        Self::respond(&resources, &MetricOverrides::default()).await
    }

    /// Handle `POST /`
    async fn handle_post(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let overrides = parse_overrides(&body)?;
        Ok(Self::respond(&resources, &overrides).await)
    }

    async fn respond(resources: &ServerResources, overrides: &MetricOverrides) -> Response {
        let health_data = metrics::synthesize(overrides);
        let weather_data = resources.weather.current_reading().await;
        let outcome = resources
            .insights
            .generate(&health_data, &weather_data)
            .await;

        let weather_label = if weather_data.is_current() {
            "ok"
        } else {
            "error"
        };
        let upstream_status = format!(
            "weather={weather_label}; insight={}",
            outcome.status_label()
        );

        let insight = match outcome {
            InsightOutcome::Generated(insight) => insight,
            InsightOutcome::Degraded { insight, reason } => {
                warn!(%reason, "Serving insight with defaults substituted");
                insight
            }
            InsightOutcome::Fallback { reason } => {
                warn!(%reason, "Serving fallback insight");
                resources.insights.fallback_insight()
            }
        };
        let Insight { text, state } = insight;

        info!(
            overrides = overrides.supplied_count(),
            upstream = %upstream_status,
            "Wellness pulse served"
        );

        let body = WellnessResponse {
            health_data,
            weather_data,
            insight: text,
            state,
        };

        let mut response = (StatusCode::OK, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&upstream_status) {
            response.headers_mut().insert(UPSTREAM_STATUS_HEADER, value);
        }
        response
    }
}

/// Parse a POST body into overrides
///
/// An empty, whitespace-only, or `null` body means no overrides.
///
/// # Errors
///
/// Returns `INVALID_INPUT` when the body is not JSON, is not an object, or holds a
/// metric field of the wrong JSON type.
pub fn parse_overrides(body: &[u8]) -> AppResult<MetricOverrides> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MetricOverrides::default());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_input(format!("Request body is not valid JSON: {e}")))?;

    match value {
        Value::Null => Ok(MetricOverrides::default()),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| AppError::invalid_input(format!("Invalid metric override: {e}"))),
        _ => Err(AppError::invalid_input("Request body must be a JSON object")),
    }
}
