// ABOUTME: End-to-end tests for GET and POST / against the real router with mocked upstreams
// ABOUTME: Verifies response shape, override echoing, graceful degradation, and diagnostic headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    response::Response,
    Router,
};
use common::{
    completion_body, mount_completion, mount_weather, test_config, test_router, weather_body,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wellness_pulse::config::environment::InsightMode;
use wellness_pulse::constants::metrics::FIELD_NAMES;
use wellness_pulse::routes::UPSTREAM_STATUS_HEADER;
use wiremock::{MockServer, ResponseTemplate};

const FREE_TEXT_FALLBACK: &str = "You're doing well today — keep up your routine!";

struct Upstreams {
    weather: MockServer,
    llm: MockServer,
}

impl Upstreams {
    async fn healthy(reply: &str) -> Self {
        let upstreams = Self {
            weather: MockServer::start().await,
            llm: MockServer::start().await,
        };
        mount_weather(
            &upstreams.weather,
            ResponseTemplate::new(200).set_body_json(weather_body("light rain", 23.5, 88)),
        )
        .await;
        mount_completion(
            &upstreams.llm,
            ResponseTemplate::new(200).set_body_json(completion_body(reply)),
        )
        .await;
        upstreams
    }

    fn router(&self, mode: InsightMode) -> Router {
        test_router(test_config(&self.weather, &self.llm, mode))
    }
}

async fn send(app: Router, method: Method, body: Option<&str>) -> Response {
    let builder = Request::builder().method(method).uri("/");
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn upstream_status(response: &Response) -> String {
    response
        .headers()
        .get(UPSTREAM_STATUS_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned()
}

#[tokio::test]
async fn test_get_returns_full_envelope() {
    let upstreams = Upstreams::healthy("Light rain today, try an indoor workout.").await;

    let response = send(upstreams.router(InsightMode::FreeText), Method::GET, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream_status(&response), "weather=ok; insight=ok");
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await;
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 3, "free-text variant has no state: {body}");

    let health = body["health_data"].as_object().unwrap();
    assert_eq!(health.len(), FIELD_NAMES.len());
    for name in FIELD_NAMES {
        assert!(health.contains_key(name), "missing {name}");
    }

    assert_eq!(
        body["weather_data"],
        json!({"weather": "light rain", "temperature": 23.5, "humidity": 88})
    );
    assert_eq!(body["insight"], "Light rain today, try an indoor workout.");
}

#[tokio::test]
async fn test_post_echoes_overrides() {
    let upstreams = Upstreams::healthy("Nice step count!").await;

    let response = send(
        upstreams.router(InsightMode::FreeText),
        Method::POST,
        Some(r#"{"steps": 9999, "spo2": 97}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["health_data"]["steps"], 9999);
    assert_eq!(body["health_data"]["spo2"], 97);
    let heart_rate = body["health_data"]["continuous_heart_rate"].as_u64().unwrap();
    assert!((60..=100).contains(&heart_rate));
}

#[tokio::test]
async fn test_post_echoes_real_valued_overrides_exactly() {
    let upstreams = Upstreams::healthy("Good rest.").await;

    let response = send(
        upstreams.router(InsightMode::FreeText),
        Method::POST,
        Some(r#"{"sleep_duration_hours": 7, "body_temperature_c": 36.65, "distance_km": 4.0}"#),
    )
    .await;

    let body = json_body(response).await;
    assert_eq!(body["health_data"]["sleep_duration_hours"], json!(7));
    assert!(body["health_data"]["sleep_duration_hours"].is_u64());
    assert_eq!(body["health_data"]["body_temperature_c"], json!(36.65));
    assert_eq!(body["health_data"]["distance_km"], json!(4.0));
    assert!(body["health_data"]["distance_km"].is_f64());
}

#[tokio::test]
async fn test_post_out_of_range_values_are_echoed() {
    let upstreams = Upstreams::healthy("Easy does it.").await;

    let response = send(
        upstreams.router(InsightMode::FreeText),
        Method::POST,
        Some(r#"{"continuous_heart_rate": 185, "sleep_quality": "Poor", "mood": "tired"}"#),
    )
    .await;

    let body = json_body(response).await;
    assert_eq!(body["health_data"]["continuous_heart_rate"], 185);
    assert_eq!(body["health_data"]["sleep_quality"], "Poor");
    assert!(body["health_data"].get("mood").is_none());
}

#[tokio::test]
async fn test_post_with_empty_body_behaves_like_get() {
    let upstreams = Upstreams::healthy("Keep it up.").await;

    let response = send(upstreams.router(InsightMode::FreeText), Method::POST, Some("")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["health_data"].as_object().unwrap().len(), FIELD_NAMES.len());
}

#[tokio::test]
async fn test_post_with_wrong_type_is_rejected() {
    let upstreams = Upstreams::healthy("unused").await;

    let response = send(
        upstreams.router(InsightMode::FreeText),
        Method::POST,
        Some(r#"{"steps": "many"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(upstreams.llm.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_weather_failure_is_reported_in_body() {
    let weather = MockServer::start().await;
    let llm = MockServer::start().await;
    mount_weather(
        &weather,
        ResponseTemplate::new(401).set_body_json(json!({"cod": 401, "message": "Invalid API key"})),
    )
    .await;
    mount_completion(
        &llm,
        ResponseTemplate::new(200).set_body_json(completion_body("Stay cozy indoors.")),
    )
    .await;
    let app = test_router(test_config(&weather, &llm, InsightMode::FreeText));

    let response = send(app, Method::GET, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream_status(&response), "weather=error; insight=ok");
    let body = json_body(response).await;
    assert_eq!(
        body["weather_data"],
        json!({"error": "Weather API failed: Invalid API key"})
    );
    assert_eq!(body["insight"], "Stay cozy indoors.");

    // The error-shaped reading still reaches the model
    let requests = llm.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("Weather API failed: Invalid API key"));
}

#[tokio::test]
async fn test_ai_failure_returns_fallback_text() {
    let weather = MockServer::start().await;
    let llm = MockServer::start().await;
    mount_weather(
        &weather,
        ResponseTemplate::new(200).set_body_json(weather_body("mist", 21.0, 93)),
    )
    .await;
    mount_completion(&llm, ResponseTemplate::new(500).set_body_string("internal error")).await;
    let app = test_router(test_config(&weather, &llm, InsightMode::FreeText));

    let response = send(app, Method::GET, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream_status(&response), "weather=ok; insight=fallback");
    let body = json_body(response).await;
    assert_eq!(body["insight"], FREE_TEXT_FALLBACK);
    assert!(body.get("state").is_none());
}

#[tokio::test]
async fn test_structured_mode_returns_state() {
    let upstreams =
        Upstreams::healthy(r#"{"insight": "Good recovery, go for a run.", "state": 3}"#).await;

    let response = send(upstreams.router(InsightMode::Structured), Method::GET, None).await;

    let body = json_body(response).await;
    assert_eq!(body["insight"], "Good recovery, go for a run.");
    assert_eq!(body["state"], 3);
}

#[tokio::test]
async fn test_structured_mode_malformed_reply_uses_defaults() {
    let upstreams = Upstreams::healthy("{\"insight\": \"unterminated").await;

    let response = send(upstreams.router(InsightMode::Structured), Method::GET, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream_status(&response), "weather=ok; insight=degraded");
    let body = json_body(response).await;
    assert_eq!(body["insight"], "Stay mindful and hydrated.");
    assert_eq!(body["state"], 2);
}

#[tokio::test]
async fn test_structured_mode_ai_failure_returns_unavailable_text() {
    let weather = MockServer::start().await;
    let llm = MockServer::start().await;
    mount_weather(
        &weather,
        ResponseTemplate::new(200).set_body_json(weather_body("clear sky", 30.0, 35)),
    )
    .await;
    mount_completion(&llm, ResponseTemplate::new(429).set_body_string("slow down")).await;
    let app = test_router(test_config(&weather, &llm, InsightMode::Structured));

    let response = send(app, Method::GET, None).await;

    let body = json_body(response).await;
    assert_eq!(body["insight"], "AI unavailable - stay mindful and hydrated.");
    assert_eq!(body["state"], 2);
}

#[tokio::test]
async fn test_inbound_request_id_is_echoed() {
    let upstreams = Upstreams::healthy("Hello.").await;
    let request = Request::builder()
        .uri("/")
        .header("x-request-id", "trace-42")
        .body(Body::empty())
        .unwrap();

    let response = upstreams
        .router(InsightMode::FreeText)
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-42");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let upstreams = Upstreams::healthy("unused").await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = upstreams
        .router(InsightMode::FreeText)
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
