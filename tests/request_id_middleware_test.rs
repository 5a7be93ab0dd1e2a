// ABOUTME: Integration tests for the request ID middleware
// ABOUTME: Checks ID generation, inbound ID reuse, and handler access through extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use axum::{
    body::{to_bytes, Body},
    http::{Request as HttpRequest, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use std::error::Error;
use tower::ServiceExt;
use uuid::Uuid;
use wellness_pulse::middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};

async fn echo_handler(Extension(request_id): Extension<RequestId>) -> String {
    format!("Request ID: {}", request_id.as_str())
}

fn app() -> Router {
    Router::new()
        .route("/", get(echo_handler))
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn test_request_id_middleware_generates_uuid() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder().uri("/").body(Body::empty())?;

    let response = app().oneshot(request).await?;

    let header_value = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .ok_or("Request ID header not present")?;
    assert!(
        Uuid::parse_str(header_value.to_str()?).is_ok(),
        "Request ID is not a valid UUID"
    );

    Ok(())
}

#[tokio::test]
async fn test_request_id_matches_handler_extension() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder().uri("/").body(Body::empty())?;

    let response = app().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .ok_or("Request ID header not present")?
        .to_str()?
        .to_owned();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let body_str = String::from_utf8(body.to_vec())?;
    assert_eq!(body_str, format!("Request ID: {header}"));

    Ok(())
}

#[tokio::test]
async fn test_inbound_request_id_is_reused() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "upstream-proxy-7f3a")
        .body(Body::empty())?;

    let response = app().oneshot(request).await?;

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "upstream-proxy-7f3a");
    Ok(())
}

#[tokio::test]
async fn test_each_request_gets_a_distinct_id() -> Result<(), Box<dyn Error>> {
    let first = app()
        .oneshot(HttpRequest::builder().uri("/").body(Body::empty())?)
        .await?;
    let second = app()
        .oneshot(HttpRequest::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_ne!(
        first.headers()[REQUEST_ID_HEADER],
        second.headers()[REQUEST_ID_HEADER]
    );
    Ok(())
}
