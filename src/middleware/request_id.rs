// ABOUTME: Request ID middleware that tags every request and response with a correlation ID
// ABOUTME: Reuses a well-formed inbound x-request-id or generates a fresh UUID v4
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Request correlation
//!
//! [`request_id_middleware`] stores a [`RequestId`] in the request extensions, so
//! handlers can take `Extension<RequestId>`, and echoes it in the `x-request-id`
//! response header. [`make_request_span`] reads the same extension so every log
//! line emitted while serving the request carries the ID.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, Request as HttpRequest},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound request ID that is reused as-is
const MAX_INBOUND_ID_LEN: usize = 128;

/// Correlation ID attached to a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh random ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse a client-supplied ID when it is short printable ASCII
    #[must_use]
    pub fn from_header(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?.trim();
        let acceptable = !value.is_empty()
            && value.len() <= MAX_INBOUND_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic());
        acceptable.then(|| Self(value.to_owned()))
    }

    /// ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attach a [`RequestId`] to the request and echo it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(RequestId::from_header)
        .unwrap_or_else(RequestId::generate);

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Span for one HTTP request, for use with `TraceLayer::make_span_with`
pub fn make_request_span(request: &HttpRequest<Body>) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map_or("unknown", RequestId::as_str);

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_uuids() {
        let id = RequestId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, RequestId::generate());
    }

    #[test]
    fn test_inbound_id_is_reused() {
        let header = HeaderValue::from_static("client-abc-123");
        assert_eq!(
            RequestId::from_header(&header).map(|id| id.to_string()),
            Some("client-abc-123".to_owned())
        );
    }

    #[test]
    fn test_unusable_inbound_ids_are_rejected() {
        assert!(RequestId::from_header(&HeaderValue::from_static("   ")).is_none());
        assert!(RequestId::from_header(&HeaderValue::from_static("has space")).is_none());
        let long = "x".repeat(MAX_INBOUND_ID_LEN + 1);
        let header = HeaderValue::from_str(&long).unwrap();
        assert!(RequestId::from_header(&header).is_none());
    }
}
