// ABOUTME: Route module organization for the Wellness Pulse HTTP surface
// ABOUTME: Assembles the router with request correlation and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// `GET /` and `POST /` handlers
pub mod wellness;

pub use wellness::{WellnessResponse, WellnessRoutes, UPSTREAM_STATUS_HEADER};

use crate::middleware::{make_request_span, request_id_middleware};
use crate::server::ServerResources;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn create_router(resources: Arc<ServerResources>) -> Router {
    WellnessRoutes::routes(resources)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(middleware::from_fn(request_id_middleware))
}
