// ABOUTME: HTTP middleware for request correlation and structured request logging
// ABOUTME: Exposes request ID generation and the per-request tracing span builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Request ID assignment and propagation
pub mod request_id;

pub use request_id::{make_request_span, request_id_middleware, RequestId, REQUEST_ID_HEADER};
