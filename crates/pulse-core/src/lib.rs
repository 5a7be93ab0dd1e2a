// ABOUTME: Core types and constants for the Wellness Pulse service
// ABOUTME: Foundation crate with error handling and domain constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pulse Core
//!
//! Foundation crate providing shared types and constants for the Wellness Pulse
//! service. It changes rarely, which keeps incremental builds of the server fast.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorResponse`
//! - **constants**: Metric ranges, provider defaults, and fallback text

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
