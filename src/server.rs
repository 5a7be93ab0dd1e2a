// ABOUTME: Shared server resources and the HTTP server lifecycle
// ABOUTME: Wires configuration into the weather service and insight generator, then serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server resources and lifecycle
//!
//! Configuration is read once at startup and injected here; request handlers never
//! consult the environment.

use crate::config::environment::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::insight::InsightGenerator;
use crate::llm::{LlmProvider, OpenAiCompatibleProvider};
use crate::routes::create_router;
use crate::weather::WeatherService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Everything a request handler needs, shared across requests
pub struct ServerResources {
    /// Startup configuration
    pub config: Arc<ServerConfig>,
    /// Weather lookups
    pub weather: WeatherService,
    /// Insight generation
    pub insights: InsightGenerator,
}

impl ServerResources {
    /// Build resources from configuration, using the OpenAI-compatible provider
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM HTTP client cannot be constructed
    pub fn new(config: ServerConfig) -> AppResult<Self> {
        let provider = OpenAiCompatibleProvider::new(&config.llm)?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Build resources around an existing LLM provider
    #[must_use]
    pub fn with_provider(config: ServerConfig, provider: Arc<dyn LlmProvider>) -> Self {
        let weather = WeatherService::new(config.weather.clone());
        let insights = InsightGenerator::new(provider, config.insight.clone());
        Self {
            config: Arc::new(config),
            weather,
            insights,
        }
    }
}

/// Bind `host:http_port` and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails
pub async fn run(resources: ServerResources) -> AppResult<()> {
    let addr = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::config(format!("Failed to bind {addr}: {e}")).with_source(e)
    })?;

    info!("Wellness Pulse listening on http://{addr}");
    serve(listener, Arc::new(resources)).await
}

/// Serve on an already-bound listener until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the server fails while running
pub async fn serve(listener: TcpListener, resources: Arc<ServerResources>) -> AppResult<()> {
    let app = create_router(resources);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")).with_source(e))?;

    info!("Wellness Pulse stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received SIGTERM, shutting down gracefully");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
