// ABOUTME: Server binary for the Wellness Pulse aggregator
// ABOUTME: Initializes logging, loads configuration, and serves / until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Wellness Pulse Server Binary

use anyhow::Result;
use clap::Parser;
use wellness_pulse::{
    config::environment::{InsightMode, ServerConfig},
    logging,
    server::{self, ServerResources},
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "wellness-pulse-server")]
#[command(about = "Wellness Pulse - health metrics, weather, and an AI wellness insight")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Override insight variant (free_text or structured)
    #[arg(long)]
    insight_mode: Option<InsightMode>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG and LOG_FORMAT may come from .env, so load it before the subscriber
    let dotenv = dotenvy::dotenv();
    logging::init_from_env()?;
    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warn!("No .env file found or failed to load: {e}"),
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(mode) = args.insight_mode {
        config.insight.mode = mode;
    }

    config.validate()?;
    info!("{}", config.summary());

    let resources = ServerResources::new(config)?;

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
