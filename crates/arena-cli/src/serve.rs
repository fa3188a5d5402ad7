//! `arena serve`: run the HTTP gateway until Ctrl+C.
//!
//! Startup sequence:
//! 1. Load config (file + env)
//! 2. Build the model registry and comparator
//! 3. Bind the listener
//! 4. Serve with graceful shutdown on Ctrl+C

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use arena_gateway::{router, AppState};

use crate::helpers;

pub async fn run(config_path: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = crate::load(config_path.as_ref());
    let host = host.unwrap_or_else(|| config.gateway.host.clone());
    let port = port.unwrap_or(config.gateway.port);

    let comparator = crate::build_comparator(&config)?;
    let registry = comparator.registry();

    println!();
    helpers::print_banner();
    println!("  Mode:      Gateway");
    println!("  Models:    {}", registry.len());
    for (provider, live) in registry.live_providers() {
        println!("  {:<10} {}", format!("{provider}:"), helpers::mode_label(*live));
    }
    if !registry.live_providers().values().any(|live| *live) {
        warn!("No provider keys configured, every model will answer with a placeholder");
    }

    let state = AppState::new(comparator.clone(), config.gateway.reject_unknown_models);
    let app = router(state);

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("failed to read bound address")?;

    println!("  Listening: {}", format!("http://{local}").cyan());
    println!();
    println!("  Ctrl+C to stop");
    println!();
    info!(addr = %local, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")?;

    println!("  Gateway stopped. Goodbye!");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    println!();
    println!("  Shutting down...");
}
