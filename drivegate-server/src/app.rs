// Copyright 2026 Drivegate Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application initialization and runtime.
//!
//! This module handles:
//! - Backend root preparation
//! - HTTP server setup and routing
//! - CORS construction from configuration
//! - Graceful shutdown

use crate::config::{Config, CorsOrigins};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::ServiceExt;
use drivegate_api::{create_router, AppState};
use drivegate_core::LocalBackend;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tracing::info;

/// Main application.
pub struct App {
    config: Config,
    /// Storage backend over the configured root directory.
    backend: LocalBackend,
}

impl App {
    /// Creates a new application instance.
    ///
    /// Ensures the backend root exists before any request can touch it.
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing drivegate application...");

        tokio::fs::create_dir_all(&config.root)
            .await
            .with_context(|| format!("Failed to create root directory {:?}", config.root))?;

        let backend = LocalBackend::with_capacity(&config.root, config.capacity);

        info!("Backend initialized at {:?}", config.root);

        Ok(Self { config, backend })
    }

    /// Runs the HTTP server until a shutdown signal arrives.
    pub async fn run(self) -> Result<()> {
        info!("Drivegate server starting...");
        info!("Root: {:?}", self.config.root);
        info!("Assets: {:?}", self.config.assets_dir);
        info!(
            "Capacity quota: {} bytes ({:.2} GB)",
            self.config.capacity,
            self.config.capacity as f64 / (1024.0 * 1024.0 * 1024.0)
        );

        let addr: SocketAddr = self.config.bind.parse().context("Invalid bind address")?;

        let cors = build_cors(&self.config.cors)?;
        let state = AppState::new(self.backend, &self.config.assets_dir);
        let router = create_router(state, cors);

        info!("Listening on http://{}", addr);
        run_http_server(addr, router).await
    }
}

/// Builds the CORS layer from configured origins.
fn build_cors(origins: &CorsOrigins) -> Result<CorsLayer> {
    let cors = match origins {
        CorsOrigins::Any => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
        CorsOrigins::List(list) => {
            let parsed: Vec<HeaderValue> = list
                .iter()
                .map(|o| {
                    o.parse::<HeaderValue>()
                        .with_context(|| format!("Invalid CORS origin: {}", o))
                })
                .collect::<Result<_>>()?;
            CorsLayer::new().allow_origin(parsed).allow_methods(Any).allow_headers(Any)
        }
    };
    Ok(cors)
}

/// Runs the HTTP server.
async fn run_http_server(addr: SocketAddr, router: axum::Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    // Trim trailing slashes so "/files/" and "/files" hit the same route
    let app = NormalizePath::trim_trailing_slash(router);

    axum::serve(
        listener,
        ServiceExt::<axum::http::Request<axum::body::Body>>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handles graceful shutdown signals.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown...");
        }
    }
}
