// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server built on axum.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router as AxumRouter;
use tower_http::trace::TraceLayer;

use okada_core::OkadaError;
use okada_engine::Router;

use crate::webhook;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The conversation engine handling every inbound message.
    pub router: Arc<Router>,
}

/// Webhook server configuration (mirrors `ServerConfig` from okada-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Start the webhook server. Serves:
/// - POST /webhook/whatsapp (Twilio inbound messages, answered with TwiML)
/// - GET /health (unauthenticated liveness probe)
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), OkadaError> {
    let app = AxumRouter::new()
        .route("/webhook/whatsapp", post(webhook::post_whatsapp))
        .route("/health", get(webhook::get_health))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OkadaError::Gateway {
            message: format!("failed to bind webhook server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Webhook server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| OkadaError::Gateway {
            message: format!("webhook server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
