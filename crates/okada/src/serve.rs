// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `serve` subcommand: wire storage, engine, and gateway together and
//! run the webhook server until it exits.

use std::sync::Arc;

use okada_config::OkadaConfig;
use okada_core::{MessageGateway, OkadaError, Store};
use okada_engine::{EngineConfig, Router};
use okada_gateway::twilio::{TwilioGateway, TwilioSettings};
use okada_gateway::{AppState, ServerConfig};
use okada_storage::SqliteStore;

pub async fn run(config: &OkadaConfig) -> Result<(), OkadaError> {
    if config.twilio.account_sid.is_empty() || config.twilio.auth_token.is_empty() {
        return Err(OkadaError::Config(
            "twilio.account_sid and twilio.auth_token must be set to serve".to_string(),
        ));
    }

    let store = SqliteStore::open(&config.storage.database_path).await?;
    tracing::info!(path = %config.storage.database_path, "storage ready");

    let gateway = TwilioGateway::new(TwilioSettings {
        account_sid: config.twilio.account_sid.clone(),
        auth_token: config.twilio.auth_token.clone(),
        from_number: config.twilio.from_number.clone(),
    });

    let router = Router::new(
        Arc::new(store) as Arc<dyn Store>,
        Arc::new(gateway) as Arc<dyn MessageGateway>,
        EngineConfig::from(config),
    );

    let state = AppState {
        router: Arc::new(router),
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    okada_gateway::start_server(&server_config, state).await
}
