// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rider registration and duty toggling.

use chrono::Utc;

use okada_core::types::{Rider, RiderStatus};
use okada_core::{OkadaError, Store};

use crate::EngineConfig;

/// Handle `register rider <code> <name...>`. The command is recognized
/// case-insensitively but the name keeps the sender's casing.
pub async fn register(
    store: &dyn Store,
    config: &EngineConfig,
    sender: &str,
    text: &str,
) -> Result<String, OkadaError> {
    let mut tokens = text.split_whitespace();
    // The router only calls this for `register rider ...` prefixes.
    let _register = tokens.next();
    let _rider = tokens.next();
    let code = tokens.next().unwrap_or_default();
    let name = {
        let rest = tokens.collect::<Vec<_>>().join(" ");
        if rest.is_empty() {
            "Rider".to_string()
        } else {
            rest
        }
    };

    if code != config.rider_registration_code {
        return Ok("\u{274c} Invalid Registration Code.".to_string());
    }

    store
        .put_rider(&Rider {
            phone: sender.to_string(),
            name: name.clone(),
            status: RiderStatus::Inactive,
            registered_at: Utc::now().to_rfc3339(),
        })
        .await?;
    tracing::info!(rider = sender, name = %name, "rider registered");

    Ok(format!(
        "\u{2705} Registration Successful!\n\nWelcome {name}. Text \"ON DUTY\" to start."
    ))
}

pub async fn go_on_duty(store: &dyn Store, sender: &str) -> Result<String, OkadaError> {
    store.set_rider_status(sender, RiderStatus::OnDuty).await?;
    Ok("\u{2705} You are ON DUTY.".to_string())
}

pub async fn go_off_duty(store: &dyn Store, sender: &str) -> Result<String, OkadaError> {
    store
        .set_rider_status(sender, RiderStatus::Inactive)
        .await?;
    Ok("\u{26a0}\u{fe0f} You are OFF DUTY.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;
    use okada_test_utils::MemoryStore;

    const RIDER: &str = "whatsapp:+2348033333333";

    #[tokio::test]
    async fn registration_with_valid_code_creates_inactive_rider() {
        let store = MemoryStore::new();
        let config = test_config();

        let text = register(&store, &config, RIDER, "register rider RIDER2026 Tunde Ade")
            .await
            .unwrap();
        assert!(text.contains("Welcome Tunde Ade"));

        let rider = store.get_rider(RIDER).await.unwrap().unwrap();
        assert_eq!(rider.name, "Tunde Ade");
        assert_eq!(rider.status, RiderStatus::Inactive);
    }

    #[tokio::test]
    async fn wrong_code_registers_nothing() {
        let store = MemoryStore::new();
        let config = test_config();

        let text = register(&store, &config, RIDER, "register rider WRONG Tunde")
            .await
            .unwrap();
        assert!(text.contains("Invalid Registration Code"));
        assert!(store.get_rider(RIDER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_name_defaults_to_rider() {
        let store = MemoryStore::new();
        let config = test_config();

        register(&store, &config, RIDER, "register rider RIDER2026")
            .await
            .unwrap();
        let rider = store.get_rider(RIDER).await.unwrap().unwrap();
        assert_eq!(rider.name, "Rider");
    }

    #[tokio::test]
    async fn duty_toggling_flips_status() {
        let store = MemoryStore::new();
        let config = test_config();
        register(&store, &config, RIDER, "register rider RIDER2026 Tunde")
            .await
            .unwrap();

        go_on_duty(&store, RIDER).await.unwrap();
        assert_eq!(
            store.get_rider(RIDER).await.unwrap().unwrap().status,
            RiderStatus::OnDuty
        );

        go_off_duty(&store, RIDER).await.unwrap();
        assert_eq!(
            store.get_rider(RIDER).await.unwrap().unwrap().status,
            RiderStatus::Inactive
        );
    }
}
