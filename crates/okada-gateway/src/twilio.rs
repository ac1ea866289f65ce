// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound messaging through the Twilio Messages API.
//!
//! The webhook reply covers the direct answer to each inbound message;
//! everything else (admin alerts, rider broadcasts, customer updates) goes
//! out through this gateway.

use async_trait::async_trait;
use serde::Deserialize;

use okada_core::types::MessageId;
use okada_core::{MessageGateway, OkadaError};

/// Twilio credentials and sender identity (mirrors `TwilioConfig` from
/// okada-config).
#[derive(Debug, Clone)]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender identity, e.g. `whatsapp:+14155238886`.
    pub from_number: String,
}

/// [`MessageGateway`] implementation over the Twilio REST API.
pub struct TwilioGateway {
    http: reqwest::Client,
    settings: TwilioSettings,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    sid: String,
}

impl TwilioGateway {
    pub fn new(settings: TwilioSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
            api_base: "https://api.twilio.com".to_string(),
        }
    }

    /// Point the client at a different API host. Test hook.
    #[cfg(test)]
    pub(crate) fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.settings.account_sid
        )
    }
}

#[async_trait]
impl MessageGateway for TwilioGateway {
    async fn send(&self, to: &str, body: &str) -> Result<MessageId, OkadaError> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(&[
                ("From", self.settings.from_number.as_str()),
                ("To", to),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| OkadaError::Gateway {
                message: format!("twilio request to {to} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(OkadaError::Gateway {
                message: format!("twilio rejected message to {to}: {status}: {detail}"),
                source: None,
            });
        }

        let created: MessageCreated =
            response.json().await.map_err(|e| OkadaError::Gateway {
                message: format!("twilio response for {to} was not valid JSON: {e}"),
                source: Some(Box::new(e)),
            })?;
        tracing::debug!(recipient = to, sid = %created.sid, "outbound message delivered");
        Ok(MessageId(created.sid))
    }
}
