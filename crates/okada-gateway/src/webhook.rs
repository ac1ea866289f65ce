// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook request handlers.
//!
//! Twilio posts every inbound WhatsApp message as a form; the handler feeds
//! it through the engine router and answers with TwiML. Engine faults are
//! logged with the offending message and turned into a generic failure
//! reply so the customer is never left without an answer.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use okada_core::types::InboundMessage;

use crate::server::AppState;
use crate::twiml;

/// Inbound webhook form, Twilio's field naming.
#[derive(Debug, Deserialize)]
pub struct TwilioWebhook {
    #[serde(rename = "From", default)]
    pub from: String,

    #[serde(rename = "Body", default)]
    pub body: String,

    /// Attachment count, sent as a string.
    #[serde(rename = "NumMedia", default)]
    pub num_media: Option<String>,
}

impl TwilioWebhook {
    fn into_inbound(self) -> InboundMessage {
        let media_count = self
            .num_media
            .as_deref()
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);
        InboundMessage {
            sender: self.from,
            text: self.body,
            media_count,
        }
    }
}

/// POST /webhook/whatsapp
pub async fn post_whatsapp(
    State(state): State<AppState>,
    Form(form): Form<TwilioWebhook>,
) -> Response {
    let message = form.into_inbound();
    let reply = match state.router.handle(&message).await {
        Ok(reply) => reply,
        Err(error) => {
            tracing::error!(
                sender = %message.sender,
                text = %message.text,
                %error,
                "message handling failed"
            );
            "\u{274c} Server error. Please try again.".to_string()
        }
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/xml")],
        twiml::message_response(&reply),
    )
        .into_response()
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
