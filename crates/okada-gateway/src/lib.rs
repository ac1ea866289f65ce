// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio WhatsApp edge for the Okada delivery bot.
//!
//! Two halves: the inbound webhook server (axum, answering each message
//! with TwiML) and the outbound [`TwilioGateway`] used for out-of-band
//! notifications (admin alerts, rider broadcasts). The engine stays
//! transport-agnostic; everything Twilio-shaped lives here.

pub mod server;
pub mod twilio;
pub mod twiml;
pub mod webhook;

pub use server::{start_server, AppState, ServerConfig};
pub use twilio::TwilioGateway;
