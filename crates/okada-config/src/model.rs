// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Okada delivery bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup instead of silently ignoring typos.

use serde::{Deserialize, Serialize};

use okada_core::types::Money;

/// Top-level Okada configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with `OKADA_*`
/// environment variable overrides. All sections default to sensible values;
/// only the secrets (admin phone, rider code, Twilio credentials) genuinely
/// need to be supplied for a real deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OkadaConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Administrator identity.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Rider registration settings.
    #[serde(default)]
    pub rider: RiderConfig,

    /// Fixed service fees.
    #[serde(default)]
    pub fees: FeeConfig,

    /// Payment destination shown to customers at checkout.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Webhook server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Twilio outbound messaging settings.
    #[serde(default)]
    pub twilio: TwilioConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name used in customer-facing messages.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

/// Administrator identity configuration.
///
/// Messages from this phone identity are checked against the admin command
/// grammar before anything else.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Admin phone identity, e.g. `whatsapp:+2348000000000`.
    #[serde(default)]
    pub phone: String,
}

/// Rider registration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RiderConfig {
    /// Shared secret gating `register rider <code> <name>`.
    #[serde(default)]
    pub registration_code: String,
}

/// Fixed fees added at checkout. Not user-editable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeeConfig {
    /// Flat delivery fee added to every order.
    #[serde(default = "default_fee")]
    pub delivery: Money,

    /// Shopping/service fee added to every errand.
    #[serde(default = "default_fee")]
    pub shopping: Money,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            delivery: default_fee(),
            shopping: default_fee(),
        }
    }
}

/// Payment destination details shown once an order is confirmed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentConfig {
    #[serde(default = "default_bank_name")]
    pub bank_name: String,

    #[serde(default = "default_account_name")]
    pub account_name: String,

    #[serde(default = "default_account_number")]
    pub account_number: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            bank_name: default_bank_name(),
            account_name: default_account_name(),
            account_number: default_account_number(),
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Webhook server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Twilio outbound messaging configuration.
///
/// The serve command refuses to start while `account_sid` or `auth_token`
/// is empty; tests inject a mock gateway instead.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,

    #[serde(default)]
    pub auth_token: String,

    /// Sender identity, e.g. `whatsapp:+14155238886`.
    #[serde(default)]
    pub from_number: String,
}

fn default_service_name() -> String {
    "Okada".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fee() -> Money {
    500
}

fn default_bank_name() -> String {
    "Monie Point".to_string()
}

fn default_account_name() -> String {
    "Okada Deliveries".to_string()
}

fn default_account_number() -> String {
    "0000000000".to_string()
}

fn default_database_path() -> String {
    "okada.db".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}
