// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation engine for the Okada delivery bot.
//!
//! [`Router`] is the single entry point: it takes one inbound message and
//! produces one direct reply, persisting session mutations and issuing
//! out-of-band notifications (admin alerts, rider broadcasts) along the way.
//! The flow handlers themselves are pure functions over [`Session`]; all I/O
//! lives in the router, the ledger, and the dispatcher.
//!
//! [`Session`]: okada_core::types::Session

pub mod checkout;
pub mod dispatch;
pub mod errand;
pub mod food;
pub mod ledger;
pub mod locks;
pub mod reply;
pub mod rider;
pub mod router;

pub use router::Router;

use okada_config::OkadaConfig;
use okada_core::types::Money;

/// The slice of configuration the engine needs, flattened out of the full
/// [`OkadaConfig`] so the engine can be constructed in tests without a
/// config file.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Display name used in customer-facing messages.
    pub service_name: String,
    /// Phone identity whose messages are checked against the admin grammar.
    pub admin_phone: String,
    /// Shared secret gating rider registration.
    pub rider_registration_code: String,
    /// Flat delivery fee added to every order.
    pub delivery_fee: Money,
    /// Shopping/service fee added to every errand.
    pub shopping_fee: Money,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
}

impl From<&OkadaConfig> for EngineConfig {
    fn from(config: &OkadaConfig) -> Self {
        Self {
            service_name: config.service.name.clone(),
            admin_phone: config.admin.phone.clone(),
            rider_registration_code: config.rider.registration_code.clone(),
            delivery_fee: config.fees.delivery,
            shopping_fee: config.fees.shopping,
            bank_name: config.payment.bank_name.clone(),
            account_name: config.payment.account_name.clone(),
            account_number: config.payment.account_number.clone(),
        }
    }
}
