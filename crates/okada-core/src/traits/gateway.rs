// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound messaging gateway trait.

use async_trait::async_trait;

use crate::error::OkadaError;
use crate::types::MessageId;

/// Best-effort outbound message delivery to any phone identity.
///
/// Sends to third parties (admin alerts, rider broadcasts, customer status
/// notifications) go through this trait asynchronously, independent of the
/// synchronous reply returned to the message that triggered them. Callers
/// treat failures as non-fatal: log and continue.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Send `body` to the given phone identity.
    async fn send(&self, to: &str, body: &str) -> Result<MessageId, OkadaError>;
}
