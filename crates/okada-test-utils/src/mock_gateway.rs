// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging gateway for deterministic testing.
//!
//! `MockGateway` captures every outbound send for assertion and can be told
//! to fail deliveries to specific recipients, to exercise the non-fatal
//! notification paths.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use okada_core::types::MessageId;
use okada_core::{MessageGateway, OkadaError};

/// One captured outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub body: String,
}

/// A mock gateway recording sends instead of delivering them.
#[derive(Default)]
pub struct MockGateway {
    sent: Mutex<Vec<SentMessage>>,
    failing: Mutex<HashSet<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `recipient` fail from now on.
    pub async fn fail_sends_to(&self, recipient: &str) {
        self.failing.lock().await.insert(recipient.to_string());
    }

    /// All messages sent so far, in order.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Messages sent to one recipient, in order.
    pub async fn sent_to(&self, recipient: &str) -> Vec<SentMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|m| m.to == recipient)
            .cloned()
            .collect()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl MessageGateway for MockGateway {
    async fn send(&self, to: &str, body: &str) -> Result<MessageId, OkadaError> {
        if self.failing.lock().await.contains(to) {
            return Err(OkadaError::Gateway {
                message: format!("mock delivery failure to {to}"),
                source: None,
            });
        }
        let mut sent = self.sent.lock().await;
        let id = MessageId(format!("mock-msg-{}", sent.len() + 1));
        sent.push(SentMessage {
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(id)
    }
}
