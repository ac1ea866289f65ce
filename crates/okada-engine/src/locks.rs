// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-identity session locks.
//!
//! WhatsApp can deliver two messages from the same customer close enough
//! together that their read-modify-write cycles on the session record would
//! interleave. The router serializes handling per sender identity; messages
//! from different identities still run concurrently.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A map of identity -> mutex, created lazily on first contact.
///
/// Locks are never removed; the per-identity cost is one `Arc<Mutex<()>>`
/// and the identity space is bounded by the real customer population.
#[derive(Default)]
pub struct SessionLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one sender identity, waiting if another message
    /// from the same identity is still being handled.
    pub async fn acquire(&self, identity: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(identity.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
