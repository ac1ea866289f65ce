// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`Store`] implementation for deterministic testing.
//!
//! All three record families live in HashMaps behind a single tokio Mutex,
//! so the acceptance compare-and-set has the same atomicity the SQLite
//! implementation gets from its single UPDATE statement.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use okada_core::types::{Order, OrderStatus, Rider, RiderStatus, Session};
use okada_core::{OkadaError, Store};

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, Session>,
    riders: HashMap<String, Rider>,
    orders: HashMap<u32, Order>,
    forced_collisions: u32,
}

/// A fully in-memory store with the same semantics as [`SqliteStore`].
///
/// [`SqliteStore`]: https://docs.rs/okada-storage
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct order lookup for assertions, bypassing the trait.
    pub async fn order(&self, id: u32) -> Option<Order> {
        self.inner.lock().await.orders.get(&id).cloned()
    }

    /// Number of orders ever created. Useful for asserting that invalid
    /// input created nothing.
    pub async fn order_count(&self) -> usize {
        self.inner.lock().await.orders.len()
    }

    /// Make the next `count` calls to `insert_order` report an id
    /// collision, whatever id they carry. Exercises callers' retry paths.
    pub async fn collide_next_inserts(&self, count: u32) {
        self.inner.lock().await.forced_collisions = count;
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_session(&self, phone: &str) -> Result<Option<Session>, OkadaError> {
        Ok(self.inner.lock().await.sessions.get(phone).cloned())
    }

    async fn put_session(&self, session: &Session) -> Result<(), OkadaError> {
        self.inner
            .lock()
            .await
            .sessions
            .insert(session.phone.clone(), session.clone());
        Ok(())
    }

    async fn get_rider(&self, phone: &str) -> Result<Option<Rider>, OkadaError> {
        Ok(self.inner.lock().await.riders.get(phone).cloned())
    }

    async fn put_rider(&self, rider: &Rider) -> Result<(), OkadaError> {
        self.inner
            .lock()
            .await
            .riders
            .insert(rider.phone.clone(), rider.clone());
        Ok(())
    }

    async fn set_rider_status(
        &self,
        phone: &str,
        status: RiderStatus,
    ) -> Result<(), OkadaError> {
        if let Some(rider) = self.inner.lock().await.riders.get_mut(phone) {
            rider.status = status;
        }
        Ok(())
    }

    async fn riders_on_duty(&self) -> Result<Vec<Rider>, OkadaError> {
        let inner = self.inner.lock().await;
        let mut riders: Vec<Rider> = inner
            .riders
            .values()
            .filter(|r| r.status == RiderStatus::OnDuty)
            .cloned()
            .collect();
        riders.sort_by(|a, b| a.registered_at.cmp(&b.registered_at));
        Ok(riders)
    }

    async fn insert_order(&self, order: &Order) -> Result<bool, OkadaError> {
        let mut inner = self.inner.lock().await;
        if inner.forced_collisions > 0 {
            inner.forced_collisions -= 1;
            return Ok(false);
        }
        if inner.orders.contains_key(&order.id) {
            return Ok(false);
        }
        inner.orders.insert(order.id, order.clone());
        Ok(true)
    }

    async fn get_order(&self, id: u32) -> Result<Option<Order>, OkadaError> {
        Ok(self.inner.lock().await.orders.get(&id).cloned())
    }

    async fn set_order_status(&self, id: u32, status: OrderStatus) -> Result<(), OkadaError> {
        if let Some(order) = self.inner.lock().await.orders.get_mut(&id) {
            order.status = status;
        }
        Ok(())
    }

    async fn assign_rider_if_seeking(
        &self,
        id: u32,
        rider_phone: &str,
    ) -> Result<bool, OkadaError> {
        // Check and write under one lock acquisition: the CAS.
        let mut inner = self.inner.lock().await;
        match inner.orders.get_mut(&id) {
            Some(order) if order.status == OrderStatus::SeekingRider => {
                order.status = OrderStatus::RiderAccepted;
                order.rider_phone = Some(rider_phone.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
