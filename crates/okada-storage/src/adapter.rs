// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`Store`] trait.

use async_trait::async_trait;

use okada_core::types::{Order, OrderStatus, Rider, RiderStatus, Session};
use okada_core::{OkadaError, Store};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all operations to the typed
/// query modules. All writes funnel through the single tokio-rusqlite
/// background thread.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open (or create) the store at the given database path.
    pub async fn open(path: &str) -> Result<Self, OkadaError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    /// Checkpoint and release the underlying connection.
    pub async fn close(&self) -> Result<(), OkadaError> {
        self.db.close().await
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_session(&self, phone: &str) -> Result<Option<Session>, OkadaError> {
        queries::sessions::get_session(&self.db, phone).await
    }

    async fn put_session(&self, session: &Session) -> Result<(), OkadaError> {
        queries::sessions::put_session(&self.db, session).await
    }

    async fn get_rider(&self, phone: &str) -> Result<Option<Rider>, OkadaError> {
        queries::riders::get_rider(&self.db, phone).await
    }

    async fn put_rider(&self, rider: &Rider) -> Result<(), OkadaError> {
        queries::riders::put_rider(&self.db, rider).await
    }

    async fn set_rider_status(
        &self,
        phone: &str,
        status: RiderStatus,
    ) -> Result<(), OkadaError> {
        queries::riders::set_rider_status(&self.db, phone, status).await
    }

    async fn riders_on_duty(&self) -> Result<Vec<Rider>, OkadaError> {
        queries::riders::riders_on_duty(&self.db).await
    }

    async fn insert_order(&self, order: &Order) -> Result<bool, OkadaError> {
        queries::orders::insert_order(&self.db, order).await
    }

    async fn get_order(&self, id: u32) -> Result<Option<Order>, OkadaError> {
        queries::orders::get_order(&self.db, id).await
    }

    async fn set_order_status(&self, id: u32, status: OrderStatus) -> Result<(), OkadaError> {
        queries::orders::set_order_status(&self.db, id, status).await
    }

    async fn assign_rider_if_seeking(
        &self,
        id: u32,
        rider_phone: &str,
    ) -> Result<bool, OkadaError> {
        queries::orders::assign_rider_if_seeking(&self.db, id, rider_phone).await
    }
}
