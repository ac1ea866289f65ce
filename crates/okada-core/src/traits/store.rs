// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent store trait.
//!
//! Three record families, mirroring the persisted layout:
//! `sessions/<identity>`, `riders/<identity>`, `orders/<id>`.

use async_trait::async_trait;

use crate::error::OkadaError;
use crate::types::{Order, OrderStatus, Rider, RiderStatus, Session};

/// Persistence operations the engine requires.
///
/// `put_*` methods are full overwrites of the record at that key. The one
/// compare-and-set primitive, [`Store::assign_rider_if_seeking`], exists
/// because rider acceptance is a race: the status check and the write must
/// be a single indivisible operation (see the dispatch broadcaster).
#[async_trait]
pub trait Store: Send + Sync {
    // --- Sessions ---

    async fn get_session(&self, phone: &str) -> Result<Option<Session>, OkadaError>;

    async fn put_session(&self, session: &Session) -> Result<(), OkadaError>;

    // --- Riders ---

    async fn get_rider(&self, phone: &str) -> Result<Option<Rider>, OkadaError>;

    async fn put_rider(&self, rider: &Rider) -> Result<(), OkadaError>;

    /// Toggle a rider's duty status in place.
    async fn set_rider_status(
        &self,
        phone: &str,
        status: RiderStatus,
    ) -> Result<(), OkadaError>;

    /// All riders currently eligible for job broadcasts.
    async fn riders_on_duty(&self) -> Result<Vec<Rider>, OkadaError>;

    // --- Orders ---

    /// Insert a new order. Returns `false` (without error) if the id is
    /// already taken, so the ledger can regenerate and retry.
    async fn insert_order(&self, order: &Order) -> Result<bool, OkadaError>;

    async fn get_order(&self, id: u32) -> Result<Option<Order>, OkadaError>;

    /// Unconditional status overwrite. Transition legality is the ledger's
    /// responsibility; acceptance must NOT go through this method.
    async fn set_order_status(&self, id: u32, status: OrderStatus) -> Result<(), OkadaError>;

    /// Atomically set `status = rider_accepted` and `rider_phone` iff the
    /// order is still `seeking_rider`. Returns whether this caller won.
    async fn assign_rider_if_seeking(
        &self,
        id: u32,
        rider_phone: &str,
    ) -> Result<bool, OkadaError>;
}
