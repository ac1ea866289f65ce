// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order record operations, including the rider-acceptance compare-and-set.

use std::str::FromStr;

use rusqlite::params;

use okada_core::types::{Order, OrderStatus, OrderType};
use okada_core::OkadaError;

use crate::database::Database;

fn conversion_err(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}

fn row_to_order(row: &rusqlite::Row<'_>) -> Result<Order, rusqlite::Error> {
    let order_type: String = row.get(3)?;
    let status: String = row.get(4)?;
    let items: String = row.get(8)?;
    Ok(Order {
        id: row.get(0)?,
        customer: row.get(1)?,
        contact_phone: row.get(2)?,
        order_type: OrderType::from_str(&order_type).map_err(|e| conversion_err(3, e))?,
        status: OrderStatus::from_str(&status).map_err(|e| conversion_err(4, e))?,
        total: row.get(5)?,
        pickup_location: row.get(6)?,
        delivery_location: row.get(7)?,
        items: serde_json::from_str(&items).map_err(|e| conversion_err(8, e))?,
        rider_phone: row.get(9)?,
        created_at: row.get(10)?,
    })
}

const ORDER_COLUMNS: &str = "id, customer, contact_phone, order_type, status, total,
     pickup_location, delivery_location, items, rider_phone, created_at";

/// Insert a new order. Returns `false` when the id is already taken, so the
/// caller can regenerate and retry (the 4-digit id space is small).
pub async fn insert_order(db: &Database, order: &Order) -> Result<bool, OkadaError> {
    let order = order.clone();
    let items = serde_json::to_string(&order.items).map_err(OkadaError::storage)?;
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO orders
                     (id, customer, contact_phone, order_type, status, total,
                      pickup_location, delivery_location, items, rider_phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    order.id,
                    order.customer,
                    order.contact_phone,
                    order.order_type.to_string(),
                    order.status.to_string(),
                    order.total,
                    order.pickup_location,
                    order.delivery_location,
                    items,
                    order.rider_phone,
                    order.created_at,
                ],
            )?;
            Ok(inserted == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get an order by id.
pub async fn get_order(db: &Database, id: u32) -> Result<Option<Order>, OkadaError> {
    db.connection()
        .call(move |conn| {
            let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");
            let result = conn.query_row(&sql, params![id], row_to_order);
            match result {
                Ok(order) => Ok(Some(order)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Unconditionally overwrite an order's status.
pub async fn set_order_status(
    db: &Database,
    id: u32,
    status: OrderStatus,
) -> Result<(), OkadaError> {
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE orders SET status = ?1 WHERE id = ?2",
                params![status, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Atomic acceptance: assign the rider and advance to `rider_accepted` only
/// if the order is still `seeking_rider`. The status check and the write are
/// one UPDATE statement, so two racing riders cannot both win -- SQLite
/// serializes the statements and the second sees a changed status.
pub async fn assign_rider_if_seeking(
    db: &Database,
    id: u32,
    rider_phone: &str,
) -> Result<bool, OkadaError> {
    let rider_phone = rider_phone.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE orders SET status = 'rider_accepted', rider_phone = ?1
                 WHERE id = ?2 AND status = 'seeking_rider'",
                params![rider_phone, id],
            )?;
            Ok(changed == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
