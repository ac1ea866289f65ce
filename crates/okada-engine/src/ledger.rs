// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order ledger: creation from payment evidence and the status state
//! machine.
//!
//! Orders exist only after the customer sends a payment screenshot. From
//! there: `pending_payment -> seeking_rider -> rider_accepted -> picked_up
//! -> delivered`, with `pending_payment -> rejected` as the only side
//! branch. Illegal transitions produce corrective reply text, never writes.

use std::fmt::Write;

use chrono::Utc;
use rand::Rng;

use okada_catalog::{format_naira, VENDOR_NAME};
use okada_core::types::{Order, OrderItems, OrderStatus, OrderType, Session};
use okada_core::{MessageGateway, OkadaError, Store};

use crate::{dispatch, EngineConfig};

/// How many random ids we try before giving up. With 9000 possible ids the
/// retry loop only matters under heavy collision, and a bound keeps a full
/// ledger from spinning forever.
const MAX_ID_ATTEMPTS: u32 = 32;

fn random_order_id() -> u32 {
    rand::thread_rng().gen_range(1000..=9999)
}

/// Send a notification that must not fail the main operation.
pub(crate) async fn notify(gateway: &dyn MessageGateway, to: &str, body: &str) {
    if let Err(error) = gateway.send(to, body).await {
        tracing::warn!(recipient = to, %error, "notification delivery failed");
    }
}

/// Create an order from a session whose payment evidence just arrived.
///
/// Allocates a unique 4-digit id, persists the order as `pending_payment`,
/// alerts the admin, and resets the session in place (the caller persists
/// it). Returns the customer-facing acknowledgement.
pub async fn create_order(
    store: &dyn Store,
    gateway: &dyn MessageGateway,
    config: &EngineConfig,
    session: &mut Session,
) -> Result<String, OkadaError> {
    let order_type = session.order_type.unwrap_or(OrderType::Food);
    let items = match order_type {
        OrderType::Food => OrderItems::Food {
            lines: session.cart.clone(),
        },
        OrderType::Errand => OrderItems::Errand {
            items: session.errand_items.clone(),
        },
    };
    let contact_phone = session
        .contact_phone
        .clone()
        .unwrap_or_else(|| session.phone.clone());

    let mut order = Order {
        id: 0,
        customer: session.phone.clone(),
        contact_phone,
        order_type,
        status: OrderStatus::PendingPayment,
        total: session.final_total,
        pickup_location: session
            .pickup_location
            .clone()
            .unwrap_or_else(|| VENDOR_NAME.to_string()),
        delivery_location: session.delivery_location.clone().unwrap_or_default(),
        items,
        rider_phone: None,
        created_at: Utc::now().to_rfc3339(),
    };

    let mut inserted = false;
    for _ in 0..MAX_ID_ATTEMPTS {
        order.id = random_order_id();
        if store.insert_order(&order).await? {
            inserted = true;
            break;
        }
    }
    if !inserted {
        return Err(OkadaError::Internal(
            "could not allocate a unique order id".to_string(),
        ));
    }

    tracing::info!(
        order = order.id,
        customer = %order.customer,
        total = order.total,
        "order created, awaiting payment verification"
    );

    notify(gateway, &config.admin_phone, &admin_payment_alert(&order)).await;

    session.reset();
    Ok(format!(
        "\u{2705} *Order Received!*\n\nYour Order #{} is worth {}.\n\n\
         We are verifying your payment now. You will be notified shortly.",
        order.id,
        format_naira(order.total)
    ))
}

fn admin_payment_alert(order: &Order) -> String {
    let mut items_list = String::new();
    match &order.items {
        OrderItems::Food { lines } => {
            for line in lines {
                let _ = writeln!(items_list, "- {} x{}", line.name, line.quantity);
            }
        }
        OrderItems::Errand { items } => {
            for item in items {
                let _ = writeln!(items_list, "- {}", item.name);
            }
        }
    }
    format!(
        "\u{1f4b3} *NEW PAYMENT ALERT*\n\nOrder ID: #{}\nCustomer: {}\nTotal: {}\nItems:\n{}\n\
         [Check WhatsApp for Screenshot]",
        order.id,
        order.contact_phone,
        format_naira(order.total),
        items_list
    )
}

/// Admin verified the payment: release the order to the rider pool.
pub async fn approve(
    store: &dyn Store,
    gateway: &dyn MessageGateway,
    config: &EngineConfig,
    order_id: u32,
) -> Result<String, OkadaError> {
    let Some(order) = store.get_order(order_id).await? else {
        return Ok(format!("Order #{order_id} not found."));
    };
    if order.status != OrderStatus::PendingPayment {
        return Ok(format!("Order #{order_id} is not awaiting approval."));
    }

    store
        .set_order_status(order_id, OrderStatus::SeekingRider)
        .await?;
    tracing::info!(order = order_id, "order approved, seeking rider");

    notify(
        gateway,
        &order.customer,
        &format!(
            "\u{2705} *Payment Verified*\n\nYour Order #{order_id} has been placed! \
             We are assigning a rider now."
        ),
    )
    .await;

    dispatch::broadcast(store, gateway, config, &order).await?;
    Ok(format!("Order #{order_id} Approved."))
}

/// Admin could not find the payment: close the order out.
pub async fn reject(
    store: &dyn Store,
    gateway: &dyn MessageGateway,
    order_id: u32,
) -> Result<String, OkadaError> {
    let Some(order) = store.get_order(order_id).await? else {
        return Ok(format!("Order #{order_id} not found."));
    };
    if order.status != OrderStatus::PendingPayment {
        return Ok(format!("Order #{order_id} is not awaiting approval."));
    }

    store
        .set_order_status(order_id, OrderStatus::Rejected)
        .await?;
    tracing::info!(order = order_id, "order rejected");

    notify(
        gateway,
        &order.customer,
        &format!(
            "\u{274c} *Payment Not Found*\n\nWe could not verify your payment for \
             Order #{order_id}. Please contact Admin or try again."
        ),
    )
    .await;

    Ok(format!("Order #{order_id} Rejected."))
}

/// Rider reports the goods collected. Only the assigned rider may do this,
/// and only once, from `rider_accepted`.
pub async fn picked_up(
    store: &dyn Store,
    gateway: &dyn MessageGateway,
    order_id: u32,
    caller: &str,
) -> Result<String, OkadaError> {
    let Some(order) = store.get_order(order_id).await? else {
        return Ok(format!("Order #{order_id} not found."));
    };
    if order.rider_phone.as_deref() != Some(caller) {
        return Ok("Not your order.".to_string());
    }
    if order.status != OrderStatus::RiderAccepted {
        return Ok(format!("Order #{order_id} cannot be marked as picked up."));
    }

    store
        .set_order_status(order_id, OrderStatus::PickedUp)
        .await?;
    notify(
        gateway,
        &order.customer,
        &format!("\u{1f6f5} Your Order #{order_id} has been picked up and is on its way."),
    )
    .await;

    Ok(format!("\u{2705} Order #{order_id} marked as Picked Up."))
}

/// Rider reports delivery complete. Legal from `rider_accepted` (the
/// pickup report is optional) or `picked_up`.
pub async fn delivered(
    store: &dyn Store,
    gateway: &dyn MessageGateway,
    config: &EngineConfig,
    order_id: u32,
    caller: &str,
) -> Result<String, OkadaError> {
    let Some(order) = store.get_order(order_id).await? else {
        return Ok(format!("Order #{order_id} not found."));
    };
    if order.rider_phone.as_deref() != Some(caller) {
        return Ok("Not your order.".to_string());
    }
    if !matches!(
        order.status,
        OrderStatus::RiderAccepted | OrderStatus::PickedUp
    ) {
        return Ok(format!("Order #{order_id} cannot be marked as delivered."));
    }

    store
        .set_order_status(order_id, OrderStatus::Delivered)
        .await?;
    tracing::info!(order = order_id, rider = caller, "order delivered");

    notify(
        gateway,
        &order.customer,
        &format!(
            "\u{2705} *Order Delivered!*\n\nOrder #{order_id} is complete.\n\n\
             Thank you for using {}! \u{1f37d}\u{fe0f}",
            config.service_name
        ),
    )
    .await;

    Ok(format!(
        "\u{2705} Order #{order_id} marked as Delivered. Good job!"
    ))
}
