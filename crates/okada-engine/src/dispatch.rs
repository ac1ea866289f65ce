// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rider dispatch: job broadcasts and the first-acceptance-wins race.
//!
//! A broadcast offers the job to every on-duty rider at once. Acceptance
//! goes through the store's compare-and-set so that exactly one rider wins
//! no matter how close together the replies land; everyone else is told the
//! job is gone.

use futures::future::join_all;

use okada_catalog::format_naira;
use okada_core::types::Order;
use okada_core::{MessageGateway, OkadaError, Store};

use crate::{ledger, EngineConfig};

/// Offer `order` to every on-duty rider. Individual delivery failures are
/// logged and skipped; one unreachable rider must not starve the rest of
/// the pool. Returns how many offers were delivered.
pub async fn broadcast(
    store: &dyn Store,
    gateway: &dyn MessageGateway,
    config: &EngineConfig,
    order: &Order,
) -> Result<usize, OkadaError> {
    let riders = store.riders_on_duty().await?;
    if riders.is_empty() {
        tracing::warn!(order = order.id, "no riders on duty for broadcast");
        return Ok(0);
    }

    let offer = job_offer(order, config);
    let sends = riders.iter().map(|rider| {
        let offer = offer.clone();
        async move {
            match gateway.send(&rider.phone, &offer).await {
                Ok(_) => true,
                Err(error) => {
                    tracing::warn!(
                        order = order.id,
                        rider = %rider.phone,
                        %error,
                        "job offer delivery failed"
                    );
                    false
                }
            }
        }
    });
    let delivered = join_all(sends).await.into_iter().filter(|ok| *ok).count();
    tracing::info!(
        order = order.id,
        riders = riders.len(),
        delivered,
        "job broadcast complete"
    );
    Ok(delivered)
}

fn job_offer(order: &Order, config: &EngineConfig) -> String {
    format!(
        "\u{1f6f5} NEW JOB #{}\n\
         Pickup: {}\n\
         Dropoff: {}\n\
         Customer: {}\n\
         Fee: {}\n\
         Reply: ACCEPT {}",
        order.id,
        order.pickup_location,
        order.delivery_location,
        order.contact_phone,
        format_naira(config.delivery_fee),
        order.id
    )
}

/// One rider replied `accept <id>`. The store's compare-and-set decides the
/// winner; this function only turns the outcome into notifications.
pub async fn accept(
    store: &dyn Store,
    gateway: &dyn MessageGateway,
    config: &EngineConfig,
    order_id: u32,
    rider_phone: &str,
) -> Result<String, OkadaError> {
    if !store.assign_rider_if_seeking(order_id, rider_phone).await? {
        return Ok(if store.get_order(order_id).await?.is_some() {
            "Job already taken or closed.".to_string()
        } else {
            format!("Order #{order_id} not found.")
        });
    }

    tracing::info!(order = order_id, rider = rider_phone, "rider accepted job");

    let rider_name = store
        .get_rider(rider_phone)
        .await?
        .map(|r| r.name)
        .unwrap_or_else(|| "Rider".to_string());

    ledger::notify(
        gateway,
        &config.admin_phone,
        &format!(
            "\u{1f6f5} *RIDER ACCEPTED*\n\nOrder #{order_id}\nRider: {rider_name}\n\
             Phone: {rider_phone}\n\nPlease chat with rider to arrange details."
        ),
    )
    .await;

    if let Some(order) = store.get_order(order_id).await? {
        ledger::notify(
            gateway,
            &order.customer,
            &format!(
                "\u{1f6f5} *Rider Assigned*\n\nOrder #{order_id}\nRider Name: {rider_name}\n\
                 Rider Phone: {rider_phone}\n\nExpect delivery shortly."
            ),
        )
        .await;
    }

    Ok(format!(
        "\u{2705} You have accepted Order #{order_id}. Connect with Admin directly."
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{test_config, ADMIN};
    use okada_core::types::{
        OrderItems, OrderStatus, OrderType, Rider, RiderStatus,
    };
    use okada_test_utils::{MemoryStore, MockGateway};

    const CUSTOMER: &str = "whatsapp:+2348011111111";

    fn seeking_order(id: u32) -> Order {
        Order {
            id,
            customer: CUSTOMER.into(),
            contact_phone: "+2348011111111".into(),
            order_type: OrderType::Food,
            status: OrderStatus::SeekingRider,
            total: 6500,
            pickup_location: "Bissy Joy Eatery".into(),
            delivery_location: "Block C".into(),
            items: OrderItems::Food { lines: vec![] },
            rider_phone: None,
            created_at: "2026-08-25T00:00:00+00:00".into(),
        }
    }

    fn rider(phone: &str, name: &str, status: RiderStatus) -> Rider {
        Rider {
            phone: phone.into(),
            name: name.into(),
            status,
            registered_at: "2026-08-01T00:00:00+00:00".into(),
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_only_on_duty_riders() {
        let store = MemoryStore::new();
        let gateway = MockGateway::new();
        let config = test_config();
        store
            .put_rider(&rider("rider-a", "Ade", RiderStatus::OnDuty))
            .await
            .unwrap();
        store
            .put_rider(&rider("rider-b", "Bola", RiderStatus::Inactive))
            .await
            .unwrap();
        store
            .put_rider(&rider("rider-c", "Chika", RiderStatus::OnDuty))
            .await
            .unwrap();

        let order = seeking_order(1234);
        store.insert_order(&order).await.unwrap();
        let delivered = broadcast(&store, &gateway, &config, &order).await.unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(gateway.sent_to("rider-b").await.len(), 0);
        let offer = &gateway.sent_to("rider-a").await[0].body;
        assert!(offer.contains("NEW JOB #1234"));
        assert!(offer.contains("Pickup: Bissy Joy Eatery"));
        assert!(offer.contains("Fee: \u{20a6}500"));
        assert!(offer.contains("Reply: ACCEPT 1234"));
    }

    #[tokio::test]
    async fn one_unreachable_rider_does_not_starve_the_rest() {
        let store = MemoryStore::new();
        let gateway = MockGateway::new();
        let config = test_config();
        store
            .put_rider(&rider("rider-a", "Ade", RiderStatus::OnDuty))
            .await
            .unwrap();
        store
            .put_rider(&rider("rider-b", "Bola", RiderStatus::OnDuty))
            .await
            .unwrap();
        gateway.fail_sends_to("rider-a").await;

        let order = seeking_order(1235);
        let delivered = broadcast(&store, &gateway, &config, &order).await.unwrap();
        assert_eq!(delivered, 1);
        assert_eq!(gateway.sent_to("rider-b").await.len(), 1);
    }

    #[tokio::test]
    async fn acceptance_assigns_and_notifies_all_parties() {
        let store = MemoryStore::new();
        let gateway = MockGateway::new();
        let config = test_config();
        store
            .put_rider(&rider("rider-a", "Ade", RiderStatus::OnDuty))
            .await
            .unwrap();
        store.insert_order(&seeking_order(2000)).await.unwrap();

        let text = accept(&store, &gateway, &config, 2000, "rider-a")
            .await
            .unwrap();
        assert!(text.contains("You have accepted Order #2000"));

        let order = store.order(2000).await.unwrap();
        assert_eq!(order.status, OrderStatus::RiderAccepted);
        assert_eq!(order.rider_phone.as_deref(), Some("rider-a"));

        assert!(gateway.sent_to(ADMIN).await[0].body.contains("RIDER ACCEPTED"));
        assert!(gateway.sent_to(CUSTOMER).await[0]
            .body
            .contains("Rider Assigned"));
    }

    #[tokio::test]
    async fn second_acceptance_is_refused_without_overwriting() {
        let store = MemoryStore::new();
        let gateway = MockGateway::new();
        let config = test_config();
        store.insert_order(&seeking_order(2001)).await.unwrap();

        accept(&store, &gateway, &config, 2001, "rider-a")
            .await
            .unwrap();
        let text = accept(&store, &gateway, &config, 2001, "rider-b")
            .await
            .unwrap();
        assert_eq!(text, "Job already taken or closed.");
        assert_eq!(
            store.order(2001).await.unwrap().rider_phone.as_deref(),
            Some("rider-a")
        );
    }

    #[tokio::test]
    async fn accepting_unknown_order_names_the_miss() {
        let store = MemoryStore::new();
        let gateway = MockGateway::new();
        let config = test_config();
        let text = accept(&store, &gateway, &config, 7777, "rider-a")
            .await
            .unwrap();
        assert_eq!(text, "Order #7777 not found.");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn simultaneous_acceptances_produce_exactly_one_winner() {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(MockGateway::new());
        let config = test_config();
        store.insert_order(&seeking_order(3000)).await.unwrap();

        let (store_a, gateway_a, config_a) =
            (Arc::clone(&store), Arc::clone(&gateway), config.clone());
        let (store_b, gateway_b, config_b) = (Arc::clone(&store), Arc::clone(&gateway), config);

        let (a, b) = tokio::join!(
            tokio::spawn(async move {
                accept(store_a.as_ref(), gateway_a.as_ref(), &config_a, 3000, "rider-a")
                    .await
                    .unwrap()
            }),
            tokio::spawn(async move {
                accept(store_b.as_ref(), gateway_b.as_ref(), &config_b, 3000, "rider-b")
                    .await
                    .unwrap()
            }),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        let a_won = a.contains("You have accepted");
        let b_won = b.contains("You have accepted");
        assert!(a_won ^ b_won, "exactly one rider must win: {a:?} / {b:?}");
        let loser_text = if a_won { &b } else { &a };
        assert_eq!(loser_text, "Job already taken or closed.");

        let order = store.order(3000).await.unwrap();
        assert_eq!(order.status, OrderStatus::RiderAccepted);
        let winner = if a_won { "rider-a" } else { "rider-b" };
        assert_eq!(order.rider_phone.as_deref(), Some(winner));
    }
}
