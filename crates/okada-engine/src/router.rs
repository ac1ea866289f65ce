// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message router: one inbound message in, one direct reply out.
//!
//! Role precedence, in order: payment evidence (media), rider registration,
//! admin commands, rider commands, then the customer conversation state
//! machine. The admin and riders fall through to the customer flow when
//! their message matches none of their command grammar, so the same phone
//! can also place orders.

use std::sync::Arc;

use okada_core::types::{ConversationState, InboundMessage, Session};
use okada_core::{MessageGateway, OkadaError, Store};

use crate::locks::SessionLocks;
use crate::{checkout, dispatch, errand, food, ledger, reply, rider, EngineConfig};

pub struct Router {
    store: Arc<dyn Store>,
    gateway: Arc<dyn MessageGateway>,
    config: EngineConfig,
    locks: SessionLocks,
}

impl Router {
    pub fn new(
        store: Arc<dyn Store>,
        gateway: Arc<dyn MessageGateway>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            config,
            locks: SessionLocks::new(),
        }
    }

    /// Handle one inbound message and return the direct reply text.
    ///
    /// Side effects (session writes, order writes, notifications to other
    /// parties) happen before this returns; only genuine faults surface as
    /// errors.
    pub async fn handle(&self, message: &InboundMessage) -> Result<String, OkadaError> {
        let sender = message.sender.as_str();
        let text = message.text.trim();
        let lower = text.to_lowercase();

        tracing::debug!(
            sender,
            media = message.media_count,
            len = text.len(),
            "inbound message"
        );

        // Payment screenshots first: media is only meaningful while a
        // session is awaiting payment.
        if message.media_count > 0 {
            return self.handle_media(sender).await;
        }

        if lower.starts_with("register rider ") {
            return rider::register(self.store.as_ref(), &self.config, sender, text).await;
        }

        if sender == self.config.admin_phone {
            if let Some(reply) = self.handle_admin(&lower).await? {
                return Ok(reply);
            }
        }

        if self.store.get_rider(sender).await?.is_some() {
            if let Some(reply) = self.handle_rider(sender, &lower).await? {
                return Ok(reply);
            }
        }

        self.handle_customer(sender, text, &lower).await
    }

    async fn handle_media(&self, sender: &str) -> Result<String, OkadaError> {
        let _guard = self.locks.acquire(sender).await;
        match self.store.get_session(sender).await? {
            Some(mut session) if session.step == ConversationState::AwaitingPayment => {
                let reply = ledger::create_order(
                    self.store.as_ref(),
                    self.gateway.as_ref(),
                    &self.config,
                    &mut session,
                )
                .await?;
                self.store.put_session(&session).await?;
                Ok(reply)
            }
            _ => Ok(
                "Please complete the text steps first. Reply 'Menu' to restart.".to_string(),
            ),
        }
    }

    /// Admin command grammar. `None` means the message was not an admin
    /// command and should fall through.
    async fn handle_admin(&self, lower: &str) -> Result<Option<String>, OkadaError> {
        if let Some(arg) = lower.strip_prefix("approve ") {
            let reply = match parse_order_id(arg) {
                Some(id) => {
                    ledger::approve(self.store.as_ref(), self.gateway.as_ref(), &self.config, id)
                        .await?
                }
                None => format!("Order #{} not found.", arg.trim()),
            };
            return Ok(Some(reply));
        }
        if let Some(arg) = lower.strip_prefix("reject ") {
            let reply = match parse_order_id(arg) {
                Some(id) => {
                    ledger::reject(self.store.as_ref(), self.gateway.as_ref(), id).await?
                }
                None => format!("Order #{} not found.", arg.trim()),
            };
            return Ok(Some(reply));
        }
        Ok(None)
    }

    /// Rider command grammar, only consulted for registered riders. `None`
    /// falls through to the customer flow.
    async fn handle_rider(
        &self,
        sender: &str,
        lower: &str,
    ) -> Result<Option<String>, OkadaError> {
        match lower {
            "on duty" => return rider::go_on_duty(self.store.as_ref(), sender).await.map(Some),
            "off duty" => {
                return rider::go_off_duty(self.store.as_ref(), sender).await.map(Some);
            }
            "accept" | "delivered" | "picked up" => {
                return Ok(Some(
                    "Please include the order id, e.g. ACCEPT 1234.".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(arg) = lower.strip_prefix("accept ") {
            let reply = match parse_order_id(arg) {
                Some(id) => {
                    dispatch::accept(
                        self.store.as_ref(),
                        self.gateway.as_ref(),
                        &self.config,
                        id,
                        sender,
                    )
                    .await?
                }
                None => format!("Order #{} not found.", arg.trim()),
            };
            return Ok(Some(reply));
        }
        if let Some(arg) = lower.strip_prefix("picked up ") {
            let reply = match parse_order_id(arg) {
                Some(id) => {
                    ledger::picked_up(self.store.as_ref(), self.gateway.as_ref(), id, sender)
                        .await?
                }
                None => format!("Order #{} not found.", arg.trim()),
            };
            return Ok(Some(reply));
        }
        if let Some(arg) = lower.strip_prefix("delivered ") {
            let reply = match parse_order_id(arg) {
                Some(id) => {
                    ledger::delivered(
                        self.store.as_ref(),
                        self.gateway.as_ref(),
                        &self.config,
                        id,
                        sender,
                    )
                    .await?
                }
                None => format!("Order #{} not found.", arg.trim()),
            };
            return Ok(Some(reply));
        }
        Ok(None)
    }

    async fn handle_customer(
        &self,
        sender: &str,
        text: &str,
        lower: &str,
    ) -> Result<String, OkadaError> {
        let _guard = self.locks.acquire(sender).await;

        let mut session = self
            .store
            .get_session(sender)
            .await?
            .unwrap_or_else(|| Session::new(sender));

        // Global reset works from any state, including mid-order.
        if matches!(lower, "hi" | "menu" | "0") {
            session.reset();
            self.store.put_session(&session).await?;
            return Ok(reply::welcome(&self.config.service_name));
        }

        let reply_text = match session.step {
            ConversationState::MainMenu => food::main_menu(&mut session, lower),
            ConversationState::VendorSelect => food::vendor_select(&mut session, lower),
            ConversationState::CategorySelect => food::category_select(&mut session, lower),
            ConversationState::ItemSelect => food::item_select(&mut session, lower),
            ConversationState::SizeSelect => food::size_select(&mut session, lower),
            ConversationState::QuantitySelect => food::quantity_select(&mut session, lower),
            ConversationState::ProteinLoop => food::protein_loop(&mut session, lower),
            ConversationState::ProteinSelect => food::protein_select(&mut session, lower),
            ConversationState::ProteinSize => food::protein_size(&mut session, lower),
            ConversationState::ProteinQty => food::protein_qty(&mut session, lower),
            ConversationState::AddMoreOrCheckout => {
                food::add_more_or_checkout(&mut session, lower)
            }
            ConversationState::ErrandType => errand::errand_type(&mut session, lower),
            ConversationState::ErrandDetails => errand::errand_details(&mut session, text),
            ConversationState::ErrandLocation => errand::errand_location(&mut session, text),
            ConversationState::DeliveryLocation => {
                checkout::delivery_location(&mut session, text)
            }
            ConversationState::PhoneNumber => {
                checkout::phone_number(&mut session, text, &self.config)
            }
            ConversationState::ConfirmOrder => {
                checkout::confirm_order(&mut session, text, &self.config)
            }
            ConversationState::AwaitingPayment => checkout::awaiting_payment_reminder(),
        };

        self.store.put_session(&session).await?;
        Ok(reply_text)
    }
}

fn parse_order_id(arg: &str) -> Option<u32> {
    arg.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_config, ADMIN};
    use okada_core::types::{OrderStatus, OrderType};
    use okada_test_utils::{MemoryStore, MockGateway};

    const CUSTOMER: &str = "whatsapp:+2348011111111";
    const RIDER_A: &str = "whatsapp:+2348033333333";
    const RIDER_B: &str = "whatsapp:+2348044444444";

    struct Fixture {
        router: Router,
        store: Arc<MemoryStore>,
        gateway: Arc<MockGateway>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(MockGateway::new());
        let router = Router::new(
            Arc::clone(&store) as Arc<dyn Store>,
            Arc::clone(&gateway) as Arc<dyn MessageGateway>,
            test_config(),
        );
        Fixture {
            router,
            store,
            gateway,
        }
    }

    fn msg(sender: &str, text: &str) -> InboundMessage {
        InboundMessage {
            sender: sender.to_string(),
            text: text.to_string(),
            media_count: 0,
        }
    }

    fn media(sender: &str) -> InboundMessage {
        InboundMessage {
            sender: sender.to_string(),
            text: String::new(),
            media_count: 1,
        }
    }

    async fn send(fx: &Fixture, sender: &str, text: &str) -> String {
        fx.router.handle(&msg(sender, text)).await.unwrap()
    }

    async fn register_rider(fx: &Fixture, phone: &str, name: &str) {
        send(fx, phone, &format!("register rider RIDER2026 {name}")).await;
        send(fx, phone, "on duty").await;
    }

    /// Walk a customer through a two-line food order up to the payment
    /// screenshot, returning the created order id.
    async fn place_food_order(fx: &Fixture) -> u32 {
        send(fx, CUSTOMER, "hi").await;
        send(fx, CUSTOMER, "1").await; // food
        send(fx, CUSTOMER, "1").await; // vendor
        send(fx, CUSTOMER, "1").await; // rice meals
        send(fx, CUSTOMER, "1").await; // white rice
        send(fx, CUSTOMER, "2").await; // extra
        send(fx, CUSTOMER, "2").await; // qty 2
        send(fx, CUSTOMER, "1").await; // add protein
        send(fx, CUSTOMER, "17").await; // chicken
        send(fx, CUSTOMER, "1").await; // regular
        send(fx, CUSTOMER, "1").await; // one piece
        send(fx, CUSTOMER, "2").await; // no more proteins -> cart summary
        send(fx, CUSTOMER, "2").await; // checkout
        send(fx, CUSTOMER, "Block C Room 14").await;
        send(fx, CUSTOMER, "+2348011111111").await;
        send(fx, CUSTOMER, "confirm").await;

        let reply = fx.router.handle(&media(CUSTOMER)).await.unwrap();
        assert!(reply.contains("Order Received"), "got: {reply}");
        let alert = fx.gateway.sent_to(ADMIN).await;
        alert
            .last()
            .unwrap()
            .body
            .lines()
            .find(|l| l.starts_with("Order ID: #"))
            .unwrap()
            .trim_start_matches("Order ID: #")
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn first_contact_with_any_text_lands_at_main_menu() {
        let fx = fixture();
        let reply = send(&fx, CUSTOMER, "good evening").await;
        assert_eq!(reply, "Invalid option.");
        let reply = send(&fx, CUSTOMER, "hi").await;
        assert!(reply.contains("Welcome to Okada"));
    }

    #[tokio::test]
    async fn full_food_order_walkthrough_totals_correctly() {
        let fx = fixture();
        let id = place_food_order(&fx).await;

        let order = fx.store.order(id).await.unwrap();
        // 2x White Rice Extra (6000) + 1x Chicken Regular (2000) + delivery 500.
        assert_eq!(order.total, 8500);
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert_eq!(order.order_type, OrderType::Food);
        assert_eq!(order.delivery_location, "Block C Room 14");
        assert_eq!(order.pickup_location, "Bissy Joy Eatery");

        // Session reset after checkout: the next message starts fresh.
        let session = fx.store.get_session(CUSTOMER).await.unwrap().unwrap();
        assert_eq!(session.step, ConversationState::MainMenu);
        assert!(session.cart.is_empty());
    }

    #[tokio::test]
    async fn full_errand_order_walkthrough() {
        let fx = fixture();
        send(&fx, CUSTOMER, "menu").await;
        send(&fx, CUSTOMER, "2").await; // errand
        send(&fx, CUSTOMER, "1").await; // market shopping
        let reply = send(&fx, CUSTOMER, "Beans 2000, Oil 500").await;
        assert!(reply.contains("Total Items Cost: \u{20a6}2,500"));
        send(&fx, CUSTOMER, "Main Gate Market").await;
        send(&fx, CUSTOMER, "Hostel D").await;
        let summary = send(&fx, CUSTOMER, "+2348011111111").await;
        // 2500 items + 500 shopping + 500 delivery.
        assert!(summary.contains("*TOTAL: \u{20a6}3,500*"));
        send(&fx, CUSTOMER, "CONFIRM").await;

        let reply = fx.router.handle(&media(CUSTOMER)).await.unwrap();
        assert!(reply.contains("Order Received"));
        assert_eq!(fx.store.order_count().await, 1);
    }

    #[tokio::test]
    async fn menu_resets_from_the_middle_of_an_order() {
        let fx = fixture();
        send(&fx, CUSTOMER, "hi").await;
        send(&fx, CUSTOMER, "1").await;
        send(&fx, CUSTOMER, "1").await;
        send(&fx, CUSTOMER, "1").await;

        let reply = send(&fx, CUSTOMER, "Menu").await;
        assert!(reply.contains("Welcome to Okada"));
        let session = fx.store.get_session(CUSTOMER).await.unwrap().unwrap();
        assert_eq!(session.step, ConversationState::MainMenu);
        assert!(session.cart.is_empty());

        // Reset is idempotent.
        send(&fx, CUSTOMER, "0").await;
        let session = fx.store.get_session(CUSTOMER).await.unwrap().unwrap();
        assert_eq!(session.step, ConversationState::MainMenu);
    }

    #[tokio::test]
    async fn media_outside_awaiting_payment_is_turned_away() {
        let fx = fixture();
        let reply = fx.router.handle(&media(CUSTOMER)).await.unwrap();
        assert!(reply.contains("complete the text steps first"));
        assert_eq!(fx.store.order_count().await, 0);

        send(&fx, CUSTOMER, "hi").await;
        send(&fx, CUSTOMER, "1").await;
        let reply = fx.router.handle(&media(CUSTOMER)).await.unwrap();
        assert!(reply.contains("complete the text steps first"));
        assert_eq!(fx.store.order_count().await, 0);
    }

    #[tokio::test]
    async fn text_while_awaiting_payment_reminds_about_the_screenshot() {
        let fx = fixture();
        send(&fx, CUSTOMER, "hi").await;
        send(&fx, CUSTOMER, "2").await;
        send(&fx, CUSTOMER, "4").await; // campus task
        send(&fx, CUSTOMER, "Deliver my laptop charger").await;
        send(&fx, CUSTOMER, "Faculty of Science").await;
        send(&fx, CUSTOMER, "+2348011111111").await;
        send(&fx, CUSTOMER, "confirm").await;

        let reply = send(&fx, CUSTOMER, "done").await;
        assert!(reply.contains("screenshot"));
        assert_eq!(fx.store.order_count().await, 0);
    }

    #[tokio::test]
    async fn full_lifecycle_order_to_delivery() {
        let fx = fixture();
        register_rider(&fx, RIDER_A, "Ade").await;
        register_rider(&fx, RIDER_B, "Bola").await;
        let id = place_food_order(&fx).await;
        fx.gateway.clear_sent().await;

        // Admin approves; both on-duty riders get the job offer.
        let reply = send(&fx, ADMIN, &format!("approve {id}")).await;
        assert_eq!(reply, format!("Order #{id} Approved."));
        assert_eq!(fx.gateway.sent_to(RIDER_A).await.len(), 1);
        assert_eq!(fx.gateway.sent_to(RIDER_B).await.len(), 1);
        assert!(fx.gateway.sent_to(RIDER_A).await[0]
            .body
            .contains(&format!("NEW JOB #{id}")));

        // First acceptance wins, the second is refused.
        let reply = send(&fx, RIDER_A, &format!("accept {id}")).await;
        assert!(reply.contains(&format!("You have accepted Order #{id}")));
        let reply = send(&fx, RIDER_B, &format!("accept {id}")).await;
        assert_eq!(reply, "Job already taken or closed.");

        // Only the winner can advance the order.
        let reply = send(&fx, RIDER_B, &format!("delivered {id}")).await;
        assert_eq!(reply, "Not your order.");
        let reply = send(&fx, RIDER_A, &format!("picked up {id}")).await;
        assert!(reply.contains("Picked Up"));
        let reply = send(&fx, RIDER_A, &format!("delivered {id}")).await;
        assert!(reply.contains("Good job!"));

        let order = fx.store.order(id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.rider_phone.as_deref(), Some(RIDER_A));
    }

    #[tokio::test]
    async fn rejected_order_notifies_the_customer() {
        let fx = fixture();
        let id = place_food_order(&fx).await;
        fx.gateway.clear_sent().await;

        let reply = send(&fx, ADMIN, &format!("reject {id}")).await;
        assert_eq!(reply, format!("Order #{id} Rejected."));
        assert_eq!(fx.store.order(id).await.unwrap().status, OrderStatus::Rejected);
        assert!(fx.gateway.sent_to(CUSTOMER).await[0]
            .body
            .contains("Payment Not Found"));
    }

    #[tokio::test]
    async fn admin_commands_are_ignored_from_other_senders() {
        let fx = fixture();
        let id = place_food_order(&fx).await;

        // A customer typing `approve` lands in the conversation flow.
        let reply = send(&fx, CUSTOMER, &format!("approve {id}")).await;
        assert_ne!(reply, format!("Order #{id} Approved."));
        assert_eq!(
            fx.store.order(id).await.unwrap().status,
            OrderStatus::PendingPayment
        );
    }

    #[tokio::test]
    async fn admin_falls_through_to_customer_flow_for_plain_text() {
        let fx = fixture();
        let reply = send(&fx, ADMIN, "hi").await;
        assert!(reply.contains("Welcome to Okada"));
    }

    #[tokio::test]
    async fn rider_with_no_matching_command_is_a_customer() {
        let fx = fixture();
        register_rider(&fx, RIDER_A, "Ade").await;
        let reply = send(&fx, RIDER_A, "menu").await;
        assert!(reply.contains("Welcome to Okada"));
    }

    #[tokio::test]
    async fn bare_rider_commands_ask_for_the_order_id() {
        let fx = fixture();
        register_rider(&fx, RIDER_A, "Ade").await;
        let reply = send(&fx, RIDER_A, "delivered").await;
        assert!(reply.contains("include the order id"));
    }

    #[tokio::test]
    async fn unknown_order_ids_get_polite_misses() {
        let fx = fixture();
        register_rider(&fx, RIDER_A, "Ade").await;
        assert_eq!(
            send(&fx, RIDER_A, "accept 9998").await,
            "Order #9998 not found."
        );
        assert_eq!(
            send(&fx, ADMIN, "approve nonsense").await,
            "Order #nonsense not found."
        );
    }

    #[tokio::test]
    async fn off_duty_rider_gets_no_broadcast() {
        let fx = fixture();
        register_rider(&fx, RIDER_A, "Ade").await;
        register_rider(&fx, RIDER_B, "Bola").await;
        send(&fx, RIDER_B, "off duty").await;
        let id = place_food_order(&fx).await;
        fx.gateway.clear_sent().await;

        send(&fx, ADMIN, &format!("approve {id}")).await;
        assert_eq!(fx.gateway.sent_to(RIDER_A).await.len(), 1);
        assert_eq!(fx.gateway.sent_to(RIDER_B).await.len(), 0);
    }
}
