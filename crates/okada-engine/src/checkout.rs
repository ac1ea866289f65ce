// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checkout tail shared by the food and errand flows: delivery location,
//! contact phone, order summary, confirmation, and payment details.

use std::fmt::Write;

use okada_catalog::format_naira;
use okada_core::types::{ConversationState, OrderType, Session};

use crate::EngineConfig;

/// Ask where to deliver. Entry point from both flows.
pub fn prompt_delivery_location(session: &mut Session) -> String {
    session.step = ConversationState::DeliveryLocation;
    "\u{1f4cd} Where should we deliver to? (Your Hostel/Room)".to_string()
}

pub fn delivery_location(session: &mut Session, input: &str) -> String {
    if input.is_empty() {
        return "\u{1f4cd} Where should we deliver to? (Your Hostel/Room)".to_string();
    }
    session.delivery_location = Some(input.to_string());
    session.step = ConversationState::PhoneNumber;
    "\u{1f4de} Please share your Phone Number for the rider.".to_string()
}

/// Record the contact phone, compute the final total, and present the full
/// order summary.
pub fn phone_number(session: &mut Session, input: &str, config: &EngineConfig) -> String {
    if input.is_empty() {
        return "\u{1f4de} Please share your Phone Number for the rider.".to_string();
    }
    session.contact_phone = Some(input.to_string());
    session.step = ConversationState::ConfirmOrder;

    let mut summary = "\u{1f9fe} *ORDER SUMMARY*\n\n".to_string();
    let mut total;

    match session.order_type {
        Some(OrderType::Errand) => {
            total = session.shopping_budget;
            let _ = writeln!(summary, "Items: {}", format_naira(total));
            let fee_label = if session.errand_kind.is_some_and(|k| k.needs_shopping()) {
                "Shopping Fee"
            } else {
                "Service Fee"
            };
            let _ = writeln!(
                summary,
                "{fee_label}: {}",
                format_naira(config.shopping_fee)
            );
            total += config.shopping_fee;
        }
        _ => {
            // Recompute rather than trusting the cached subtotal.
            total = session.cart.iter().map(|line| line.total()).sum();
            session.cart_subtotal = total;
            for line in &session.cart {
                let _ = writeln!(
                    summary,
                    "{} ({}) x{}",
                    line.name, line.size, line.quantity
                );
            }
            let _ = write!(summary, "\nFood Cost: {}", format_naira(total));
        }
    }

    total += config.delivery_fee;
    session.final_total = total;

    let _ = write!(
        summary,
        "\nDelivery Fee: {}\n\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\n\
         \u{1f4b0} *TOTAL: {}*\n\nReply \"CONFIRM\" to proceed to payment.",
        format_naira(config.delivery_fee),
        format_naira(total)
    );
    summary
}

/// Confirmation gate. Only the exact word `confirm` (any case, surrounding
/// whitespace ignored) advances to payment.
pub fn confirm_order(session: &mut Session, input: &str, config: &EngineConfig) -> String {
    if !input.eq_ignore_ascii_case("confirm") {
        return "Please type CONFIRM to proceed.".to_string();
    }
    session.step = ConversationState::AwaitingPayment;
    format!(
        "\u{1f4b3} *Payment Details*\n\n\
         Please pay {} to:\n\n\
         \u{1f3e6} *Bank:* {}\n\
         \u{1f464} *Name:* {}\n\
         \u{1f522} *Acct:* {}\n\n\
         \u{1f4f8} *Send a screenshot of the receipt here to complete your order.*",
        format_naira(session.final_total),
        config.bank_name,
        config.account_name,
        config.account_number
    )
}

/// Reminder sent when a customer types text while we are waiting for the
/// payment screenshot.
pub fn awaiting_payment_reminder() -> String {
    "\u{1f4f8} Please send a screenshot of your payment receipt to complete \
     your order, or reply 'Menu' to start over."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;
    use okada_core::types::{CartLine, ErrandItem, ErrandKind, LineKind, Size};

    fn food_session_ready() -> Session {
        let mut session = Session::new("whatsapp:+2348011111111");
        session.order_type = Some(OrderType::Food);
        session.step = ConversationState::DeliveryLocation;
        session.cart.push(CartLine {
            name: "White Rice".into(),
            unit_price: 3000,
            quantity: 2,
            size: Size::Extra,
            kind: LineKind::Main,
        });
        session
    }

    #[test]
    fn food_total_is_subtotal_plus_delivery_fee() {
        let config = test_config();
        let mut session = food_session_ready();
        delivery_location(&mut session, "Block C Room 14");
        let summary = phone_number(&mut session, "+2348011111111", &config);

        assert_eq!(session.final_total, 6500);
        assert_eq!(session.step, ConversationState::ConfirmOrder);
        assert!(summary.contains("Food Cost: \u{20a6}6,000"));
        assert!(summary.contains("Delivery Fee: \u{20a6}500"));
        assert!(summary.contains("*TOTAL: \u{20a6}6,500*"));
    }

    #[test]
    fn errand_total_adds_shopping_and_delivery_fees() {
        let config = test_config();
        let mut session = Session::new("whatsapp:+2348011111111");
        session.order_type = Some(OrderType::Errand);
        session.errand_kind = Some(ErrandKind::Market);
        session.errand_items = vec![
            ErrandItem {
                name: "Beans".into(),
                price: 2000,
            },
            ErrandItem {
                name: "Oil".into(),
                price: 500,
            },
        ];
        session.shopping_budget = 2500;
        session.step = ConversationState::PhoneNumber;

        let summary = phone_number(&mut session, "+2348011111111", &config);
        assert_eq!(session.final_total, 3500);
        assert!(summary.contains("Items: \u{20a6}2,500"));
        assert!(summary.contains("Shopping Fee: \u{20a6}500"));
        assert!(summary.contains("*TOTAL: \u{20a6}3,500*"));
    }

    #[test]
    fn non_shopping_errand_labels_the_fee_as_service() {
        let config = test_config();
        let mut session = Session::new("whatsapp:+2348011111111");
        session.order_type = Some(OrderType::Errand);
        session.errand_kind = Some(ErrandKind::Task);
        session.shopping_budget = 0;
        session.step = ConversationState::PhoneNumber;

        let summary = phone_number(&mut session, "+2348011111111", &config);
        assert!(summary.contains("Service Fee: \u{20a6}500"));
        assert_eq!(session.final_total, 1000);
    }

    #[test]
    fn confirm_is_exact_but_case_insensitive() {
        let config = test_config();
        let mut session = food_session_ready();
        session.step = ConversationState::ConfirmOrder;
        session.final_total = 6500;

        for not_it in ["yes", "confirm!", "ok confirm", ""] {
            let text = confirm_order(&mut session, not_it, &config);
            assert_eq!(text, "Please type CONFIRM to proceed.", "input {not_it:?}");
            assert_eq!(session.step, ConversationState::ConfirmOrder);
        }

        let text = confirm_order(&mut session, "CONFIRM", &config);
        assert_eq!(session.step, ConversationState::AwaitingPayment);
        assert!(text.contains("Please pay \u{20a6}6,500"));
        assert!(text.contains("*Bank:* Monie Point"));
        assert!(text.contains("screenshot of the receipt"));
    }

    #[test]
    fn empty_location_and_phone_reprompt() {
        let config = test_config();
        let mut session = food_session_ready();
        delivery_location(&mut session, "");
        assert_eq!(session.step, ConversationState::DeliveryLocation);

        delivery_location(&mut session, "Hostel B");
        phone_number(&mut session, "", &config);
        assert_eq!(session.step, ConversationState::PhoneNumber);
        assert!(session.contact_phone.is_none());
    }
}
