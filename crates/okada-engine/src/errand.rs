// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errand flow: errand type, shopping list parsing, and pickup location.
//!
//! Shopping-type errands (market, pharmacy) collect an itemized list with a
//! budget; pickup and task errands only collect a free-text description,
//! which doubles as the pickup location.

use std::fmt::Write;

use okada_catalog::format_naira;
use okada_core::types::{ConversationState, ErrandItem, ErrandKind, Session};

/// Errand type menu text, shared with the main menu handler.
pub fn errand_type_menu() -> String {
    "\u{1f3c3} *Select Errand Type*\n\n\
     1. \u{1f6d2} Market Shopping\n\
     2. \u{1f4e6} Pick Up Item\n\
     3. \u{1f48a} Pharmacy / Supermarket\n\
     4. \u{1f4dd} Campus Task\n\n\
     Reply with number."
        .to_string()
}

pub fn errand_type(session: &mut Session, input: &str) -> String {
    let kind = match input {
        "1" => ErrandKind::Market,
        "2" => ErrandKind::PickUp,
        "3" => ErrandKind::Pharmacy,
        "4" => ErrandKind::Task,
        _ => return "Invalid.".to_string(),
    };
    session.errand_kind = Some(kind);
    if kind.needs_shopping() {
        session.step = ConversationState::ErrandDetails;
        "\u{1f4dd} *List the items you want to buy.*\n\n\
         Format: Item Price, Item Price\n\
         Example: Beans 2000, Oil 500"
            .to_string()
    } else {
        session.step = ConversationState::ErrandLocation;
        "\u{1f4dd} *Describe the task or pickup:*".to_string()
    }
}

/// Parse a comma-separated shopping list. Each segment must end in a price;
/// segments that don't parse are dropped silently, and a list where nothing
/// parsed re-prompts without advancing.
pub fn errand_details(session: &mut Session, input: &str) -> String {
    let items = parse_shopping_list(input);
    if items.is_empty() {
        return "\u{26a0}\u{fe0f} Could not read prices. Example: 'Beans 2000'".to_string();
    }

    let budget = items.iter().map(|i| i.price).sum();
    let mut text = "\u{2705} Items saved:\n".to_string();
    for item in &items {
        let _ = writeln!(text, "- {}: {}", item.name, format_naira(item.price));
    }
    let _ = write!(
        text,
        "\nTotal Items Cost: {}\n\n\u{1f4cd} Where is the pickup location?",
        format_naira(budget)
    );

    session.errand_items = items;
    session.shopping_budget = budget;
    session.step = ConversationState::ErrandLocation;
    text
}

/// Pickup location for shopping errands; for task/pickup errands the
/// free-text description itself lands here.
pub fn errand_location(session: &mut Session, input: &str) -> String {
    if input.is_empty() {
        return "\u{1f4cd} Where is the pickup location?".to_string();
    }
    session.pickup_location = Some(input.to_string());
    session.step = ConversationState::DeliveryLocation;
    "\u{1f4cd} Where should the rider drop the items? (Your Hostel/Room)".to_string()
}

fn parse_shopping_list(input: &str) -> Vec<ErrandItem> {
    input
        .split(',')
        .filter_map(|segment| {
            let mut tokens: Vec<&str> = segment.split_whitespace().collect();
            if tokens.len() < 2 {
                return None;
            }
            let price: i64 = tokens.pop()?.parse().ok().filter(|p| *p >= 0)?;
            Some(ErrandItem {
                name: tokens.join(" "),
                price,
            })
        })
        .collect()
}
