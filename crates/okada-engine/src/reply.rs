// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply text builders shared by more than one handler.
//!
//! One-off prompts live next to the handler that sends them; only texts
//! reachable from several states are centralized here.

use std::fmt::Write;

use okada_catalog::{category_items, category_label, format_naira, price_label};
use okada_core::types::Category;

/// Greeting and top-level menu, sent on first contact and on every reset.
pub fn welcome(service_name: &str) -> String {
    format!(
        "\u{1f37d}\u{fe0f} *Welcome to {service_name}!*\n\n\
         How can we help you today?\n\n\
         1. Order Food\n\
         2. Errands (Market/Pharmacy/Pickup)\n\n\
         Reply with number 1 or 2."
    )
}

/// Category menu, shown when entering the vendor and when adding more food.
pub fn categories_menu(vendor_name: &str) -> String {
    format!(
        "\u{1f37d}\u{fe0f} *{vendor_name} Categories*\n\n\
         1. \u{1f35a} Rice Meals\n\
         2. \u{1f958} Swallow & Solids\n\
         3. \u{1f357} Proteins / Add-ons\n\n\
         Reply number."
    )
}

/// Item listing for one category, shown on category entry and when adding
/// proteins. Heading comes from the catalog label.
pub fn items_menu(category: Category) -> String {
    let mut text = format!("*{}*\n\n", category_label(category));
    for item in category_items(category) {
        let _ = writeln!(text, "{}. {} - {}", item.id, item.name, price_label(item));
    }
    text.push_str("\nReply item number.");
    text
}

/// Fallback for text the state machine cannot interpret.
pub fn not_understood() -> String {
    "I didn't understand that. Reply 'Menu'.".to_string()
}

/// Size prompt for an item with distinct regular/extra prices.
pub fn size_prompt(name: &str, regular: okada_core::types::Money, extra: okada_core::types::Money) -> String {
    format!(
        "*{name}*\n\nSelect Portion:\n1. Regular ({})\n2. Extra ({})\n\nReply 1 or 2.",
        format_naira(regular),
        format_naira(extra)
    )
}
