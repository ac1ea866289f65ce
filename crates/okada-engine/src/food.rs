// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Food ordering flow: vendor, category, item, size, quantity, and the
//! protein add-on loop.
//!
//! Every handler is a pure function over the session: it inspects the
//! input, mutates the session (or leaves it untouched on invalid input),
//! and returns the reply text. Persistence is the router's job.

use okada_catalog::{format_naira, item_by_id, VENDOR_NAME};
use okada_core::types::{
    CartLine, Category, ConversationState, LineKind, OrderType, Session, Size,
};

use crate::reply;

/// Top-level menu: food or errand.
pub fn main_menu(session: &mut Session, input: &str) -> String {
    match input {
        "1" => {
            session.step = ConversationState::VendorSelect;
            session.order_type = Some(OrderType::Food);
            format!(
                "\u{1f3ea} *Select Vendor*\n\n1. {VENDOR_NAME}\n\nReply 1."
            )
        }
        "2" => {
            session.step = ConversationState::ErrandType;
            session.order_type = Some(OrderType::Errand);
            crate::errand::errand_type_menu()
        }
        _ => "Invalid option.".to_string(),
    }
}

/// Single-vendor selection screen. Only `1` advances.
pub fn vendor_select(session: &mut Session, input: &str) -> String {
    if input == "1" {
        show_categories(session)
    } else {
        "Invalid option.".to_string()
    }
}

/// Enter category browsing. Also the re-entry point from
/// `add_more_or_checkout` when the customer wants another meal.
pub fn show_categories(session: &mut Session) -> String {
    session.step = ConversationState::CategorySelect;
    reply::categories_menu(VENDOR_NAME)
}

pub fn category_select(session: &mut Session, input: &str) -> String {
    let category = match input {
        "1" => Category::RiceMeals,
        "2" => Category::Swallows,
        "3" => Category::Proteins,
        _ => return "Invalid category.".to_string(),
    };
    session.step = ConversationState::ItemSelect;
    session.current_category = Some(category);
    reply::items_menu(category)
}

/// Item choice within the current category. Items from other categories are
/// rejected even though ids are catalog-wide.
pub fn item_select(session: &mut Session, input: &str) -> String {
    let Some(category) = session.current_category else {
        return reply::not_understood();
    };
    let item = input
        .parse::<u32>()
        .ok()
        .and_then(item_by_id)
        .filter(|i| i.category == category);
    let Some(item) = item else {
        return "Invalid item number.".to_string();
    };

    session.selected_item = Some(item.id);
    if item.has_size_choice() {
        session.step = ConversationState::SizeSelect;
        reply::size_prompt(item.name, item.regular, item.extra)
    } else {
        // Equal prices: the size question is skipped entirely.
        session.step = ConversationState::QuantitySelect;
        session.selected_price = Some(item.regular);
        session.selected_size = Some(Size::Regular);
        format!(
            "*{}*\n\nPrice: {}\n\nHow many?",
            item.name,
            format_naira(item.regular)
        )
    }
}

pub fn size_select(session: &mut Session, input: &str) -> String {
    let Some(item) = session.selected_item.and_then(item_by_id) else {
        return reply::not_understood();
    };
    let size = match input {
        "1" => Size::Regular,
        "2" => Size::Extra,
        _ => return "Reply 1 or 2.".to_string(),
    };
    session.selected_size = Some(size);
    session.selected_price = Some(item.price(size));
    session.step = ConversationState::QuantitySelect;
    format!(
        "*{} ({size})*\n\nPrice: {}\n\nHow many?",
        item.name,
        format_naira(item.price(size))
    )
}

pub fn quantity_select(session: &mut Session, input: &str) -> String {
    let Some(qty) = parse_quantity(input) else {
        return invalid_quantity();
    };
    let (Some(item), Some(price), Some(size)) = (
        session.selected_item.and_then(item_by_id),
        session.selected_price,
        session.selected_size,
    ) else {
        return reply::not_understood();
    };

    let is_protein = session.current_category == Some(Category::Proteins);
    session.cart.push(CartLine {
        name: item.name.to_string(),
        unit_price: price,
        quantity: qty,
        size,
        kind: if is_protein {
            LineKind::Protein
        } else {
            LineKind::Main
        },
    });
    session.clear_selection();

    if is_protein {
        cart_summary(session)
    } else {
        session.step = ConversationState::ProteinLoop;
        format!(
            "\u{2705} Added {qty}x {}.\n\n\u{1f357} Do you want to add Protein/Sides?\n1. Yes\n2. No",
            item.name
        )
    }
}

/// Yes/no gate into the protein add-on loop.
pub fn protein_loop(session: &mut Session, input: &str) -> String {
    match input {
        "1" => {
            session.step = ConversationState::ProteinSelect;
            reply::items_menu(Category::Proteins)
        }
        "2" => cart_summary(session),
        _ => "Reply 1 or 2.".to_string(),
    }
}

pub fn protein_select(session: &mut Session, input: &str) -> String {
    let item = input
        .parse::<u32>()
        .ok()
        .and_then(item_by_id)
        .filter(|i| i.category == Category::Proteins);
    let Some(item) = item else {
        return "Invalid item.".to_string();
    };

    session.selected_item = Some(item.id);
    if item.has_size_choice() {
        session.step = ConversationState::ProteinSize;
        reply::size_prompt(item.name, item.regular, item.extra)
    } else {
        session.step = ConversationState::ProteinQty;
        session.selected_price = Some(item.regular);
        session.selected_size = Some(Size::Regular);
        format!(
            "*{}*\n\nPrice: {}\n\nHow many pieces?",
            item.name,
            format_naira(item.regular)
        )
    }
}

pub fn protein_size(session: &mut Session, input: &str) -> String {
    let Some(item) = session.selected_item.and_then(item_by_id) else {
        return reply::not_understood();
    };
    let size = match input {
        "1" => Size::Regular,
        "2" => Size::Extra,
        _ => return "Reply 1 or 2.".to_string(),
    };
    session.selected_size = Some(size);
    session.selected_price = Some(item.price(size));
    session.step = ConversationState::ProteinQty;
    format!("*{} ({size})*\n\nHow many pieces?", item.name)
}

pub fn protein_qty(session: &mut Session, input: &str) -> String {
    let Some(qty) = parse_quantity(input) else {
        return invalid_quantity();
    };
    let (Some(item), Some(price), Some(size)) = (
        session.selected_item.and_then(item_by_id),
        session.selected_price,
        session.selected_size,
    ) else {
        return reply::not_understood();
    };

    session.cart.push(CartLine {
        name: item.name.to_string(),
        unit_price: price,
        quantity: qty,
        size,
        kind: LineKind::Protein,
    });
    session.clear_selection();
    session.step = ConversationState::ProteinLoop;
    format!(
        "\u{2705} Added {qty}x {}.\n\nAdd another protein?\n1. Yes\n2. No (Checkout)",
        item.name
    )
}

/// Cart recap with running subtotal. Entry point for the
/// add-another-meal-or-checkout decision.
pub fn cart_summary(session: &mut Session) -> String {
    let mut subtotal = 0;
    let mut text = "\u{1f9fe} *Current Cart*\n\n".to_string();
    for line in &session.cart {
        let total = line.total();
        subtotal += total;
        text.push_str(&format!(
            "{} ({}) x{} = {}\n",
            line.name,
            line.size,
            line.quantity,
            format_naira(total)
        ));
    }
    text.push_str(&format!(
        "\n\u{1f4b0} Subtotal: {}\n\n\
         Do you want to add another meal?\n1. Yes (Add Food)\n2. No (Proceed to Delivery)",
        format_naira(subtotal)
    ));

    session.cart_subtotal = subtotal;
    session.step = ConversationState::AddMoreOrCheckout;
    text
}

/// Loop back into the menu or proceed to the delivery questions.
pub fn add_more_or_checkout(session: &mut Session, input: &str) -> String {
    match input {
        "1" => show_categories(session),
        "2" => crate::checkout::prompt_delivery_location(session),
        _ => "Reply 1 or 2.".to_string(),
    }
}

fn parse_quantity(input: &str) -> Option<u32> {
    input.parse::<u32>().ok().filter(|q| *q > 0)
}

fn invalid_quantity() -> String {
    "Please reply with a valid quantity (a number greater than 0).".to_string()
}
