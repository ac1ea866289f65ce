// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types shared across the Okada workspace.
//!
//! Conversation state, order status, and the other closed vocabularies are
//! tagged enums rather than free-form strings, so an unknown state is a
//! deserialization error instead of a silent runtime fallback. Wire forms
//! are snake_case throughout.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Monetary amounts in whole naira. All catalog prices, fees, and totals
/// are integers; nothing in the flow produces fractional amounts.
pub type Money = i64;

/// Unique identifier assigned to an outbound message by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// One inbound message event from the messaging gateway.
///
/// Every inbound message is an independent request; there is no connection
/// state beyond what the [`Session`] record carries.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Phone-number-like identity of the sender (e.g. `whatsapp:+2348...`).
    pub sender: String,
    /// Raw message text. May be empty for media-only messages.
    pub text: String,
    /// Number of media attachments on the message.
    pub media_count: u32,
}

/// Where a customer currently is in the conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    MainMenu,
    VendorSelect,
    CategorySelect,
    ItemSelect,
    SizeSelect,
    QuantitySelect,
    ProteinLoop,
    ProteinSelect,
    ProteinSize,
    ProteinQty,
    AddMoreOrCheckout,
    ErrandType,
    ErrandDetails,
    ErrandLocation,
    DeliveryLocation,
    PhoneNumber,
    ConfirmOrder,
    AwaitingPayment,
}

/// Whether the session is assembling a food order or an errand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Food,
    Errand,
}

/// Catalog category keys. The catalog crate owns the item data; the key
/// lives here because sessions reference the category they are browsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RiceMeals,
    Swallows,
    Proteins,
}

/// Portion size for a catalog item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
pub enum Size {
    Regular,
    Extra,
}

/// Whether a cart line is a main dish or a protein/side add-on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Main,
    Protein,
}

/// One line in a food cart. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub size: Size,
    pub kind: LineKind,
}

impl CartLine {
    /// Line total: unit price times quantity.
    pub fn total(&self) -> Money {
        self.unit_price * Money::from(self.quantity)
    }
}

/// Errand categories offered at the main menu.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrandKind {
    Market,
    PickUp,
    Pharmacy,
    Task,
}

impl ErrandKind {
    /// Market and pharmacy errands need an itemized shopping list with a
    /// budget; pickups and campus tasks only need a free-text description.
    pub fn needs_shopping(self) -> bool {
        matches!(self, ErrandKind::Market | ErrandKind::Pharmacy)
    }
}

/// One item on an errand shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrandItem {
    pub name: String,
    pub price: Money,
}

/// Per-customer mutable conversation record, keyed by phone identity.
///
/// Created on first contact or explicit reset, mutated as the conversation
/// advances, and reset (never deleted) once an order is finalized so the
/// same identity can start the next order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phone: String,
    pub step: ConversationState,
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub cart: Vec<CartLine>,
    #[serde(default)]
    pub current_category: Option<Category>,
    /// Catalog item id selected but not yet added to the cart.
    #[serde(default)]
    pub selected_item: Option<u32>,
    /// Unit price resolved for the selected item (after any size choice).
    #[serde(default)]
    pub selected_price: Option<Money>,
    #[serde(default)]
    pub selected_size: Option<Size>,
    #[serde(default)]
    pub errand_kind: Option<ErrandKind>,
    #[serde(default)]
    pub errand_items: Vec<ErrandItem>,
    #[serde(default)]
    pub shopping_budget: Money,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub delivery_location: Option<String>,
    /// Contact number the customer wants the rider to call.
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub cart_subtotal: Money,
    #[serde(default)]
    pub final_total: Money,
}

impl Session {
    /// Fresh session at the main menu with nothing selected.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            step: ConversationState::MainMenu,
            order_type: None,
            cart: Vec::new(),
            current_category: None,
            selected_item: None,
            selected_price: None,
            selected_size: None,
            errand_kind: None,
            errand_items: Vec::new(),
            shopping_budget: 0,
            pickup_location: None,
            delivery_location: None,
            contact_phone: None,
            cart_subtotal: 0,
            final_total: 0,
        }
    }

    /// Reset to the main menu, discarding any in-progress order. Idempotent.
    pub fn reset(&mut self) {
        *self = Session::new(self.phone.clone());
    }

    /// Clear the transient item-selection scratch fields.
    pub fn clear_selection(&mut self) {
        self.selected_item = None;
        self.selected_price = None;
        self.selected_size = None;
    }
}

/// Rider duty status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    Inactive,
    OnDuty,
}

/// A registered rider, keyed by phone identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    pub phone: String,
    pub name: String,
    pub status: RiderStatus,
    /// RFC 3339 registration timestamp.
    pub registered_at: String,
}

/// Order status state machine.
///
/// `pending_payment -> seeking_rider -> rider_accepted -> picked_up ->
/// delivered`, with the terminal side branch `pending_payment -> rejected`.
/// Transitions are validated by the ledger; the enum itself is just the
/// closed vocabulary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendingPayment,
    SeekingRider,
    RiderAccepted,
    PickedUp,
    Delivered,
    Rejected,
}

/// Line items carried by an order: a food cart or an errand shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderItems {
    Food { lines: Vec<CartLine> },
    Errand { items: Vec<ErrandItem> },
}

/// Canonical order record. Created only once payment evidence arrives;
/// afterwards only `status` and `rider_phone` ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Random 4-digit id, verified unique at creation.
    pub id: u32,
    /// WhatsApp identity the order was placed from.
    pub customer: String,
    /// Contact number the customer left for the rider.
    pub contact_phone: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub total: Money,
    pub pickup_location: String,
    pub delivery_location: String,
    pub items: OrderItems,
    /// Set exactly once, by whichever rider wins the acceptance race.
    #[serde(default)]
    pub rider_phone: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}
