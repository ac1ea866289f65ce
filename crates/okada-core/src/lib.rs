// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Okada delivery bot.
//!
//! This crate provides the error type, domain model, and collaborator trait
//! definitions used throughout the Okada workspace. The engine depends only
//! on the traits defined here, never on concrete store or gateway
//! implementations.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OkadaError;
pub use traits::{MessageGateway, Store};
pub use types::{
    CartLine, Category, ConversationState, ErrandItem, ErrandKind, InboundMessage, LineKind,
    MessageId, Money, Order, OrderItems, OrderStatus, OrderType, Rider, RiderStatus, Session,
    Size,
};
