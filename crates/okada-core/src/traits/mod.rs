// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The persistent store and the outbound messaging gateway are injected
//! into the engine as trait objects, never reached through process globals,
//! so tests can substitute in-memory fakes.

pub mod gateway;
pub mod store;

pub use gateway::MessageGateway;
pub use store::Store;
