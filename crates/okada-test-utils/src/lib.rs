// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Okada workspace: an in-memory store and a mock
//! gateway implementing the collaborator traits from okada-core.

pub mod mem_store;
pub mod mock_gateway;

pub use mem_store::MemoryStore;
pub use mock_gateway::{MockGateway, SentMessage};
