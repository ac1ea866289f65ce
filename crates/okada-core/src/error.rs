// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Okada delivery bot.

use thiserror::Error;

/// The primary error type used across all Okada crates.
///
/// User mistakes (an unparseable quantity, a reply in the wrong state) are
/// NOT errors -- they produce corrective reply text and never surface here.
/// This enum covers genuine faults: configuration, persistence, and outbound
/// message delivery.
#[derive(Debug, Error)]
pub enum OkadaError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Messaging gateway errors (API failure, malformed request, transport).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OkadaError {
    /// Wrap a serialization failure as a storage error.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        OkadaError::Storage {
            source: Box::new(source),
        }
    }
}
