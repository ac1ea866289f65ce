// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error types and rendering for configuration failures.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for operator-facing rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// TOML parsing or extraction failure reported by Figment.
    #[error("failed to load configuration: {message}")]
    #[diagnostic(
        code(okada::config::parse),
        help("check okada.toml for typos; run with OKADA_* env vars to override single keys")
    )]
    Parse { message: String },

    /// Semantic validation failure after successful deserialization.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(okada::config::validation))]
    Validation { message: String },
}

/// Convert a Figment error into per-cause diagnostics.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render all collected errors to stderr as miette reports.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(format!("{error}"));
        eprintln!("{report:?}");
    }
    eprintln!(
        "okada: {} configuration error{} found",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}
