// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./okada.toml` > `~/.config/okada/okada.toml`
//! > `/etc/okada/okada.toml`, with environment variable overrides via the
//! `OKADA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::OkadaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/okada/okada.toml` (system-wide)
/// 3. `~/.config/okada/okada.toml` (user XDG config)
/// 4. `./okada.toml` (local directory)
/// 5. `OKADA_*` environment variables
pub fn load_config() -> Result<OkadaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OkadaConfig::default()))
        .merge(Toml::file("/etc/okada/okada.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("okada/okada.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("okada.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<OkadaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OkadaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OkadaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OkadaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")`: every section name is a
/// single word, so only the first underscore after the prefix separates the
/// section from the key. `OKADA_TWILIO_ACCOUNT_SID` maps to
/// `twilio.account_sid`, keeping underscore-containing key names intact.
fn env_provider() -> Env {
    Env::prefixed("OKADA_").map(|key| {
        key.as_str().to_lowercase().replacen('_', ".", 1).into()
    })
}
