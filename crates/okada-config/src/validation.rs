// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every failure rather than stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::OkadaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or all collected errors.
pub fn validate_config(config: &OkadaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.fees.delivery < 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "fees.delivery must be non-negative, got {}",
                config.fees.delivery
            ),
        });
    }

    if config.fees.shopping < 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "fees.shopping must be non-negative, got {}",
                config.fees.shopping
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Phone identities, when supplied, must look like transport addresses.
    if !config.admin.phone.is_empty() && !looks_like_phone(&config.admin.phone) {
        errors.push(ConfigError::Validation {
            message: format!(
                "admin.phone `{}` does not look like a phone identity (expected e.g. whatsapp:+234...)",
                config.admin.phone
            ),
        });
    }

    if !config.twilio.from_number.is_empty() && !looks_like_phone(&config.twilio.from_number) {
        errors.push(ConfigError::Validation {
            message: format!(
                "twilio.from_number `{}` does not look like a phone identity",
                config.twilio.from_number
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Loose shape check for phone identities: an optional `whatsapp:` prefix
/// followed by `+` and digits.
fn looks_like_phone(value: &str) -> bool {
    let rest = value.strip_prefix("whatsapp:").unwrap_or(value);
    let Some(digits) = rest.strip_prefix('+') else {
        return false;
    };
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
