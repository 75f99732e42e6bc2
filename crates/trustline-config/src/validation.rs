// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: non-empty paths,
//! sensible bounds. Collects every failure instead of stopping at the
//! first one.

use crate::diagnostic::ConfigError;
use crate::model::TrustlineConfig;

/// Validate a deserialized configuration.
pub fn validate_config(config: &TrustlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.data_dir.trim().is_empty() {
        errors.push(validation("storage.data_dir must not be empty"));
    }
    if config.storage.orders_file.trim().is_empty() {
        errors.push(validation("storage.orders_file must not be empty"));
    }
    if config.storage.complaints_file.trim().is_empty() {
        errors.push(validation("storage.complaints_file must not be empty"));
    }

    if config.agent.history_turns == 0 {
        errors.push(validation("agent.history_turns must be at least 1"));
    }

    if !(0.0..=2.0).contains(&config.openai.temperature) {
        errors.push(validation(format!(
            "openai.temperature must be within 0.0..=2.0, got {}",
            config.openai.temperature
        )));
    }

    if config.knowledge.top_k == 0 {
        errors.push(validation("knowledge.top_k must be at least 1"));
    }
    if config.knowledge.chunk_overlap >= config.knowledge.chunk_size {
        errors.push(validation(format!(
            "knowledge.chunk_overlap ({}) must be smaller than knowledge.chunk_size ({})",
            config.knowledge.chunk_overlap, config.knowledge.chunk_size
        )));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}
