// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Trustline framework.

use thiserror::Error;

/// The primary error type used across Trustline crates.
#[derive(Debug, Error)]
pub enum TrustlineError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Store I/O or serialization errors surfaced by admin-facing mutations.
    /// Read paths never raise this; they degrade to empty collections.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Text-generation backend errors (API failure, bad response shape).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Rejected input to a store mutation (bad order id, duplicate id,
    /// unknown status). Never corrupts stored state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
