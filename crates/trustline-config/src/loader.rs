// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order: compiled defaults < `/etc/trustline/trustline.toml` <
//! `~/.config/trustline/trustline.toml` < `./trustline.toml` < `TRUSTLINE_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TrustlineConfig;

/// Load configuration from the standard XDG hierarchy with env overrides.
pub fn load_config() -> Result<TrustlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrustlineConfig::default()))
        .merge(Toml::file("/etc/trustline/trustline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("trustline/trustline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("trustline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (tests, explicit config).
pub fn load_config_from_str(toml_content: &str) -> Result<TrustlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrustlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<TrustlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrustlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` instead of `Env::split("_")`: key names themselves
/// contain underscores, so `TRUSTLINE_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("TRUSTLINE_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("agent_", "agent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("knowledge_", "knowledge.", 1);
        mapped.into()
    })
}
