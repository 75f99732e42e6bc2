// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All sections use `#[serde(deny_unknown_fields)]` so misspelled keys are
//! rejected at startup with a diagnostic instead of being silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Trustline configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section is optional and defaults to values
/// that work for a local demo deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrustlineConfig {
    /// Agent identity and conversation settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI Chat Completions settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// File store locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Knowledge-base retrieval settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Agent identity and conversation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the support agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of recent history turns included in generator context.
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            history_turns: default_history_turns(),
        }
    }
}

fn default_agent_name() -> String {
    "trustline".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_history_turns() -> usize {
    10
}

/// OpenAI Chat Completions configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Falls back to the `OPENAI_API_KEY` environment variable when
    /// unset; without either the shell degrades to a fixed apology reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Retries after a transient API error (429/5xx).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Override for the API base URL (self-hosted gateways, tests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_retries: default_max_retries(),
            base_url: None,
        }
    }
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_retries() -> u32 {
    1
}

/// File store configuration.
///
/// `orders_file`, `complaints_file`, and `images_dir` are resolved relative
/// to `data_dir` unless given as absolute paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Base directory for all persisted documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Orders document (JSON map keyed by order id).
    #[serde(default = "default_orders_file")]
    pub orders_file: String,

    /// Complaints document (JSON list).
    #[serde(default = "default_complaints_file")]
    pub complaints_file: String,

    /// Directory where the UI drops uploaded complaint images.
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

impl StorageConfig {
    fn resolve(&self, leaf: &str) -> PathBuf {
        let p = PathBuf::from(leaf);
        if p.is_absolute() {
            p
        } else {
            PathBuf::from(&self.data_dir).join(p)
        }
    }

    /// Full path to the orders document.
    pub fn orders_path(&self) -> PathBuf {
        self.resolve(&self.orders_file)
    }

    /// Full path to the complaints document.
    pub fn complaints_path(&self) -> PathBuf {
        self.resolve(&self.complaints_file)
    }

    /// Full path to the complaint image drop directory.
    pub fn images_path(&self) -> PathBuf {
        self.resolve(&self.images_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            orders_file: default_orders_file(),
            complaints_file: default_complaints_file(),
            images_dir: default_images_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_orders_file() -> String {
    "orders.json".to_string()
}

fn default_complaints_file() -> String {
    "complaints.json".to_string()
}

fn default_images_dir() -> String {
    "complaint_images".to_string()
}

/// Knowledge-base retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Plain-text knowledge base (policies, FAQs). Missing file means the
    /// retriever runs with an empty base.
    #[serde(default = "default_knowledge_path")]
    pub path: String,

    /// Target chunk size in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters of overlap carried between consecutive chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Maximum snippets returned per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }
}

fn default_knowledge_path() -> String {
    "data/knowledge_base.txt".to_string()
}

fn default_chunk_size() -> usize {
    400
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_top_k() -> usize {
    3
}
