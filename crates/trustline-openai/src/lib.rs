// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Chat Completions backend for Trustline.
//!
//! [`OpenAiGenerator`] implements the [`TextGenerator`] contract over the
//! Chat Completions endpoint. The generator performs no state mutation;
//! it only phrases replies from the instruction payload the controller
//! hands it.
//!
//! [`TextGenerator`]: trustline_core::TextGenerator

pub mod client;
pub mod types;

use async_trait::async_trait;

use trustline_config::model::OpenAiConfig;
use trustline_core::types::ChatMessage;
use trustline_core::{TextGenerator, TrustlineError};

use crate::client::OpenAiClient;
use crate::types::{ApiMessage, ChatCompletionRequest};

pub use client::OpenAiClient as Client;

/// Text generator backed by the OpenAI Chat Completions API.
pub struct OpenAiGenerator {
    client: OpenAiClient,
    model: String,
    temperature: f32,
}

impl OpenAiGenerator {
    /// Builds a generator from configuration.
    ///
    /// The API key comes from `openai.api_key` or, failing that, the
    /// `OPENAI_API_KEY` environment variable. A missing key is a `Config`
    /// error so the caller can degrade to a fixed apology before ever
    /// invoking the controller.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, TrustlineError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                TrustlineError::Config(
                    "OpenAI API key not set (openai.api_key or OPENAI_API_KEY)".into(),
                )
            })?;

        let mut client = OpenAiClient::new(api_key, config.max_retries)?;
        if let Some(base) = &config.base_url {
            client = client.with_base_url(base.clone());
        }

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, TrustlineError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.iter().map(ApiMessage::from).collect(),
            temperature: self.temperature,
        };
        let response = self.client.complete(&request).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| TrustlineError::Provider {
                message: "chat completion returned no choices".into(),
                source: None,
            })?;
        Ok(content.trim().to_string())
    }
}
