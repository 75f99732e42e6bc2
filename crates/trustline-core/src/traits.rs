// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the external backends the controller delegates to.
//!
//! Both backends are black boxes from the conversation controller's point
//! of view: the generator phrases replies, the retriever supplies optional
//! context. Neither may mutate session state.

use async_trait::async_trait;

use crate::error::TrustlineError;
use crate::types::ChatMessage;

/// Free-form text generation backend.
///
/// Takes a structured instruction (system message first) plus bounded
/// conversation history and returns a natural-language reply. A failure
/// here is the only error the conversation turn propagates.
#[async_trait]
pub trait TextGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, TrustlineError>;
}

/// Best-effort knowledge snippet retrieval.
///
/// Returns up to a fixed number of relevant snippets for a query. Never
/// authoritative for controller decisions and never fails: an unavailable
/// backend returns an empty list.
#[async_trait]
pub trait KnowledgeRetriever {
    async fn search(&self, query: &str) -> Vec<String>;
}
