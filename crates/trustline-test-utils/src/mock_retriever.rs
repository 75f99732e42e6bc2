// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-snippet retrieval backend.

use async_trait::async_trait;

use trustline_core::KnowledgeRetriever;

/// Mock retriever that returns the same snippet list for every query.
#[derive(Default)]
pub struct MockRetriever {
    snippets: Vec<String>,
}

impl MockRetriever {
    /// Retriever that returns nothing, like a missing knowledge base.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_snippets(snippets: Vec<String>) -> Self {
        Self { snippets }
    }
}

#[async_trait]
impl KnowledgeRetriever for MockRetriever {
    async fn search(&self, _query: &str) -> Vec<String> {
        self.snippets.clone()
    }
}
