// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token-overlap scoring over the chunked knowledge base.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use trustline_config::model::KnowledgeConfig;
use trustline_core::KnowledgeRetriever;

use crate::chunker::chunk_text;

/// In-memory chunked knowledge base.
///
/// Chunks are lowercase-tokenized once at load; queries are scored by the
/// number of distinct shared tokens. Only chunks with a non-zero score are
/// returned, best first, at most `top_k`.
pub struct KnowledgeBase {
    chunks: Vec<Chunk>,
    top_k: usize,
}

struct Chunk {
    text: String,
    tokens: HashSet<String>,
}

impl KnowledgeBase {
    /// Loads and chunks the knowledge file named by `config`.
    ///
    /// A missing or unreadable file is not an error: retrieval is
    /// best-effort, so the base simply starts empty and is logged for
    /// operators.
    pub fn open(config: &KnowledgeConfig) -> Self {
        let text = match std::fs::read_to_string(Path::new(&config.path)) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %config.path, error = %e, "knowledge base unavailable, retrieval disabled");
                String::new()
            }
        };
        Self::from_text(&text, config)
    }

    /// Builds a base from in-memory text (tests, embedded corpora).
    pub fn from_text(text: &str, config: &KnowledgeConfig) -> Self {
        let chunks: Vec<Chunk> = chunk_text(text, config.chunk_size, config.chunk_overlap)
            .into_iter()
            .map(|text| Chunk {
                tokens: tokenize(&text),
                text,
            })
            .collect();
        debug!(chunks = chunks.len(), "knowledge base loaded");
        Self {
            chunks,
            top_k: config.top_k,
        }
    }

    /// Number of chunks currently held.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl KnowledgeRetriever for KnowledgeBase {
    async fn search(&self, query: &str) -> Vec<String> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || self.chunks.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &Chunk)> = self
            .chunks
            .iter()
            .map(|chunk| (chunk.tokens.intersection(&query_tokens).count(), chunk))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, chunk)| chunk.text.clone())
            .collect()
    }
}

/// Lowercased alphanumeric tokens. Splitting on non-alphanumerics keeps
/// Arabic words intact while discarding punctuation in either script.
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
