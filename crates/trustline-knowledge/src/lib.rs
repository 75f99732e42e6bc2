// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical snippet retrieval over a plain-text knowledge base.
//!
//! The knowledge base is one text file of policies and FAQs, chunked at load
//! time and scored per query by case-insensitive token overlap. It stands
//! behind the [`KnowledgeRetriever`] contract: up to `top_k` snippets,
//! best-effort only, never an error -- a missing file means an empty base
//! and every query returns nothing.
//!
//! [`KnowledgeRetriever`]: trustline_core::KnowledgeRetriever

pub mod chunker;
pub mod retriever;

pub use chunker::chunk_text;
pub use retriever::KnowledgeBase;
