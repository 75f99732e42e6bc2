// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Trustline support-intake framework.
//!
//! This crate provides the error type, the shared domain types (orders,
//! complaints, chat turns), phone normalization, and the adapter traits
//! implemented by the text-generation and knowledge-retrieval backends.

pub mod error;
pub mod phone;
pub mod traits;
pub mod types;

pub use error::TrustlineError;
pub use phone::{extract_digits, normalize_phone};
pub use traits::{KnowledgeRetriever, TextGenerator};
pub use types::{
    ChatMessage, ChatRole, Complaint, ComplaintCategory, ComplaintStatus, Language, Order,
    OrderSnapshot, OrderStatus, PaymentMethod,
};
