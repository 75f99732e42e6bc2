// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation controller for the Trustline support assistant.
//!
//! The controller is a four-state FSM (idle, awaiting order id, awaiting
//! phone, verified) driving identity verification, complaint intake, and
//! delegation to the text-generation backend:
//! - [`session::CustomerSession`] holds per-conversation state
//! - [`flow::handle_customer_message`] applies one user message to it
//! - [`prompt`] assembles the policy prompt for delegated branches
//! - [`templates`] holds the fixed bilingual replies the FSM returns itself
//!
//! Security-critical decisions (verification, complaint filing, order
//! disclosure) are made here; the generator only phrases replies.

pub mod context;
pub mod flow;
pub mod prompt;
pub mod session;
pub mod templates;

pub use context::PromptContext;
pub use flow::{handle_customer_message, Backends};
pub use session::{ConversationState, CustomerSession};
