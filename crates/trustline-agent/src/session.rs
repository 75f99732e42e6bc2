// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation session state.
//!
//! A [`CustomerSession`] lives for one conversation. It is plain data:
//! every mutation happens in the flow controller, and the whole struct is
//! serde-serializable so a caller can persist it between turns.

use serde::{Deserialize, Serialize};
use strum::Display;

use trustline_core::types::{ChatMessage, ChatRole, Language, OrderSnapshot};

/// States of the conversation FSM.
///
/// `Verified` is sticky: once identity is established the session never
/// reverts to an earlier state. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingOrderId,
    AwaitingPhone,
    Verified,
}

/// State carried across the turns of a single customer conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerSession {
    /// Current FSM state.
    pub state: ConversationState,
    /// Order id fixed for this conversation, once known.
    pub order_id: Option<String>,
    /// Snapshot captured at verification time. Later store mutations do
    /// not affect it.
    pub order_snapshot: Option<OrderSnapshot>,
    /// Candidate order ids awaiting disambiguation; empty otherwise.
    #[serde(default)]
    pub matched_order_ids: Vec<String>,
    /// Conversation language, locked from the first language-bearing
    /// message. Set at most once.
    pub locked_language: Option<Language>,
    /// Full transcript, append-only.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    /// Set when the controller asked for complaint images and is waiting
    /// for the customer to attach and confirm.
    #[serde(default)]
    pub awaiting_images: bool,
    /// Image paths attached out of band by the UI, consumed when a
    /// complaint is filed.
    #[serde(default)]
    pub pending_image_paths: Vec<String>,
    /// Most recent issue description, preserved across affirmation turns
    /// so the filed complaint carries the actual problem text.
    pub last_issue_text: Option<String>,
}

impl CustomerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one turn to the transcript. Empty content is dropped.
    pub fn add_turn(&mut self, role: ChatRole, content: &str) {
        if content.is_empty() {
            return;
        }
        self.history.push(ChatMessage::new(role, content));
    }

    /// The most recent `max_turns` transcript entries, oldest first.
    pub fn recent_history(&self, max_turns: usize) -> &[ChatMessage] {
        if max_turns == 0 {
            return &[];
        }
        let start = self.history.len().saturating_sub(max_turns);
        &self.history[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_displays_snake_case() {
        assert_eq!(ConversationState::Idle.to_string(), "idle");
        assert_eq!(
            ConversationState::AwaitingOrderId.to_string(),
            "awaiting_order_id"
        );
        assert_eq!(
            ConversationState::AwaitingPhone.to_string(),
            "awaiting_phone"
        );
        assert_eq!(ConversationState::Verified.to_string(), "verified");
    }

    #[test]
    fn add_turn_skips_empty_content() {
        let mut session = CustomerSession::new();
        session.add_turn(ChatRole::User, "");
        assert!(session.history.is_empty());
        session.add_turn(ChatRole::User, "hello");
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn recent_history_returns_bounded_suffix() {
        let mut session = CustomerSession::new();
        for i in 0..5 {
            session.add_turn(ChatRole::User, &format!("m{i}"));
        }
        let recent = session.recent_history(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "m2");
        assert_eq!(recent[2].content, "m4");

        assert!(session.recent_history(0).is_empty());
        assert_eq!(session.recent_history(10).len(), 5);
    }

    #[test]
    fn session_round_trips_through_serde() {
        let mut session = CustomerSession::new();
        session.state = ConversationState::AwaitingPhone;
        session.order_id = Some("ORD-001".into());
        session.locked_language = Some(Language::Ar);
        session.add_turn(ChatRole::User, "وين طلبي");

        let json = serde_json::to_string(&session).unwrap();
        let back: CustomerSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state, ConversationState::AwaitingPhone);
        assert_eq!(back.order_id.as_deref(), Some("ORD-001"));
        assert_eq!(back.locked_language, Some(Language::Ar));
        assert_eq!(back.history.len(), 1);
    }
}
