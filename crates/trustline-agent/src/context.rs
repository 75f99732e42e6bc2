// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed context payload for the system prompt.
//!
//! Every delegated branch describes what the FSM established this turn in
//! a [`PromptContext`], which is serialized to JSON inside the system
//! message. Absent fields are omitted so the generator only ever sees
//! facts the controller actually asserted. Knowledge snippets are NOT part
//! of this payload; they go in their own prompt section.

use serde::Serialize;

use trustline_core::types::{Language, OrderSnapshot};

/// Facts the controller passes to the text generator for one turn.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal_order_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    pub language: Option<Language>,
}

impl PromptContext {
    /// Context for a pre-verification branch.
    pub fn unverified(language: Option<Language>) -> Self {
        Self {
            verified: false,
            order: None,
            order_exists: None,
            phone_match: None,
            reveal_order_id: None,
            reason: None,
            language,
        }
    }

    /// Context for a branch where identity is established.
    pub fn verified(order: Option<OrderSnapshot>, language: Option<Language>) -> Self {
        Self {
            verified: true,
            order,
            order_exists: None,
            phone_match: None,
            reveal_order_id: None,
            reason: None,
            language,
        }
    }

    pub fn with_order_exists(mut self, exists: bool) -> Self {
        self.order_exists = Some(exists);
        self
    }

    pub fn with_phone_match(mut self, matched: bool) -> Self {
        self.phone_match = Some(matched);
        self
    }

    /// Marks that this turn completed verification, so the generator
    /// should disclose the order id.
    pub fn with_reveal_order_id(mut self) -> Self {
        self.reveal_order_id = Some(true);
        self
    }

    pub fn with_reason(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }

    /// JSON rendering embedded in the system prompt.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustline_core::types::OrderStatus;

    #[test]
    fn unverified_context_omits_absent_fields() {
        let json = PromptContext::unverified(Some(Language::Ar)).to_json();
        assert_eq!(json, r#"{"verified":false,"language":"ar"}"#);
    }

    #[test]
    fn reason_and_flags_appear_when_set() {
        let json = PromptContext::unverified(Some(Language::En))
            .with_phone_match(false)
            .with_reason("no_order_for_phone")
            .to_json();
        assert!(json.contains(r#""phone_match":false"#));
        assert!(json.contains(r#""reason":"no_order_for_phone""#));
    }

    #[test]
    fn verified_context_embeds_order_snapshot() {
        let snapshot = OrderSnapshot {
            order_id: "ORD-001".into(),
            customer_name: "Lina".into(),
            status: OrderStatus::Delivered,
            last_updated: "2026-08-30T10:00:00".into(),
            phone: "0791234567".into(),
        };
        let json = PromptContext::verified(Some(snapshot), Some(Language::En))
            .with_reveal_order_id()
            .to_json();
        assert!(json.contains(r#""verified":true"#));
        assert!(json.contains(r#""order_id":"ORD-001""#));
        assert!(json.contains(r#""status":"delivered""#));
        assert!(json.contains(r#""reveal_order_id":true"#));
    }
}
