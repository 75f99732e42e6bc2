// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless keyword classifiers over raw customer text.
//!
//! Every function is total over `&str`: empty or whitespace-only input
//! returns the safe default, nothing here can fail or touch state. The
//! keyword lists cover Jordanian Arabic plus English synonyms.
//!
//! Several lists overlap (e.g. delivery words appear in both the policy and
//! order lists), so classification is order-dependent. The controller
//! applies the fixed precedence: escalation > policy-without-order >
//! order-intent > fallback.

pub mod classifier;

pub use classifier::{
    detect_language, is_escalation_request, is_general_complaint, is_order_intent,
    is_policy_intent, is_post_delivery_complaint, is_yes, last_assistant_asked_escalation,
    looks_like_order_id, looks_like_phone, user_says_dont_know_order,
};
