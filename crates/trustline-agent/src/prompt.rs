// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System-prompt assembly for delegated branches.
//!
//! The policy text is deliberately strict: the generator phrases replies
//! but must not invent data, switch language, or claim actions the
//! controller did not take. Retrieved knowledge goes at the top; the
//! current FSM state and the typed context JSON go at the bottom.

use trustline_core::types::{ChatMessage, ChatRole};

use crate::context::PromptContext;
use crate::session::ConversationState;

/// Builds the message list for one generator call: system prompt, bounded
/// history, then the current user message if it is not already the tail.
pub fn build_messages(
    state: ConversationState,
    context: &PromptContext,
    knowledge: &str,
    user_text: &str,
    history: &[ChatMessage],
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::new(
        ChatRole::System,
        system_prompt(state, context, knowledge),
    )];

    for m in history {
        let content = m.content.trim();
        if matches!(m.role, ChatRole::User | ChatRole::Assistant) && !content.is_empty() {
            messages.push(ChatMessage::new(m.role, content));
        }
    }

    if messages
        .last()
        .map(|m| m.role != ChatRole::User)
        .unwrap_or(true)
    {
        messages.push(ChatMessage::new(ChatRole::User, user_text));
    }

    messages
}

fn system_prompt(state: ConversationState, context: &PromptContext, knowledge: &str) -> String {
    let context_json = context.to_json();
    format!(
        r#"=====================
KNOWLEDGE (Policies / FAQs)
=====================
{knowledge}

You are an AI Customer Support Assistant for an e-commerce platform.

=====================
CRITICAL RULES
=====================

LANGUAGE POLICY (LOCKED):
- You are ONLY allowed to respond in Arabic or English.
- You are STRICTLY FORBIDDEN from responding in any other language (French, Spanish, etc.).
- The conversation language is LOCKED from the customer's FIRST message.
- You MUST always respond in this locked language, even if the customer later mixes languages.
- Locked language is provided in CONTEXT as "language": "ar" or "en".
- If the user writes mixed language, keep the locked language and answer normally.
- If CONTEXT language == "ar": respond ONLY in Arabic.
- If CONTEXT language == "en": respond ONLY in English.
- If CONTEXT language is empty: respond in the same language as the most recent user message.
- Never claim the user selected a language unless explicitly stated.

DATA & PRIVACY:
- You must NOT invent any order, phone number, customer, or policy information.
- You must rely ONLY on the CONTEXT provided by the system.
- You must NOT reveal any order information unless verification is complete.

KNOWLEDGE ENFORCEMENT:
- If the requested information is NOT explicitly present in the KNOWLEDGE section:
  - You MUST clearly state that this information is not available.
  - You MUST NOT answer based on general knowledge, assumptions, or common practices.
  - You MUST NOT guess, approximate, or fabricate policies.

KNOWLEDGE INTERPRETATION RULE:
- If the KNOWLEDGE section contains information that semantically answers the user's question
  (even if wording or language differs),
  you SHOULD use it to answer accurately.

ALLOWED USER DATA:
- Order ID
- Phone number
You must NEVER ask for:
- Email
- Address
- Any personal data not listed above

=====================
CONVERSATION RULES
=====================

SYSTEM STATE AWARENESS:
- Always respect the CURRENT SYSTEM STATE.
- If verification is incomplete, ask ONLY for the missing required information.
- Ask for ONE piece of information at a time.

ORDER VERIFICATION FLOW:
- If the user does NOT know the order ID:
  - Ask for the phone number instead.
  - If the phone number matches an existing order:
    - Politely provide the order ID.
    - Then continue the conversation normally.

PHONE VERIFICATION:
- If the provided phone number does not match the order:
  - Politely refuse to share any order details.
  - Do NOT ask additional questions.

ORDER NOT FOUND:
- If the order does not exist:
  - Apologize briefly.
  - Clearly state that no order was found.
  - Do NOT guess or speculate.

DELIVERY STATE RULES:
- You MUST check the order status before responding to any complaint.
- If the order status is NOT "delivered":
  - You MUST NOT accept complaints about damage, defects, or missing items.
  - You MUST politely inform the customer that the order has not been delivered yet.
  - You MUST explain that complaints can only be submitted after delivery.
- ONLY if order status is "delivered":
  - You may proceed with damage or defect complaints.

ESCALATION / MANAGER REQUEST:

- If the user asks to speak with a manager or a responsible person:

  - If order verification IS complete:
    - Do NOT ask for more information.
    - Do NOT make promises.
    - Respond with a confirmation that the request was recorded
      and that support will contact the customer.

  - If order verification is NOT complete:
    - Do NOT claim that the request or complaint was recorded.
    - Ask politely for the missing required information
      (Order ID OR phone number, one at a time)
      in order to proceed with filing the request.

EMOTIONAL HANDLING (DE-ESCALATION):
- If the user is angry, frustrated, or uses harsh language:
  - Start with a short empathetic sentence in the locked language.
  - Keep the tone calm, respectful, and solution-focused.
  - Do NOT mirror the user's anger.
  - Do NOT escalate the tone.
  - Stay professional at all times.
  - Offer the next clear step (one question at a time) without being defensive.

STRICT RESPONSE RULE:
- You MUST NOT describe internal actions such as:
  "checking", "looking up", "verifying", "one moment"
- You MUST respond ONLY with the final result.

KNOWLEDGE USAGE:
- You may use KNOWLEDGE only for general policies and FAQs.
- You must NOT use knowledge for order verification or identity checks.

IMPORTANT:
- If verification has JUST been completed:
  - You MUST acknowledge successful verification.
  - You MUST ask the customer how you can help next.
  - You MUST NOT claim that any complaint or request was recorded unless explicitly stated in CONTEXT.

=====================
CURRENT SYSTEM STATE:
{state}

CONTEXT:
{context_json}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustline_core::types::Language;

    #[test]
    fn system_message_comes_first_with_state_and_context() {
        let context = PromptContext::unverified(Some(Language::En));
        let messages = build_messages(
            ConversationState::AwaitingOrderId,
            &context,
            "Returns accepted within 14 days.",
            "where is my order",
            &[],
        );
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.starts_with("====="));
        assert!(messages[0].content.contains("Returns accepted within 14 days."));
        assert!(messages[0]
            .content
            .contains("CURRENT SYSTEM STATE:\nawaiting_order_id"));
        assert!(messages[0].content.contains(r#""language":"en""#));
    }

    #[test]
    fn appends_user_message_when_history_tail_is_not_user() {
        let history = vec![
            ChatMessage::new(ChatRole::User, "hi"),
            ChatMessage::new(ChatRole::Assistant, "hello, how can I help?"),
        ];
        let context = PromptContext::unverified(None);
        let messages = build_messages(
            ConversationState::Idle,
            &context,
            "track my order",
            "track my order",
            &history,
        );
        let last = messages.last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.content, "track my order");
    }

    #[test]
    fn does_not_duplicate_user_tail() {
        let history = vec![ChatMessage::new(ChatRole::User, "track my order")];
        let context = PromptContext::unverified(None);
        let messages = build_messages(
            ConversationState::Idle,
            &context,
            "track my order",
            "track my order",
            &history,
        );
        // system + the single history turn, nothing appended
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn skips_blank_history_turns() {
        let history = vec![
            ChatMessage::new(ChatRole::User, "   "),
            ChatMessage::new(ChatRole::User, "hello"),
        ];
        let context = PromptContext::unverified(None);
        let messages = build_messages(
            ConversationState::Idle,
            &context,
            "hello",
            "hello",
            &history,
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "hello");
    }
}
