// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation controller: applies one customer message to a session.
//!
//! All verification and complaint-filing decisions are made here; the
//! text generator only phrases replies for branches without a fixed
//! template. Transition order within a state matters: classifier keyword
//! sets overlap, so branches are checked in a fixed precedence.
//!
//! Mutation discipline: the user turn is appended up front; every other
//! session mutation happens only after the branch's backend calls
//! succeeded. A generator failure therefore aborts the turn with the
//! session otherwise untouched.

use tracing::{debug, info};

use trustline_core::traits::{KnowledgeRetriever, TextGenerator};
use trustline_core::types::{ChatRole, ComplaintCategory, OrderSnapshot, OrderStatus};
use trustline_core::{extract_digits, normalize_phone, TrustlineError};
use trustline_intent::classifier::{
    detect_language, is_escalation_request, is_general_complaint, is_order_intent,
    is_policy_intent, is_post_delivery_complaint, is_yes, last_assistant_asked_escalation,
    looks_like_order_id, looks_like_phone, user_says_dont_know_order,
};
use trustline_storage::{ComplaintStore, NewComplaint, OrderStore};

use crate::context::PromptContext;
use crate::prompt;
use crate::session::{ConversationState, CustomerSession};
use crate::templates;

/// Backends and tuning the controller needs for one turn.
pub struct Backends<'a> {
    pub orders: &'a OrderStore,
    pub complaints: &'a ComplaintStore,
    pub generator: &'a (dyn TextGenerator + Send + Sync),
    pub retriever: &'a (dyn KnowledgeRetriever + Send + Sync),
    /// Bound on the history suffix included in generator prompts.
    pub history_turns: usize,
}

/// Applies one user message to the session and returns the reply.
///
/// Empty input returns an empty string without touching the session.
pub async fn handle_customer_message(
    user_text: &str,
    session: &mut CustomerSession,
    backends: &Backends<'_>,
) -> Result<String, TrustlineError> {
    let trimmed = user_text.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    // Order ids are matched case-insensitively by uppercasing the input.
    let user_text = if looks_like_order_id(trimmed) {
        trimmed.to_uppercase()
    } else {
        trimmed.to_string()
    };

    if session.locked_language.is_none() {
        if let Some(lang) = detect_language(&user_text) {
            debug!(language = %lang, "conversation language locked");
            session.locked_language = Some(lang);
        }
    }
    let lang = session.locked_language;

    let orders = backends.orders.load_all();
    let knowledge = backends.retriever.search(&user_text).await.join("\n");

    session.add_turn(ChatRole::User, &user_text);

    // Escalation before verification: intake first, so nothing is claimed
    // as recorded while nothing was saved.
    if session.state != ConversationState::Verified && is_escalation_request(&user_text) {
        session.last_issue_text = Some(user_text.clone());
        session.state = ConversationState::AwaitingOrderId;
        let reply = templates::escalation_intake(lang);
        session.add_turn(ChatRole::Assistant, &reply);
        return Ok(reply);
    }

    match session.state {
        ConversationState::Idle => {
            let target = if is_policy_intent(&user_text) && !is_order_intent(&user_text) {
                ConversationState::Idle
            } else if is_order_intent(&user_text) {
                ConversationState::AwaitingOrderId
            } else {
                ConversationState::Idle
            };
            let reply = delegate(
                backends,
                session,
                target,
                PromptContext::unverified(lang),
                &knowledge,
                &user_text,
            )
            .await?;
            session.state = target;
            session.add_turn(ChatRole::Assistant, &reply);
            Ok(reply)
        }

        ConversationState::AwaitingOrderId => {
            // Disambiguation pick from an earlier phone match.
            if session.matched_order_ids.iter().any(|id| id == &user_text) {
                match orders.get(&user_text) {
                    // Candidate vanished since listing: start over.
                    None => {
                        session.state = ConversationState::Idle;
                        session.order_id = None;
                        session.matched_order_ids.clear();
                        let reply = templates::security_ask_phone(lang);
                        session.add_turn(ChatRole::Assistant, &reply);
                        return Ok(reply);
                    }
                    Some(order) => {
                        // Selecting an order still requires the phone.
                        let snapshot = OrderSnapshot::capture(&user_text, order);
                        let reply = delegate(
                            backends,
                            session,
                            ConversationState::AwaitingPhone,
                            PromptContext::unverified(lang).with_order_exists(true),
                            &knowledge,
                            &user_text,
                        )
                        .await?;
                        session.order_id = Some(user_text.clone());
                        session.order_snapshot = Some(snapshot);
                        session.matched_order_ids.clear();
                        session.state = ConversationState::AwaitingPhone;
                        session.add_turn(ChatRole::Assistant, &reply);
                        return Ok(reply);
                    }
                }
            }

            // Order-id shape, but no such order.
            if looks_like_order_id(&user_text) && !orders.contains_key(&user_text) {
                let reply = delegate(
                    backends,
                    session,
                    ConversationState::Idle,
                    PromptContext::unverified(lang).with_order_exists(false),
                    &knowledge,
                    &user_text,
                )
                .await?;
                session.state = ConversationState::Idle;
                session.order_id = None;
                session.matched_order_ids.clear();
                session.add_turn(ChatRole::Assistant, &reply);
                return Ok(reply);
            }

            if user_says_dont_know_order(&user_text) {
                let reply = delegate(
                    backends,
                    session,
                    ConversationState::AwaitingPhone,
                    PromptContext::unverified(lang),
                    &knowledge,
                    &user_text,
                )
                .await?;
                session.order_id = None;
                session.matched_order_ids.clear();
                session.state = ConversationState::AwaitingPhone;
                session.add_turn(ChatRole::Assistant, &reply);
                return Ok(reply);
            }

            if looks_like_phone(&user_text) {
                let phone = normalize_phone(&extract_digits(&user_text));
                let matches = backends.orders.find_by_phone(&phone);

                if matches.is_empty() {
                    let reply = delegate(
                        backends,
                        session,
                        ConversationState::AwaitingOrderId,
                        PromptContext::unverified(lang).with_reason("no_order_for_phone"),
                        &knowledge,
                        &user_text,
                    )
                    .await?;
                    session.matched_order_ids.clear();
                    session.add_turn(ChatRole::Assistant, &reply);
                    return Ok(reply);
                }

                if matches.len() > 1 {
                    let lines: Vec<String> = matches
                        .iter()
                        .filter_map(|oid| {
                            orders
                                .get(oid)
                                .map(|o| templates::order_choice_line(lang, oid, o.status))
                        })
                        .collect();
                    let reply = templates::multiple_orders_pick(lang, &lines.join("\n"));
                    session.matched_order_ids = matches;
                    session.add_turn(ChatRole::Assistant, &reply);
                    return Ok(reply);
                }

                // Single match: phone alone verifies, reveal the id.
                let order_id = matches[0].clone();
                if let Some(order) = orders.get(&order_id) {
                    let snapshot = OrderSnapshot::capture(&order_id, order);
                    let reply = delegate(
                        backends,
                        session,
                        ConversationState::Verified,
                        PromptContext::verified(Some(snapshot.clone()), lang)
                            .with_reveal_order_id(),
                        &knowledge,
                        &user_text,
                    )
                    .await?;
                    info!(order_id = %order_id, "customer verified by phone");
                    session.order_id = Some(order_id);
                    session.order_snapshot = Some(snapshot);
                    session.matched_order_ids.clear();
                    session.state = ConversationState::Verified;
                    session.add_turn(ChatRole::Assistant, &reply);
                    return Ok(reply);
                }
            }

            // Known order id typed directly: ask for the phone next.
            if orders.contains_key(&user_text) {
                session.order_id = Some(user_text.clone());
                session.matched_order_ids.clear();
                session.state = ConversationState::AwaitingPhone;
                let reply = templates::security_ask_phone(lang);
                session.add_turn(ChatRole::Assistant, &reply);
                return Ok(reply);
            }

            let reply = delegate(
                backends,
                session,
                ConversationState::AwaitingOrderId,
                PromptContext::unverified(lang),
                &knowledge,
                &user_text,
            )
            .await?;
            session.add_turn(ChatRole::Assistant, &reply);
            Ok(reply)
        }

        ConversationState::AwaitingPhone => {
            if !looks_like_phone(&user_text) {
                let reply = delegate(
                    backends,
                    session,
                    ConversationState::AwaitingPhone,
                    PromptContext::unverified(lang),
                    &knowledge,
                    &user_text,
                )
                .await?;
                session.add_turn(ChatRole::Assistant, &reply);
                return Ok(reply);
            }

            let phone = normalize_phone(&extract_digits(&user_text));
            let matches = backends.orders.find_by_phone(&phone);

            let mismatch = matches.is_empty()
                || session
                    .order_id
                    .as_ref()
                    .is_some_and(|oid| !matches.contains(oid));
            if mismatch {
                let reply = delegate(
                    backends,
                    session,
                    ConversationState::AwaitingPhone,
                    PromptContext::unverified(lang).with_phone_match(false),
                    &knowledge,
                    &user_text,
                )
                .await?;
                session.add_turn(ChatRole::Assistant, &reply);
                return Ok(reply);
            }

            let order_id = match session.order_id.clone() {
                Some(oid) => oid,
                None if matches.len() > 1 => {
                    let lines: Vec<String> = matches
                        .iter()
                        .filter_map(|oid| {
                            orders
                                .get(oid)
                                .map(|o| templates::order_choice_line(lang, oid, o.status))
                        })
                        .collect();
                    let reply = templates::multiple_orders_intended(lang, &lines.join("\n"));
                    session.matched_order_ids = matches;
                    session.state = ConversationState::AwaitingOrderId;
                    session.add_turn(ChatRole::Assistant, &reply);
                    return Ok(reply);
                }
                None => matches[0].clone(),
            };

            let Some(order) = orders.get(&order_id) else {
                // Order disappeared between listing and verification.
                let reply = delegate(
                    backends,
                    session,
                    ConversationState::AwaitingPhone,
                    PromptContext::unverified(lang).with_phone_match(false),
                    &knowledge,
                    &user_text,
                )
                .await?;
                session.add_turn(ChatRole::Assistant, &reply);
                return Ok(reply);
            };

            let snapshot = OrderSnapshot::capture(&order_id, order);
            let reply = delegate(
                backends,
                session,
                ConversationState::Verified,
                PromptContext::verified(Some(snapshot.clone()), lang).with_reveal_order_id(),
                &knowledge,
                &user_text,
            )
            .await?;
            info!(order_id = %order_id, "customer verified by phone");
            session.order_id = Some(order_id);
            session.order_snapshot = Some(snapshot);
            session.matched_order_ids.clear();
            session.state = ConversationState::Verified;
            session.add_turn(ChatRole::Assistant, &reply);
            Ok(reply)
        }

        ConversationState::Verified => {
            handle_verified(&user_text, session, backends, &knowledge).await
        }
    }
}

/// Verified-stage handling: complaint intake and free conversation.
async fn handle_verified(
    user_text: &str,
    session: &mut CustomerSession,
    backends: &Backends<'_>,
    knowledge: &str,
) -> Result<String, TrustlineError> {
    let lang = session.locked_language;
    let affirmation = is_yes(user_text);

    // Bare confirmation with nothing to confirm.
    if affirmation
        && session.pending_image_paths.is_empty()
        && session.last_issue_text.as_deref().unwrap_or("").is_empty()
    {
        let reply = templates::describe_issue_first(lang);
        session.add_turn(ChatRole::Assistant, &reply);
        return Ok(reply);
    }

    // Confirmation while images were requested but never attached.
    if session.awaiting_images && affirmation && session.pending_image_paths.is_empty() {
        let reply = templates::images_still_missing(lang);
        session.add_turn(ChatRole::Assistant, &reply);
        return Ok(reply);
    }

    // Keep the described issue; affirmations must not overwrite it.
    if !affirmation {
        session.last_issue_text = Some(user_text.to_string());
    }

    let order_status = session.order_snapshot.as_ref().map(|s| s.status);

    // General complaints (delay, service, courier): filed immediately,
    // no delivery requirement, no images.
    if is_general_complaint(user_text) {
        let complaint =
            file_complaint(backends, session, user_text, Vec::new(), ComplaintCategory::Service)
                .await?;
        clear_complaint_intake(session);
        let reply = templates::complaint_recorded(lang, &complaint.complaint_id);
        session.add_turn(ChatRole::Assistant, &reply);
        return Ok(reply);
    }

    // Damage/missing-item complaints: delivered orders only, images first.
    if is_post_delivery_complaint(user_text) {
        if order_status != Some(OrderStatus::Delivered) {
            let reply = templates::delivered_only(lang);
            session.add_turn(ChatRole::Assistant, &reply);
            return Ok(reply);
        }

        if session.pending_image_paths.is_empty() {
            session.awaiting_images = true;
            let reply = templates::attach_images_request(lang);
            session.add_turn(ChatRole::Assistant, &reply);
            return Ok(reply);
        }

        let images = session.pending_image_paths.clone();
        let complaint =
            file_complaint(backends, session, user_text, images, ComplaintCategory::Damage)
                .await?;
        clear_complaint_intake(session);
        let reply = templates::damage_complaint_recorded(lang, &complaint.complaint_id);
        session.add_turn(ChatRole::Assistant, &reply);
        return Ok(reply);
    }

    // Images attached and the customer confirms the described issue.
    if !session.pending_image_paths.is_empty() && session.last_issue_text.is_some() && affirmation
    {
        let images = session.pending_image_paths.clone();
        let complaint =
            file_complaint(backends, session, user_text, images, ComplaintCategory::Damage)
                .await?;
        clear_complaint_intake(session);
        let reply = templates::damage_complaint_recorded(lang, &complaint.complaint_id);
        session.add_turn(ChatRole::Assistant, &reply);
        return Ok(reply);
    }

    // Escalation, either explicit or confirming an assistant offer.
    if is_escalation_request(user_text)
        || (affirmation && last_assistant_asked_escalation(&session.history))
    {
        let complaint = file_complaint(
            backends,
            session,
            user_text,
            Vec::new(),
            ComplaintCategory::Escalation,
        )
        .await?;
        clear_complaint_intake(session);
        let reply = templates::escalation_recorded(lang, &complaint.complaint_id);
        session.add_turn(ChatRole::Assistant, &reply);
        return Ok(reply);
    }

    let reply = delegate(
        backends,
        session,
        ConversationState::Verified,
        PromptContext::verified(session.order_snapshot.clone(), lang),
        knowledge,
        user_text,
    )
    .await?;
    session.add_turn(ChatRole::Assistant, &reply);
    Ok(reply)
}

/// Builds the prompt for a delegated branch and calls the generator.
async fn delegate(
    backends: &Backends<'_>,
    session: &CustomerSession,
    state: ConversationState,
    context: PromptContext,
    knowledge: &str,
    user_text: &str,
) -> Result<String, TrustlineError> {
    let messages = prompt::build_messages(
        state,
        &context,
        knowledge,
        user_text,
        session.recent_history(backends.history_turns),
    );
    debug!(state = %state, messages = messages.len(), "delegating to generator");
    let reply = backends.generator.generate(&messages).await?;
    Ok(reply.trim().to_string())
}

/// Files a complaint with identity taken from the verification snapshot.
async fn file_complaint(
    backends: &Backends<'_>,
    session: &CustomerSession,
    fallback_message: &str,
    images: Vec<String>,
    category: ComplaintCategory,
) -> Result<trustline_core::types::Complaint, TrustlineError> {
    let (order_id, customer_name, phone) = match &session.order_snapshot {
        Some(s) => (s.order_id.clone(), s.customer_name.clone(), s.phone.clone()),
        None => (
            session.order_id.clone().unwrap_or_default(),
            String::new(),
            String::new(),
        ),
    };
    let message = session
        .last_issue_text
        .clone()
        .unwrap_or_else(|| fallback_message.to_string());

    let complaint = backends
        .complaints
        .create(NewComplaint {
            order_id,
            customer_name,
            phone,
            message,
            images,
            category,
        })
        .await?;
    info!(complaint_id = %complaint.complaint_id, category = %category, "complaint filed");
    Ok(complaint)
}

fn clear_complaint_intake(session: &mut CustomerSession) {
    session.pending_image_paths.clear();
    session.last_issue_text = None;
    session.awaiting_images = false;
}
