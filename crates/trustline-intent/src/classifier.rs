// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword and shape predicates for verification and intent routing.

use trustline_core::phone::extract_digits;
use trustline_core::types::{ChatMessage, ChatRole, Language};

/// Order ids look like `ORD-001`: the prefix plus at least two more chars.
const ORDER_ID_PREFIX: &str = "ORD-";
const ORDER_ID_MIN_LEN: usize = 6;

/// Phone-like digit counts. Wide enough for Jordan and the Gulf with or
/// without a country code.
const PHONE_DIGITS_MIN: usize = 9;
const PHONE_DIGITS_MAX: usize = 15;

const POLICY_KEYWORDS_AR: &[&str] = &[
    "سياسة", "سياسات", "استرجاع", "ارجاع", "إرجاع", "استبدال", "ضمان", "خصوصية", "شروط",
    "توصيل", "استرداد",
];
const POLICY_KEYWORDS_EN: &[&str] = &[
    "policy", "refund", "return", "exchange", "warranty", "privacy", "terms", "delivery",
];

const ORDER_KEYWORDS_AR: &[&str] = &[
    "طلبي", "طلبيتي", "طلب", "رقم الطلب", "تتبع", "وين طلبي", "تاخر", "تأخر", "توصيل",
    "شحنة", "مندوب", "سائق",
];
const ORDER_KEYWORDS_EN: &[&str] = &[
    "order", "track", "tracking", "delivery", "delayed", "shipment", "courier", "driver",
];

const ESCALATION_KEYWORDS_AR: &[&str] = &[
    "مدير", "مسؤول", "الإدارة", "تصعيد", "اشكي", "شكوى", "ارفع شكوى", "ارفعها", "شكيت",
    "بدي حد مسؤول",
];
const ESCALATION_KEYWORDS_EN: &[&str] =
    &["manager", "supervisor", "escalate", "complaint", "raise a complaint"];

const DONT_KNOW_ORDER_AR: &[&str] = &[
    "ما بعرف", "مش عارف", "ما عندي رقم", "نسيت رقم", "مش متذكر", "ما بتذكر", "ما معي رقم",
];
const DONT_KNOW_ORDER_EN: &[&str] = &[
    "don't know",
    "do not know",
    "no order id",
    "forgot",
    "i don't remember",
];

/// Exact-match affirmations. Matched whole, not as substrings, so that a
/// sentence containing "ok" is not mistaken for a bare confirmation.
const AFFIRMATIONS: &[&str] = &[
    "نعم", "اه", "آه", "ايوه", "اي", "yes", "yep", "yeah", "ok", "تمام", "تم", "تأكيد",
    "أكد", "confirm",
];

const POST_DELIVERY_KEYWORDS_AR: &[&str] = &[
    "تلف", "مكسور", "خربان", "ناقص", "تالف", "فتح", "مفتوح", "وصلني غلط", "منتج غلط",
    "غلط بالطلب", "مشكلة بالمنتج",
];
const POST_DELIVERY_KEYWORDS_EN: &[&str] = &[
    "damage", "damaged", "broken", "missing", "defect", "opened", "wrong item", "wrong product",
];

const GENERAL_COMPLAINT_KEYWORDS_AR: &[&str] = &[
    "تأخير", "تاخير", "تاخر", "تأخر", "متأخر", "سوء", "تعامل", "مندوب", "سائق", "درايفر",
    "مش محترم", "وقح", "اسلوب", "خدمة سيئة", "توصيل سيء",
];
const GENERAL_COMPLAINT_KEYWORDS_EN: &[&str] = &[
    "delay", "late", "bad service", "rude", "courier", "driver", "behavior", "attitude",
];

/// Assistant-turn markers indicating an escalation prompt was just asked.
const ESCALATION_PROMPT_MARKERS: &[&str] = &["تصعيد", "مسؤول", "الإدارة", "manager", "escalat"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn matches_keywords(text: &str, arabic: &[&str], english: &[&str]) -> bool {
    let t = text.trim().to_lowercase();
    contains_any(&t, arabic) || contains_any(&t, english)
}

/// True when the digit count of `text` is phone-shaped (9..=15 digits).
pub fn looks_like_phone(text: &str) -> bool {
    let count = extract_digits(text).len();
    (PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&count)
}

/// True when trimmed, uppercased input starts with `ORD-` and is long
/// enough to carry an order number.
pub fn looks_like_order_id(text: &str) -> bool {
    let t = text.trim().to_uppercase();
    t.starts_with(ORDER_ID_PREFIX) && t.len() >= ORDER_ID_MIN_LEN
}

/// Detects the message language for session locking.
///
/// Order ids and phone numbers are neutral and must not lock the language,
/// so they return `None`. Otherwise: Arabic if any char is in the Arabic
/// Unicode block, else English if any ASCII letter is present, else `None`.
pub fn detect_language(text: &str) -> Option<Language> {
    let t = text.trim();
    if t.is_empty() || looks_like_order_id(t) || looks_like_phone(t) {
        return None;
    }
    if t.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)) {
        return Some(Language::Ar);
    }
    if t.chars().any(|c| c.is_ascii_alphabetic()) {
        return Some(Language::En);
    }
    None
}

/// Policy/FAQ questions: returns, refunds, warranty, terms.
pub fn is_policy_intent(text: &str) -> bool {
    matches_keywords(text, POLICY_KEYWORDS_AR, POLICY_KEYWORDS_EN)
}

/// Order-related intent: tracking words, or anything shaped like an order
/// id or phone number.
pub fn is_order_intent(text: &str) -> bool {
    matches_keywords(text, ORDER_KEYWORDS_AR, ORDER_KEYWORDS_EN)
        || looks_like_order_id(text)
        || looks_like_phone(text)
}

/// Requests to reach a manager or file a complaint.
pub fn is_escalation_request(text: &str) -> bool {
    matches_keywords(text, ESCALATION_KEYWORDS_AR, ESCALATION_KEYWORDS_EN)
}

/// The customer says they do not know their order id.
pub fn user_says_dont_know_order(text: &str) -> bool {
    matches_keywords(text, DONT_KNOW_ORDER_AR, DONT_KNOW_ORDER_EN)
}

/// Bare confirmation ("yes" / "تم" / "confirm"), matched exactly.
pub fn is_yes(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    AFFIRMATIONS.iter().any(|a| t == *a)
}

/// Damage/missing-item complaints, only valid after delivery.
pub fn is_post_delivery_complaint(text: &str) -> bool {
    matches_keywords(text, POST_DELIVERY_KEYWORDS_AR, POST_DELIVERY_KEYWORDS_EN)
}

/// Delay and service-quality complaints, valid regardless of delivery state.
pub fn is_general_complaint(text: &str) -> bool {
    matches_keywords(
        text,
        GENERAL_COMPLAINT_KEYWORDS_AR,
        GENERAL_COMPLAINT_KEYWORDS_EN,
    )
}

/// Scans history backward to the most recent assistant turn and tests it
/// for escalation wording in either language. Used so a bare "yes" after
/// an escalation prompt can be treated as consent to escalate.
pub fn last_assistant_asked_escalation(history: &[ChatMessage]) -> bool {
    history
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::Assistant)
        .is_some_and(|m| contains_any(&m.content.to_lowercase(), ESCALATION_PROMPT_MARKERS))
}
