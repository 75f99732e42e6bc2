// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed bilingual replies returned by the FSM without consulting the
//! generator.
//!
//! These cover the branches where wording is part of the behavior
//! contract: verification prompts, disambiguation listings, complaint
//! intake, and filing confirmations. Arabic is the default when no
//! language is locked yet.

use trustline_core::types::{Language, OrderStatus};

fn is_en(lang: Option<Language>) -> bool {
    lang == Some(Language::En)
}

/// Pre-verification escalation intake: ask for an order id or phone.
pub fn escalation_intake(lang: Option<Language>) -> String {
    if is_en(lang) {
        "Sure. To file your request properly, type your Order ID (e.g., ORD-001). \
         If you don't know it, type your phone number."
            .to_string()
    } else {
        "أكيد. عشان أسجل الشكوى بشكل صحيح، اكتب رقم الطلب (مثال: ORD-001) أو إذا ما بتعرفه اكتب رقم هاتفك."
            .to_string()
    }
}

/// Known order id given; phone required before any details.
pub fn security_ask_phone(lang: Option<Language>) -> String {
    if is_en(lang) {
        "Great ✅ For security, please type the phone number linked to the order.".to_string()
    } else {
        "تمام ✅ للتأكد من الأمان، اكتب رقم هاتفك المرتبط بالطلب.".to_string()
    }
}

/// One line of a disambiguation listing.
pub fn order_choice_line(lang: Option<Language>, order_id: &str, status: OrderStatus) -> String {
    if is_en(lang) {
        format!("- {order_id} | status: {status}")
    } else {
        format!("- {order_id} | الحالة: {status}")
    }
}

/// Multiple orders matched the phone; ask the customer to pick one.
pub fn multiple_orders_pick(lang: Option<Language>, lines: &str) -> String {
    if is_en(lang) {
        format!(
            "We found multiple orders linked to your phone:\n{lines}\n\nPlease type the Order ID to continue."
        )
    } else {
        format!(
            "تم العثور على أكثر من طلب مرتبط برقم هاتفك:\n{lines}\n\nمن فضلك اكتب رقم الطلب حتى أكمل مساعدتك."
        )
    }
}

/// Disambiguation variant used when the phone came first.
pub fn multiple_orders_intended(lang: Option<Language>, lines: &str) -> String {
    if is_en(lang) {
        format!(
            "We found multiple orders linked to your phone:\n{lines}\n\nPlease type the intended Order ID."
        )
    } else {
        format!(
            "وجدنا أكثر من طلب مرتبط برقم هاتفك:\n{lines}\n\nمن فضلك اكتب رقم الطلب المقصود."
        )
    }
}

/// Bare affirmation with no described issue: ask for the description.
pub fn describe_issue_first(lang: Option<Language>) -> String {
    if is_en(lang) {
        "Okay ✅ If you want to file a complaint, please describe the issue you faced first."
            .to_string()
    } else {
        "تمام ✅ إذا بدك تسجل شكوى، اكتب وصف المشكلة التي واجهتها أولاً.".to_string()
    }
}

/// Damage complaint accepted; images required before filing.
pub fn attach_images_request(lang: Option<Language>) -> String {
    if is_en(lang) {
        "Okay. Attach images using (Attach Images), then type (confirm/yes) to submit."
            .to_string()
    } else {
        "تمام. أرفق صور المشكلة من خيار (Attach Images) ثم اكتب (تم/تأكيد) لإرسال الشكوى.".to_string()
    }
}

/// Customer confirmed but no images arrived yet.
pub fn images_still_missing(lang: Option<Language>) -> String {
    if is_en(lang) {
        "Okay ✅ but I still didn't receive any images. Attach them using (Attach Images), then type (confirm/yes)."
            .to_string()
    } else {
        "تمام ✅ بس لسه ما وصلني صور. ارفق الصور من (Attach Images) وبعدها اكتب (تم/تأكيد).".to_string()
    }
}

/// Damage/missing complaints are only accepted after delivery.
pub fn delivered_only(lang: Option<Language>) -> String {
    if is_en(lang) {
        "Damage/missing complaints can only be submitted after delivery.".to_string()
    } else {
        "يمكن تسجيل شكاوى التلف/النقص فقط بعد تسليم الطلب.".to_string()
    }
}

/// Confirmation for a general (service) complaint.
pub fn complaint_recorded(lang: Option<Language>, complaint_id: &str) -> String {
    if is_en(lang) {
        format!("✅ Your complaint has been recorded.\nComplaint ID: {complaint_id}")
    } else {
        format!("✅ تم تسجيل شكواك بنجاح.\nرقم الشكوى: {complaint_id}")
    }
}

/// Confirmation for a damage complaint, with an apology.
pub fn damage_complaint_recorded(lang: Option<Language>, complaint_id: &str) -> String {
    if is_en(lang) {
        format!(
            "We're sorry for the inconvenience you experienced 🙏\n\
             Your complaint has been successfully recorded and will be reviewed by our support team.✅\n\n\
             Complaint ID:\n{complaint_id}"
        )
    } else {
        format!(
            "نعتذر عن الإزعاج اللي واجهته 🙏\n\
             ✅ تم تسجيل شكواك بنجاح، وسيتم متابعتها من قبل فريق الدعم.\n\n\
             رقم الشكوى:\n{complaint_id}\n\n\
             هل في شيء ثاني أقدر أساعدك فيه؟"
        )
    }
}

/// Confirmation for an escalation request.
pub fn escalation_recorded(lang: Option<Language>, complaint_id: &str) -> String {
    if is_en(lang) {
        format!("✅ Your request has been recorded.\nComplaint ID: {complaint_id}")
    } else {
        format!("✅ تم تسجيل طلبك.\nرقم الشكوى: {complaint_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_is_the_default_language() {
        assert!(escalation_intake(None).contains("أكيد"));
        assert!(escalation_intake(Some(Language::Ar)).contains("أكيد"));
        assert!(escalation_intake(Some(Language::En)).starts_with("Sure."));
    }

    #[test]
    fn listing_lines_show_id_and_status() {
        let line = order_choice_line(Some(Language::En), "ORD-002", OrderStatus::Preparing);
        assert_eq!(line, "- ORD-002 | status: preparing");
        let line_ar = order_choice_line(Some(Language::Ar), "ORD-002", OrderStatus::Preparing);
        assert!(line_ar.contains("ORD-002"));
        assert!(line_ar.contains("الحالة"));
    }

    #[test]
    fn confirmations_carry_the_complaint_id() {
        for reply in [
            complaint_recorded(Some(Language::En), "CMP-20260830-101530-ab12cd"),
            damage_complaint_recorded(Some(Language::Ar), "CMP-20260830-101530-ab12cd"),
            escalation_recorded(None, "CMP-20260830-101530-ab12cd"),
        ] {
            assert!(reply.contains("CMP-20260830-101530-ab12cd"));
        }
    }
}
