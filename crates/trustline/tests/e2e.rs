// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end conversation scenarios over the full stack: controller,
//! stores on disk, and mocked backends.

use trustline_agent::session::ConversationState;
use trustline_core::types::{ComplaintCategory, ComplaintStatus, Language, OrderStatus};
use trustline_storage::ComplaintPatch;
use trustline_test_utils::TestHarness;

#[tokio::test]
async fn known_order_id_walks_to_phone_request() {
    let mut h = TestHarness::new().await;

    h.send("ORD-001").await.unwrap();
    assert_eq!(h.session.state, ConversationState::AwaitingOrderId);

    h.send("ORD-001").await.unwrap();
    assert_eq!(h.session.state, ConversationState::AwaitingPhone);
    assert_eq!(h.session.order_id.as_deref(), Some("ORD-001"));
}

#[tokio::test]
async fn matching_phone_completes_verification() {
    let mut h = TestHarness::new().await;
    h.send("track my order").await.unwrap();
    h.send("ORD-001").await.unwrap();
    assert_eq!(h.session.state, ConversationState::AwaitingPhone);

    h.send("0791234567").await.unwrap();
    assert_eq!(h.session.state, ConversationState::Verified);
    let snapshot = h.session.order_snapshot.as_ref().unwrap();
    assert_eq!(snapshot.order_id, "ORD-001");
    assert_eq!(snapshot.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn country_prefixed_phone_verifies_like_local_form() {
    let mut h = TestHarness::new().await;
    h.send("track my order").await.unwrap();
    h.send("ORD-001").await.unwrap();
    h.send("+962791234567").await.unwrap();
    assert_eq!(h.session.state, ConversationState::Verified);
}

#[tokio::test]
async fn damage_report_on_delivered_order_requests_images() {
    let mut h = TestHarness::new().await;
    h.send("وين طلبي؟").await.unwrap();
    h.send("ORD-001").await.unwrap();
    h.send("0791234567").await.unwrap();
    assert_eq!(h.session.state, ConversationState::Verified);

    let reply = h.send("المنتج وصل مكسور").await.unwrap();
    assert_eq!(h.session.state, ConversationState::Verified);
    assert!(h.session.awaiting_images);
    assert!(reply.contains("Attach Images"));
    assert!(h.complaints.load_all().is_empty());
}

#[tokio::test]
async fn confirming_with_attached_images_files_damage_complaint() {
    let mut h = TestHarness::new().await;
    h.send("وين طلبي؟").await.unwrap();
    h.send("ORD-001").await.unwrap();
    h.send("0791234567").await.unwrap();
    h.send("المنتج وصل مكسور").await.unwrap();

    h.session.pending_image_paths.push("/img/a.png".into());
    let reply = h.send("تم").await.unwrap();
    assert!(reply.contains("رقم الشكوى"));

    let complaints = h.complaints.load_all();
    assert_eq!(complaints.len(), 1);
    let c = &complaints[0];
    assert_eq!(c.category, ComplaintCategory::Damage);
    assert_eq!(c.order_id, "ORD-001");
    assert_eq!(c.message, "المنتج وصل مكسور");
    assert_eq!(c.images, vec!["/img/a.png"]);
    assert!(h.session.pending_image_paths.is_empty());
    assert!(!h.session.awaiting_images);
}

#[tokio::test]
async fn damage_report_before_delivery_is_refused() {
    let mut h = TestHarness::new().await;
    h.send("وين طلبي؟").await.unwrap();
    h.send("ORD-002").await.unwrap();
    h.send("0791234567").await.unwrap();
    assert_eq!(h.session.state, ConversationState::Verified);
    assert_eq!(
        h.session.order_snapshot.as_ref().unwrap().status,
        OrderStatus::Preparing
    );

    let reply = h.send("وصل تالف").await.unwrap();
    assert!(reply.contains("بعد تسليم الطلب"));
    assert!(h.complaints.load_all().is_empty());
    assert_eq!(h.session.state, ConversationState::Verified);
}

#[tokio::test]
async fn shared_phone_lists_both_orders_in_store_order() {
    let mut h = TestHarness::new().await;
    h.send("i lost my order number").await.unwrap();
    h.send("i don't know it").await.unwrap();
    assert_eq!(h.session.state, ConversationState::AwaitingPhone);

    let reply = h.send("0791234567").await.unwrap();
    assert_eq!(h.session.state, ConversationState::AwaitingOrderId);
    assert_eq!(h.session.matched_order_ids, vec!["ORD-001", "ORD-002"]);
    let first = reply.find("ORD-001").unwrap();
    let second = reply.find("ORD-002").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn locked_language_survives_mixed_input() {
    let mut h = TestHarness::new().await;
    h.send("وين طلبي؟").await.unwrap();
    assert_eq!(h.session.locked_language, Some(Language::Ar));

    h.send("where is my order??").await.unwrap();
    h.send("ORD-003").await.unwrap();
    assert_eq!(h.session.locked_language, Some(Language::Ar));
}

#[tokio::test]
async fn filed_complaint_has_expected_shape() {
    let mut h = TestHarness::new().await;
    h.verify("ORD-001", "0791234567").await.unwrap();

    h.send("the courier was rude to me").await.unwrap();
    let complaints = h.complaints.load_all();
    assert_eq!(complaints.len(), 1);
    let c = &complaints[0];

    assert!(c.complaint_id.starts_with("CMP-"));
    assert_eq!(c.complaint_id.len(), "CMP-20260830-101530-ab12cd".len());
    assert_eq!(c.status, ComplaintStatus::New);
    assert_eq!(c.updated_at, None);
    assert_eq!(c.category, ComplaintCategory::Service);
    assert_eq!(c.customer_name, "Lina Haddad");
    assert_eq!(c.phone, "0791234567");
    assert!(c.images.is_empty());
    assert!(!c.created_at.is_empty());
}

#[tokio::test]
async fn updating_unknown_complaint_is_a_no_op() {
    let mut h = TestHarness::new().await;
    h.verify("ORD-001", "0791234567").await.unwrap();
    h.send("the courier was rude to me").await.unwrap();

    let before = h.complaints.load_all();
    let updated = h
        .complaints
        .update(
            "CMP-20200101-000000-ffffff",
            ComplaintPatch {
                status: Some(ComplaintStatus::Resolved),
                internal_note: Some("should not land".into()),
            },
        )
        .await
        .unwrap();
    assert!(!updated);
    assert_eq!(h.complaints.load_all(), before);
}

#[tokio::test]
async fn escalation_before_verification_files_nothing() {
    let mut h = TestHarness::new().await;
    let reply = h.send("I want to raise a complaint").await.unwrap();
    assert_eq!(h.session.state, ConversationState::AwaitingOrderId);
    assert!(reply.contains("Order ID"));
    assert!(h.complaints.load_all().is_empty());

    // Identity established afterwards: the held issue is filed on request.
    h.send("ORD-003").await.unwrap();
    h.send("0785550000").await.unwrap();
    assert_eq!(h.session.state, ConversationState::Verified);
    h.send("take it to a supervisor").await.unwrap();

    let complaints = h.complaints.load_all();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0].category, ComplaintCategory::Escalation);
    assert_eq!(complaints[0].order_id, "ORD-003");
}

#[tokio::test]
async fn sessions_are_independent_over_shared_stores() {
    let mut h = TestHarness::new().await;
    h.verify("ORD-001", "0791234567").await.unwrap();
    assert_eq!(h.session.state, ConversationState::Verified);

    h.reset_session();
    assert_eq!(h.session.state, ConversationState::Idle);
    assert!(h.session.locked_language.is_none());

    // Orders seeded for the first session are still visible.
    h.send("ORD-002").await.unwrap();
    h.send("ORD-002").await.unwrap();
    assert_eq!(h.session.state, ConversationState::AwaitingPhone);
}
