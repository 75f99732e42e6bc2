// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared domain types: chat turns, orders, complaints.
//!
//! These types define the JSON document shapes persisted by the stores and
//! the payloads exchanged between the conversation controller and its
//! backends. Status keys are stable wire values; display labels are
//! presentation-only and bilingual.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::TrustlineError;

/// Role of a single chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// The two supported conversation languages. Locked per session from the
/// first language-bearing message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

/// Lifecycle status of an order. The serde keys are the stable internal
/// values stored on disk; do not change them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Received,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Display label for the given language.
    pub fn label(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (OrderStatus::Received, Language::Ar) => "تم استلام الطلب",
            (OrderStatus::Received, Language::En) => "Order received",
            (OrderStatus::Preparing, Language::Ar) => "قيد التحضير",
            (OrderStatus::Preparing, Language::En) => "Preparing order",
            (OrderStatus::OutForDelivery, Language::Ar) => "قيد التوصيل",
            (OrderStatus::OutForDelivery, Language::En) => "Out for delivery",
            (OrderStatus::Delivered, Language::Ar) => "تم التسليم",
            (OrderStatus::Delivered, Language::En) => "Delivered",
            (OrderStatus::Cancelled, Language::Ar) => "ملغي",
            (OrderStatus::Cancelled, Language::En) => "Cancelled",
        }
    }

    /// Parses admin input into a status: accepts the internal key
    /// (`out_for_delivery`) or a display label in either language,
    /// case-insensitively.
    pub fn normalize(input: &str) -> Result<OrderStatus, TrustlineError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(TrustlineError::Validation("status is required".into()));
        }
        let lower = s.to_lowercase();
        for status in OrderStatus::ALL {
            if lower == status.to_string()
                || lower == status.label(Language::En).to_lowercase()
                || s == status.label(Language::Ar)
            {
                return Ok(status);
            }
        }
        Err(TrustlineError::Validation(format!(
            "unknown order status `{s}`"
        )))
    }
}

/// How an order was paid for. Unknown input normalizes to `Cash`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Online,
    Wallet,
}

impl PaymentMethod {
    /// Lenient parse used on admin input: anything unrecognized falls back
    /// to `Cash` rather than erroring.
    pub fn normalize(input: &str) -> PaymentMethod {
        input.trim().to_lowercase().parse().unwrap_or_default()
    }
}

/// An order record as stored in the order store, keyed externally by order id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub customer_name: String,
    pub phone: String,
    pub delivery_address: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: String,
    pub last_updated: String,
}

/// Immutable-at-read copy of the fields the conversation needs from an
/// order, captured at verification time. Decouples the session from
/// subsequent store mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub last_updated: String,
    pub phone: String,
}

impl OrderSnapshot {
    /// Captures a snapshot of `order` under the given id.
    pub fn capture(order_id: &str, order: &Order) -> Self {
        Self {
            order_id: order_id.to_string(),
            customer_name: order.customer_name.clone(),
            status: order.status,
            last_updated: order.last_updated.clone(),
            phone: order.phone.clone(),
        }
    }
}

/// Category assigned to a complaint when it is filed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComplaintCategory {
    Service,
    Damage,
    Escalation,
    Other,
}

/// Workflow status of a complaint record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComplaintStatus {
    New,
    InProgress,
    Resolved,
}

/// A complaint record as stored in the complaint store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub complaint_id: String,
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    pub message: String,
    pub category: ComplaintCategory,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub internal_note: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}
