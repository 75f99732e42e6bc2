// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end conversation harness.
//!
//! Backs the stores with a temp directory, seeds a small order book, and
//! drives a single [`CustomerSession`] through the controller.

use tempfile::TempDir;

use trustline_agent::flow::{handle_customer_message, Backends};
use trustline_agent::session::CustomerSession;
use trustline_core::types::{OrderStatus, PaymentMethod};
use trustline_core::TrustlineError;
use trustline_storage::{ComplaintStore, NewOrder, OrderStore};

use crate::mock_generator::MockGenerator;
use crate::mock_retriever::MockRetriever;

/// Seeded orders: (id, customer, phone, status).
///
/// ORD-001 and ORD-002 share a phone number so disambiguation paths are
/// reachable; ORD-001 is delivered so damage complaints are reachable.
const SEED_ORDERS: [(&str, &str, &str, OrderStatus); 3] = [
    ("ORD-001", "Lina Haddad", "0791234567", OrderStatus::Delivered),
    ("ORD-002", "Lina Haddad", "0791234567", OrderStatus::Preparing),
    ("ORD-003", "Omar Nassar", "0785550000", OrderStatus::Received),
];

/// A fully wired conversation environment over temp-dir stores.
pub struct TestHarness {
    _dir: TempDir,
    pub orders: OrderStore,
    pub complaints: ComplaintStore,
    pub generator: MockGenerator,
    pub retriever: MockRetriever,
    pub session: CustomerSession,
    pub history_turns: usize,
}

impl TestHarness {
    /// Builds a harness with the standard seeded order book.
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let orders = OrderStore::new(dir.path().join("orders.json"));
        let complaints = ComplaintStore::new(dir.path().join("complaints.json"));

        for (id, name, phone, status) in SEED_ORDERS {
            orders
                .create(NewOrder {
                    order_id: id.into(),
                    customer_name: name.into(),
                    phone: phone.into(),
                    delivery_address: "Amman".into(),
                    items: vec!["item".into()],
                    payment_method: PaymentMethod::Cash,
                })
                .await
                .expect("seed order");
            if status != OrderStatus::Received {
                orders.update_status(id, status).await.expect("seed status");
            }
        }

        Self {
            _dir: dir,
            orders,
            complaints,
            generator: MockGenerator::new(),
            retriever: MockRetriever::empty(),
            session: CustomerSession::new(),
            history_turns: 10,
        }
    }

    /// Sends one customer message through the controller.
    pub async fn send(&mut self, text: &str) -> Result<String, TrustlineError> {
        let backends = Backends {
            orders: &self.orders,
            complaints: &self.complaints,
            generator: &self.generator,
            retriever: &self.retriever,
            history_turns: self.history_turns,
        };
        handle_customer_message(text, &mut self.session, &backends).await
    }

    /// Drives the session to VERIFIED for the given order and phone.
    pub async fn verify(&mut self, order_id: &str, phone: &str) -> Result<(), TrustlineError> {
        self.send("track my order please").await?;
        self.send(order_id).await?;
        self.send(phone).await?;
        Ok(())
    }

    /// Starts a fresh session against the same stores.
    pub fn reset_session(&mut self) {
        self.session = CustomerSession::new();
    }
}
