// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order directory: a JSON map of order id to order record.
//!
//! The backing document is an insertion-ordered map (`IndexMap`) so that
//! phone lookups and disambiguation listings are deterministic across runs.
//! Lookup paths degrade to empty results on any read failure; only the
//! admin-facing mutations return errors.

use std::path::PathBuf;

use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::warn;

use trustline_core::phone::normalize_phone;
use trustline_core::types::{Order, OrderStatus, PaymentMethod};
use trustline_core::TrustlineError;

use crate::atomic::write_json_atomic;
use crate::now_iso;

/// Input for [`OrderStore::create`].
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    pub delivery_address: String,
    pub items: Vec<String>,
    pub payment_method: PaymentMethod,
}

/// Partial update for [`OrderStore::update`]. `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Option<Vec<String>>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<OrderStatus>,
}

/// File-backed order directory.
pub struct OrderStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl OrderStore {
    /// Creates a store over the given document path. The file is not
    /// touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the full order map. Missing or corrupt documents degrade to an
    /// empty map; the failure is logged for operators, never raised.
    pub fn load_all(&self) -> IndexMap<String, Order> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return IndexMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "order store unreadable, treating as empty");
                return IndexMap::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "order store corrupt, treating as empty");
                IndexMap::new()
            }
        }
    }

    /// Atomically replaces the full order map on disk.
    pub fn save_all(&self, orders: &IndexMap<String, Order>) -> Result<(), TrustlineError> {
        write_json_atomic(&self.path, orders)
    }

    /// Exact lookup by order id.
    pub fn find_by_id(&self, order_id: &str) -> Option<Order> {
        self.load_all().shift_remove(order_id.trim())
    }

    /// All order ids whose stored phone normalizes to the same value as the
    /// input, in document (insertion) order.
    pub fn find_by_phone(&self, phone: &str) -> Vec<String> {
        let wanted = normalize_phone(phone);
        if wanted.is_empty() {
            return Vec::new();
        }
        self.load_all()
            .iter()
            .filter(|(_, order)| normalize_phone(&order.phone) == wanted)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Creates a new order record. Rejects blank and duplicate ids.
    pub async fn create(&self, new: NewOrder) -> Result<(), TrustlineError> {
        let _guard = self.write_lock.lock().await;

        let order_id = new.order_id.trim().to_string();
        if order_id.is_empty() {
            return Err(TrustlineError::Validation("order id is required".into()));
        }

        let mut orders = self.load_all();
        if orders.contains_key(&order_id) {
            return Err(TrustlineError::Validation(format!(
                "order {order_id} already exists"
            )));
        }

        let now = now_iso();
        orders.insert(
            order_id,
            Order {
                customer_name: new.customer_name.trim().to_string(),
                phone: normalize_phone(new.phone.trim()),
                delivery_address: new.delivery_address.trim().to_string(),
                items: new.items,
                payment_method: new.payment_method,
                status: OrderStatus::Received,
                created_at: now.clone(),
                last_updated: now,
            },
        );
        self.save_all(&orders)
    }

    /// Applies a partial update to an existing order and bumps
    /// `last_updated`.
    pub async fn update(&self, order_id: &str, patch: OrderPatch) -> Result<(), TrustlineError> {
        let _guard = self.write_lock.lock().await;

        let mut orders = self.load_all();
        let order = orders
            .get_mut(order_id.trim())
            .ok_or_else(|| TrustlineError::Validation("order not found".into()))?;

        if let Some(name) = patch.customer_name {
            order.customer_name = name.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            order.phone = normalize_phone(phone.trim());
        }
        if let Some(address) = patch.delivery_address {
            order.delivery_address = address.trim().to_string();
        }
        if let Some(items) = patch.items {
            order.items = items;
        }
        if let Some(pm) = patch.payment_method {
            order.payment_method = pm;
        }
        if let Some(status) = patch.status {
            order.status = status;
        }
        order.last_updated = now_iso();

        self.save_all(&orders)
    }

    /// Moves an order to a new lifecycle status.
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), TrustlineError> {
        self.update(
            order_id,
            OrderPatch {
                status: Some(status),
                ..OrderPatch::default()
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> OrderStore {
        OrderStore::new(dir.path().join("orders.json"))
    }

    fn new_order(id: &str, phone: &str) -> NewOrder {
        NewOrder {
            order_id: id.into(),
            customer_name: "Lina".into(),
            phone: phone.into(),
            delivery_address: "Amman".into(),
            items: vec!["kettle".into()],
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn create_and_find_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.create(new_order("ORD-001", "0791234567")).await.unwrap();

        let order = store.find_by_id("ORD-001").unwrap();
        assert_eq!(order.customer_name, "Lina");
        assert_eq!(order.status, OrderStatus::Received);
        assert!(store.find_by_id("ORD-999").is_none());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_and_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_order("ORD-001", "0791234567")).await.unwrap();

        let before = std::fs::read(dir.path().join("orders.json")).unwrap();
        let err = store.create(new_order("ORD-001", "0780000000")).await;
        assert!(matches!(err, Err(TrustlineError::Validation(_))));
        let after = std::fs::read(dir.path().join("orders.json")).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn find_by_phone_normalizes_both_sides() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_order("ORD-001", "+962791234567")).await.unwrap();
        store.create(new_order("ORD-002", "0791234567")).await.unwrap();
        store.create(new_order("ORD-003", "0788888888")).await.unwrap();

        let matches = store.find_by_phone("0791234567");
        assert_eq!(matches, vec!["ORD-001", "ORD-002"]);
        // Country-code form resolves to the same set.
        assert_eq!(store.find_by_phone("962791234567"), matches);
        assert!(store.find_by_phone("").is_empty());
    }

    #[tokio::test]
    async fn corrupt_document_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("orders.json"), b"{not json").unwrap();
        let store = store_in(&dir);
        assert!(store.load_all().is_empty());
        assert!(store.find_by_phone("0791234567").is_empty());
    }

    #[tokio::test]
    async fn update_status_bumps_last_updated() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_order("ORD-001", "0791234567")).await.unwrap();

        store
            .update_status("ORD-001", OrderStatus::Delivered)
            .await
            .unwrap();
        let order = store.find_by_id("ORD-001").unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);

        let err = store.update_status("ORD-404", OrderStatus::Delivered).await;
        assert!(matches!(err, Err(TrustlineError::Validation(_))));
    }

    #[tokio::test]
    async fn update_normalizes_patched_phone() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_order("ORD-001", "0791234567")).await.unwrap();

        store
            .update(
                "ORD-001",
                OrderPatch {
                    phone: Some("+962 78 000 1111".into()),
                    ..OrderPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.find_by_id("ORD-001").unwrap().phone, "0780001111");
    }
}
