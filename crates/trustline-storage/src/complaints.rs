// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Complaint recorder: an append-only JSON list with in-place status
//! updates.
//!
//! Complaint ids are `CMP-<YYYYMMDD-HHMMSS>-<6 hex>`; the random suffix
//! avoids collisions for complaints filed within the same second.

use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::{error, warn};

use trustline_core::types::{Complaint, ComplaintCategory, ComplaintStatus};
use trustline_core::TrustlineError;

use crate::atomic::write_json_atomic;
use crate::now_iso;

/// Input for [`ComplaintStore::create`].
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    pub message: String,
    pub images: Vec<String>,
    pub category: ComplaintCategory,
}

/// Partial update for [`ComplaintStore::update`]. `None` fields are
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct ComplaintPatch {
    pub status: Option<ComplaintStatus>,
    pub internal_note: Option<String>,
}

/// File-backed complaint recorder.
pub struct ComplaintStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ComplaintStore {
    /// Creates a store over the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Loads every complaint. Missing or corrupt documents degrade to an
    /// empty list; a legacy map-shaped document is flattened to its values.
    pub fn load_all(&self) -> Vec<Complaint> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "complaint store unreadable");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(serde_json::Value::Array(rows)) => rows
                .into_iter()
                .filter_map(|row| serde_json::from_value(row).ok())
                .collect(),
            Ok(serde_json::Value::Object(map)) => {
                warn!(path = %self.path.display(), "complaint store has legacy map shape");
                map.into_values()
                    .filter_map(|row| serde_json::from_value(row).ok())
                    .collect()
            }
            Ok(_) | Err(_) => {
                error!(path = %self.path.display(), "complaint store corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Atomically replaces the full complaint list on disk.
    pub fn save_all(&self, complaints: &[Complaint]) -> Result<(), TrustlineError> {
        write_json_atomic(&self.path, &complaints)
    }

    /// Lookup by complaint id.
    pub fn get(&self, complaint_id: &str) -> Option<Complaint> {
        self.load_all()
            .into_iter()
            .find(|c| c.complaint_id == complaint_id)
    }

    /// Records a new complaint and returns the stored record.
    pub async fn create(&self, new: NewComplaint) -> Result<Complaint, TrustlineError> {
        let _guard = self.write_lock.lock().await;

        let complaint = Complaint {
            complaint_id: generate_complaint_id(),
            order_id: new.order_id,
            customer_name: new.customer_name,
            phone: new.phone,
            message: new.message,
            category: new.category,
            status: ComplaintStatus::New,
            images: new.images,
            internal_note: String::new(),
            created_at: now_iso(),
            updated_at: None,
        };

        let mut rows = self.load_all();
        rows.push(complaint.clone());
        self.save_all(&rows)?;
        Ok(complaint)
    }

    /// Merges `patch` into the matching record, sets `updated_at`, and
    /// re-persists. Returns `Ok(false)` (store untouched) when the id is
    /// unknown.
    pub async fn update(
        &self,
        complaint_id: &str,
        patch: ComplaintPatch,
    ) -> Result<bool, TrustlineError> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.load_all();
        let Some(row) = rows.iter_mut().find(|c| c.complaint_id == complaint_id) else {
            return Ok(false);
        };

        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(note) = patch.internal_note {
            row.internal_note = note;
        }
        row.updated_at = Some(now_iso());

        self.save_all(&rows)?;
        Ok(true)
    }
}

/// `CMP-<YYYYMMDD-HHMMSS>-<6 hex chars>`.
fn generate_complaint_id() -> String {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("CMP-{stamp}-{}", &suffix[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ComplaintStore {
        ComplaintStore::new(dir.path().join("complaints.json"))
    }

    fn new_complaint(category: ComplaintCategory) -> NewComplaint {
        NewComplaint {
            order_id: "ORD-001".into(),
            customer_name: "Lina".into(),
            phone: "0791234567".into(),
            message: "وصل الجهاز مكسور".into(),
            images: vec!["/img/a.png".into()],
            category,
        }
    }

    #[tokio::test]
    async fn create_sets_id_status_and_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let rec = store.create(new_complaint(ComplaintCategory::Damage)).await.unwrap();

        assert!(rec.complaint_id.starts_with("CMP-"));
        // CMP-YYYYMMDD-HHMMSS-xxxxxx
        let parts: Vec<&str> = rec.complaint_id.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 6);
        assert_eq!(parts[3].len(), 6);
        assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(rec.status, ComplaintStatus::New);
        assert_eq!(rec.updated_at, None);
        assert_eq!(rec.images, vec!["/img/a.png"]);

        let stored = store.get(&rec.complaint_id).unwrap();
        assert_eq!(stored, rec);
    }

    #[tokio::test]
    async fn creates_are_appended_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let a = store.create(new_complaint(ComplaintCategory::Service)).await.unwrap();
        let b = store.create(new_complaint(ComplaintCategory::Escalation)).await.unwrap();

        let rows = store.load_all();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].complaint_id, a.complaint_id);
        assert_eq!(rows[1].complaint_id, b.complaint_id);
    }

    #[tokio::test]
    async fn update_unknown_id_returns_false_and_leaves_bytes_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_complaint(ComplaintCategory::Other)).await.unwrap();

        let before = std::fs::read(dir.path().join("complaints.json")).unwrap();
        let updated = store
            .update("CMP-00000000-000000-ffffff", ComplaintPatch::default())
            .await
            .unwrap();
        assert!(!updated);
        let after = std::fs::read(dir.path().join("complaints.json")).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn update_merges_fields_and_sets_updated_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let rec = store.create(new_complaint(ComplaintCategory::Damage)).await.unwrap();

        let updated = store
            .update(
                &rec.complaint_id,
                ComplaintPatch {
                    status: Some(ComplaintStatus::InProgress),
                    internal_note: Some("called customer".into()),
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let stored = store.get(&rec.complaint_id).unwrap();
        assert_eq!(stored.status, ComplaintStatus::InProgress);
        assert_eq!(stored.internal_note, "called customer");
        assert!(stored.updated_at.is_some());
        // Untouched fields survive the merge.
        assert_eq!(stored.message, rec.message);
    }

    #[tokio::test]
    async fn corrupt_and_legacy_documents_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("complaints.json");

        std::fs::write(&path, b"][").unwrap();
        assert!(store_in(&dir).load_all().is_empty());

        // Legacy map-of-records shape.
        let rec = serde_json::json!({
            "complaint_id": "CMP-20260101-090000-abc123",
            "order_id": "ORD-001",
            "customer_name": "Lina",
            "phone": "0791234567",
            "message": "late delivery",
            "category": "service",
            "status": "new",
            "images": [],
            "internal_note": "",
            "created_at": "2026-01-01T09:00:00",
            "updated_at": null
        });
        std::fs::write(&path, serde_json::json!({"first": rec}).to_string()).unwrap();
        let rows = store_in(&dir).load_all();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].complaint_id, "CMP-20260101-090000-abc123");
    }
}
