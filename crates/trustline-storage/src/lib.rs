// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON file persistence for the order and complaint stores.
//!
//! Both stores are whole-document read-modify-write over a single JSON file,
//! with writes serialized by a per-store mutex and persisted via atomic
//! replace (temp file + fsync + rename). Reads never fail: a missing or
//! corrupt document degrades to an empty collection so the conversation
//! stays usable when persistence is broken.

pub mod atomic;
pub mod complaints;
pub mod orders;

pub use complaints::{ComplaintPatch, ComplaintStore, NewComplaint};
pub use orders::{NewOrder, OrderPatch, OrderStore};

/// Local timestamp in the second-resolution ISO form shared by both stores.
pub(crate) fn now_iso() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}
