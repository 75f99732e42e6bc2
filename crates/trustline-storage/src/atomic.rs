// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crash-safe JSON document replacement.
//!
//! A document is never rewritten in place: the new content goes to a
//! temporary file in the destination directory, is fsynced, and is then
//! renamed over the destination. A crash mid-write leaves the previous
//! document intact.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use trustline_core::TrustlineError;

/// Serializes `value` as pretty JSON and atomically replaces `path` with it.
///
/// Parent directories are created as needed. The temp file must live in the
/// same directory as the destination so the final rename stays on one
/// filesystem.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), TrustlineError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(storage_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(storage_err)?;
    let json = serde_json::to_string_pretty(value).map_err(storage_err)?;
    tmp.write_all(json.as_bytes()).map_err(storage_err)?;
    tmp.as_file().sync_all().map_err(storage_err)?;
    tmp.persist(path).map_err(storage_err)?;
    Ok(())
}

fn storage_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> TrustlineError {
    TrustlineError::Storage {
        source: Box::new(e),
    }
}
