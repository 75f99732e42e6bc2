// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trustline complaints` admin commands.

use clap::Subcommand;
use colored::Colorize;
use std::str::FromStr;

use trustline_config::TrustlineConfig;
use trustline_core::types::ComplaintStatus;
use trustline_core::TrustlineError;
use trustline_storage::{ComplaintPatch, ComplaintStore};

#[derive(Subcommand, Debug)]
pub enum ComplaintsCommand {
    /// List all complaints, newest last.
    List,
    /// Show one complaint as JSON.
    Show { complaint_id: String },
    /// Update status and/or internal note.
    Update {
        complaint_id: String,
        /// new, in_progress, or resolved.
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
}

pub async fn run(
    config: &TrustlineConfig,
    command: ComplaintsCommand,
) -> Result<(), TrustlineError> {
    let store = ComplaintStore::new(config.storage.complaints_path());

    match command {
        ComplaintsCommand::List => {
            let complaints = store.load_all();
            if complaints.is_empty() {
                println!("no complaints");
                return Ok(());
            }
            for c in &complaints {
                println!(
                    "{} | {} | {} | {} | {}",
                    c.complaint_id.bold(),
                    c.status,
                    c.category,
                    c.order_id,
                    c.created_at.dimmed()
                );
            }
            Ok(())
        }
        ComplaintsCommand::Show { complaint_id } => match store.get(&complaint_id) {
            Some(complaint) => {
                let rendered = serde_json::to_string_pretty(&complaint)
                    .map_err(|e| TrustlineError::Internal(format!("render complaint: {e}")))?;
                println!("{rendered}");
                Ok(())
            }
            None => Err(TrustlineError::Validation(format!(
                "complaint {complaint_id} not found"
            ))),
        },
        ComplaintsCommand::Update {
            complaint_id,
            status,
            note,
        } => {
            let status = status
                .as_deref()
                .map(|s| {
                    ComplaintStatus::from_str(s.trim()).map_err(|_| {
                        TrustlineError::Validation(format!("unknown complaint status: {s}"))
                    })
                })
                .transpose()?;

            let updated = store
                .update(
                    &complaint_id,
                    ComplaintPatch {
                        status,
                        internal_note: note,
                    },
                )
                .await?;
            if updated {
                println!("updated {}", complaint_id.bold());
                Ok(())
            } else {
                Err(TrustlineError::Validation(format!(
                    "complaint {complaint_id} not found"
                )))
            }
        }
    }
}
