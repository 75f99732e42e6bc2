// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trustline shell` command implementation.
//!
//! Interactive customer chat REPL with a colored prompt and readline
//! history. One session per invocation; the session lives in memory and
//! ends with the process.
//!
//! Image intake happens here, not in the controller: `/attach <path>`
//! records a pending image path on the session, and the controller only
//! ever sees the bookkeeping.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use trustline_agent::flow::{handle_customer_message, Backends};
use trustline_agent::session::CustomerSession;
use trustline_config::TrustlineConfig;
use trustline_core::types::Language;
use trustline_core::{KnowledgeRetriever, TextGenerator, TrustlineError};
use trustline_knowledge::KnowledgeBase;
use trustline_openai::OpenAiGenerator;
use trustline_storage::{ComplaintStore, OrderStore};

/// Fixed reply when the generator backend is not configured. The
/// controller is not invoked in that case, so no state mutates.
fn service_unavailable(lang: Option<Language>) -> &'static str {
    if lang == Some(Language::En) {
        "Sorry, the assistant is currently unavailable. Please try again later."
    } else {
        "نعتذر، الخدمة غير متاحة حالياً. حاول مرة أخرى لاحقاً."
    }
}

/// Runs the `trustline shell` interactive REPL.
pub async fn run_shell(config: &TrustlineConfig) -> Result<(), TrustlineError> {
    let orders = OrderStore::new(config.storage.orders_path());
    let complaints = ComplaintStore::new(config.storage.complaints_path());
    let knowledge = KnowledgeBase::open(&config.knowledge);

    let generator: Option<OpenAiGenerator> = match OpenAiGenerator::from_config(&config.openai) {
        Ok(generator) => Some(generator),
        Err(e) => {
            eprintln!(
                "{}",
                format!("generator unavailable ({e}); replies will be a fixed apology").yellow()
            );
            None
        }
    };

    let mut session = CustomerSession::new();

    let mut rl = DefaultEditor::new()
        .map_err(|e| TrustlineError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "trustline shell".bold().green());
    println!(
        "Type {} to exit, {} to attach a complaint image.\n",
        "/quit".yellow(),
        "/attach <path>".yellow()
    );

    let prompt = format!("{}> ", "trustline".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if let Some(path) = trimmed.strip_prefix("/attach ") {
                    let path = path.trim();
                    if path.is_empty() {
                        eprintln!("{}", "usage: /attach <path>".yellow());
                        continue;
                    }
                    session.pending_image_paths.push(path.to_string());
                    println!(
                        "{}",
                        format!("attached {path} ({} pending)", session.pending_image_paths.len())
                            .dimmed()
                    );
                    continue;
                }

                let Some(generator) = generator.as_ref() else {
                    println!("{}", service_unavailable(session.locked_language));
                    continue;
                };

                let backends = Backends {
                    orders: &orders,
                    complaints: &complaints,
                    generator: generator as &(dyn TextGenerator + Send + Sync),
                    retriever: &knowledge as &(dyn KnowledgeRetriever + Send + Sync),
                    history_turns: config.agent.history_turns,
                };

                match handle_customer_message(trimmed, &mut session, &backends).await {
                    Ok(reply) => {
                        if !reply.is_empty() {
                            println!("{reply}");
                        }
                    }
                    Err(e) => {
                        eprintln!("{}: {e}", "error".red());
                        println!("{}", service_unavailable(session.locked_language));
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    info!(turns = session.history.len(), state = %session.state, "shell session ended");
    println!("{}", "goodbye".dimmed());
    Ok(())
}
