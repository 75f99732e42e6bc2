// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted text-generation backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use trustline_core::types::ChatMessage;
use trustline_core::{TextGenerator, TrustlineError};

/// Mock generator that returns queued replies in FIFO order and records
/// every message batch it received.
///
/// When the queue is empty it falls back to a fixed reply, so tests that
/// only care about FSM transitions need no scripting at all.
#[derive(Default)]
pub struct MockGenerator {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for the next unanswered call.
    pub fn enqueue(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    /// Number of generate calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The message batch of the most recent call.
    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// The system prompt of the most recent call.
    pub fn last_system_prompt(&self) -> Option<String> {
        self.last_messages()
            .and_then(|m| m.first().map(|msg| msg.content.clone()))
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, TrustlineError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "OK".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustline_core::types::ChatRole;

    #[tokio::test]
    async fn replies_are_fifo_with_fixed_fallback() {
        let generator = MockGenerator::new();
        generator.enqueue("first");
        generator.enqueue("second");

        let messages = [ChatMessage::new(ChatRole::User, "hi")];
        assert_eq!(generator.generate(&messages).await.unwrap(), "first");
        assert_eq!(generator.generate(&messages).await.unwrap(), "second");
        assert_eq!(generator.generate(&messages).await.unwrap(), "OK");
        assert_eq!(generator.call_count(), 3);
    }
}
