// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session turn orchestration.
//!
//! Each user turn is classified into a memory intent and dispatched to
//! the memory pipeline; the fixed reply for the outcome joins the
//! history and is returned to the caller.

use mnemo_core::{Intent, MnemoError};
use mnemo_memory::{FactExtractor, IntentClassifier, MemoryManager};
use tracing::debug;

use crate::history::ConversationHistory;

/// Drives one conversation session against the memory pipeline.
pub struct AgentSession {
    history: ConversationHistory,
    classifier: IntentClassifier,
    extractor: FactExtractor,
    manager: MemoryManager,
}

impl AgentSession {
    /// Creates a session with empty history.
    pub fn new(
        classifier: IntentClassifier,
        extractor: FactExtractor,
        manager: MemoryManager,
    ) -> Self {
        Self {
            history: ConversationHistory::new(),
            classifier,
            extractor,
            manager,
        }
    }

    /// Handle one user turn and return the agent's reply.
    ///
    /// The user message joins the history before classification so the
    /// classifier sees it as the latest turn; the reply joins after.
    /// Gateway errors propagate to the caller with the user message
    /// already recorded, so the next turn still sees it.
    pub async fn handle_turn(&mut self, input: &str) -> Result<String, MnemoError> {
        self.history.push_user(input);
        let rendered = self.history.render();

        let intent = self.classifier.classify(input, &rendered).await?;
        debug!(intent = ?intent, "dispatching turn");

        let reply = match intent {
            Some(Intent::AddMemory) => {
                let facts = self.extractor.extract(input).await?;
                self.manager.insert(&facts).await?;
                "Updated the memory accordingly.".to_string()
            }
            Some(Intent::DeleteMemory) => {
                let facts = self.extractor.extract(input).await?;
                if facts.is_empty() {
                    "No deletion detected.".to_string()
                } else {
                    self.manager.delete(&facts).await?;
                    "Task completed as per your request.".to_string()
                }
            }
            Some(Intent::RetrieveMemory) => self.manager.retrieve(input).await?,
            None => "Sorry, I couldn't understand your intent.".to_string(),
        };

        self.history.push_agent(&reply);
        Ok(reply)
    }

    /// Read-only view of the accumulated history.
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }
}
