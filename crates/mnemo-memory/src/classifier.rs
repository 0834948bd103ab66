// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-based intent classification for user turns.

use std::sync::Arc;

use mnemo_core::{Intent, MnemoError, ProviderAdapter, ProviderMessage, ProviderRequest};
use tracing::debug;

/// Classifies each user turn into a memory intent.
///
/// One LLM call per classification, no retry. An output matching none
/// of the known labels is an unrecognized turn, not an error.
pub struct IntentClassifier {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    max_tokens: u32,
}

impl IntentClassifier {
    /// Creates a new classifier over the given provider.
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: String, max_tokens: u32) -> Self {
        Self {
            provider,
            model,
            max_tokens,
        }
    }

    /// Classify the latest message against the rendered chat history.
    ///
    /// Returns `None` when the model's label normalizes to none of the
    /// known intents; the caller replies with its fallback message and
    /// the turn continues.
    pub async fn classify(
        &self,
        message: &str,
        chat_history: &str,
    ) -> Result<Option<Intent>, MnemoError> {
        let prompt = build_classify_prompt(message, chat_history);

        let request = ProviderRequest {
            model: self.model.clone(),
            system_prompt: None,
            messages: vec![ProviderMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self.provider.complete(request).await?;
        let label = normalize_label(&response.content);

        match label.parse::<Intent>() {
            Ok(intent) => {
                debug!(intent = %intent, "classified user intent");
                Ok(Some(intent))
            }
            Err(_) => {
                debug!(label = %label, "model returned unrecognized intent label");
                Ok(None)
            }
        }
    }
}

/// Build the classification prompt around the history and message.
fn build_classify_prompt(message: &str, chat_history: &str) -> String {
    format!(
        "Given the following chat history and the latest user message, \
         classify the user's intent as one of: 'add_memory', 'retrieve_memory', \
         or 'delete_memory'. Respond with only the intent string.\n\n\
         Chat history: {chat_history}\n\
         Message: {message}"
    )
}

/// Normalize a raw model label: trim whitespace, strip wrapping quotes,
/// strip one trailing period, lowercase.
fn normalize_label(raw: &str) -> String {
    let stripped = raw.trim().trim_matches(['"', '\'']);
    let stripped = stripped.strip_suffix('.').unwrap_or(stripped);
    stripped.to_lowercase()
}
