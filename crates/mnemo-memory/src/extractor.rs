// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-based fact extraction from user messages.

use std::sync::Arc;

use mnemo_core::{MnemoError, ProviderAdapter, ProviderMessage, ProviderRequest};
use tracing::{debug, warn};

/// Prompt template for fact extraction.
const EXTRACT_PROMPT: &str = "You are an assistant that extracts clear, distinct facts from \
user messages for long-term memory storage. A fact should be a simple, atomic statement \
about the user's preferences, actions, events, relationships, or anything else. Return ONLY \
a valid JSON list of strings, with each string being a single fact. If there are no facts, \
return an empty list ([]).\n\
Message: {message}";

/// Extracts atomic fact statements from a user message.
pub struct FactExtractor {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    max_tokens: u32,
}

impl FactExtractor {
    /// Creates a new extractor over the given provider.
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: String, max_tokens: u32) -> Self {
        Self {
            provider,
            model,
            max_tokens,
        }
    }

    /// Extract facts from a message.
    ///
    /// Bad model output fails closed to an empty list with a logged
    /// warning; only gateway failures surface as errors.
    pub async fn extract(&self, message: &str) -> Result<Vec<String>, MnemoError> {
        let prompt = EXTRACT_PROMPT.replace("{message}", message);

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
        Ok(parse_fact_list(&response.content))
    }
}

/// Parse the model output into a list of fact strings.
///
/// Handles markdown code fences and surrounding prose by locating the
/// outermost JSON array span. Returns an empty Vec on parse failure.
pub fn parse_fact_list(response: &str) -> Vec<String> {
    let trimmed = response.trim();

    let json_str = match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    };

    match serde_json::from_str::<Vec<String>>(json_str) {
        Ok(facts) => facts,
        Err(e) => {
            warn!("failed to parse fact extraction response: {e}");
            debug!("raw response: {response}");
            Vec::new()
        }
    }
}
