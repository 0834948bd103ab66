// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Mnemo workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The kind of adapter a plugin provides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdapterType {
    /// LLM completion gateway.
    Provider,
    /// Vector embedding gateway.
    Embedding,
    /// Vector index backend.
    Index,
}

/// Result of an adapter health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter works but with reduced capability.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// A user intent recognized by the classifier.
///
/// The wire form is the snake_case label the classification prompt asks
/// the model to emit, e.g. `add_memory`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Store new facts from the message.
    AddMemory,
    /// Answer a question from stored facts.
    RetrieveMemory,
    /// Remove stored facts matching the message.
    DeleteMemory,
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// Role of the speaker: `user`, `assistant`, or `system`.
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// A completion request sent to an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Model identifier, e.g. `gpt-4`.
    pub model: String,
    /// Optional system prompt prepended to the conversation.
    pub system_prompt: Option<String>,
    /// Conversation messages in order.
    pub messages: Vec<ProviderMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A completion response from an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Provider-assigned response ID.
    pub id: String,
    /// Generated text.
    pub content: String,
    /// Model that produced the response.
    pub model: String,
    /// Why generation stopped, if reported.
    pub stop_reason: Option<String>,
    /// Token accounting for the call.
    pub usage: TokenUsage,
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A batch of texts to embed.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
}

/// Embeddings returned by an embedding gateway.
///
/// `embeddings[i]` corresponds to `texts[i]` of the input. All vectors
/// have `dimensions` components and are unit-normalized by the gateway.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    pub embeddings: Vec<Vec<f32>>,
    pub dimensions: usize,
}

/// A fact stored in a vector index collection.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Stable identity of the fact (hex digest of its text).
    pub id: String,
    /// The fact text.
    pub text: String,
    /// Embedding of the text.
    pub embedding: Vec<f32>,
}

/// A search result from a vector index, ranked by similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Identity of the matched entry.
    pub id: String,
    /// Text of the matched entry.
    pub text: String,
    /// Cosine similarity to the query vector.
    pub similarity: f32,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn intent_labels_round_trip() {
        for intent in [Intent::AddMemory, Intent::RetrieveMemory, Intent::DeleteMemory] {
            let label = intent.to_string();
            assert_eq!(Intent::from_str(&label).unwrap(), intent);
        }
    }

    #[test]
    fn intent_wire_labels() {
        assert_eq!(Intent::AddMemory.to_string(), "add_memory");
        assert_eq!(Intent::RetrieveMemory.to_string(), "retrieve_memory");
        assert_eq!(Intent::DeleteMemory.to_string(), "delete_memory");
    }

    #[test]
    fn unknown_intent_label_fails() {
        assert!(Intent::from_str("summarize_memory").is_err());
        assert!(Intent::from_str("").is_err());
    }

    #[test]
    fn adapter_type_round_trip() {
        for at in [AdapterType::Provider, AdapterType::Embedding, AdapterType::Index] {
            let s = at.to_string();
            assert_eq!(AdapterType::from_str(&s).unwrap(), at);
        }
    }
}
