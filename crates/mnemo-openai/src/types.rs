// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat completion and embedding API request/response types.

use serde::{Deserialize, Serialize};

// --- Chat completion types ---

/// A request to the OpenAI chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "gpt-4").
    pub model: String,

    /// Conversation messages, system message first if any.
    pub messages: Vec<ChatMessage>,

    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A single message in the OpenAI conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,

    /// Plain text content.
    pub content: String,
}

/// A full response from the OpenAI chat completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response ID.
    pub id: String,

    /// Model that generated the response.
    pub model: String,

    /// Completion choices; the first one carries the answer.
    pub choices: Vec<ChatChoice>,

    /// Token usage statistics.
    #[serde(default)]
    pub usage: ApiUsage,
}

/// A single completion choice in a chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatChoiceMessage,

    /// Reason the generation stopped (e.g., "stop", "length").
    pub finish_reason: Option<String>,
}

/// The message payload of a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    /// Role (always "assistant").
    pub role: String,

    /// Generated text. `None` for refusals or tool-call-only turns.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics from the API.
///
/// Chat responses report `prompt_tokens` and `completion_tokens`;
/// embedding responses report only `prompt_tokens` and `total_tokens`,
/// so every field defaults to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

// --- Embedding types ---

/// A request to the OpenAI embeddings API.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    /// Embedding model identifier (e.g., "text-embedding-3-small").
    pub model: String,

    /// Texts to embed, one vector returned per text.
    pub input: Vec<String>,
}

/// A full response from the OpenAI embeddings API.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    /// One datum per input text, possibly out of order.
    pub data: Vec<EmbeddingDatum>,

    /// Model that produced the embeddings.
    pub model: String,

    /// Token usage statistics.
    #[serde(default)]
    pub usage: ApiUsage,
}

/// A single embedding vector with its input position.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingDatum {
    /// Position of the corresponding input text.
    pub index: usize,

    /// The embedding vector. OpenAI vectors are unit length.
    pub embedding: Vec<f32>,
}

// --- Error types ---

/// API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Error type identifier (e.g., "invalid_request_error").
    #[serde(rename = "type")]
    pub type_: String,
    /// Human-readable error message.
    pub message: String,
}
