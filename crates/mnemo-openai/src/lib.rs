// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI adapters for the Mnemo memory agent.
//!
//! This crate implements [`ProviderAdapter`] for the OpenAI chat completions
//! API and [`EmbeddingAdapter`] for the OpenAI embeddings API. Both share
//! the same HTTP client, credentials, and retry behavior.

pub mod client;
pub mod types;

use async_trait::async_trait;
use mnemo_config::MnemoConfig;
use mnemo_core::error::MnemoError;
use mnemo_core::traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter};
use mnemo_core::types::{
    AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus, ProviderRequest,
    ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest, EmbeddingRequest};

/// OpenAI chat provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.provider.api_key` if set
    /// 2. `OPENAI_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &MnemoConfig) -> Result<Self, MnemoError> {
        let api_key = resolve_api_key(&config.provider.api_key)?;
        let client = OpenAiClient::new(
            api_key,
            config.provider.base_url.clone(),
            config.provider.timeout_secs,
        )?;

        info!(model = config.provider.model, "OpenAI provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        // A full check would make a lightweight API call, but we avoid
        // consuming tokens on health checks.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MnemoError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, MnemoError> {
        let api_request = to_chat_request(&request);
        let response = self.client.chat_completion(&api_request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| MnemoError::Provider {
                message: "API response contained no choices".into(),
                source: None,
            })?;

        Ok(ProviderResponse {
            id: response.id,
            content: choice.message.content.unwrap_or_default(),
            model: response.model,
            stop_reason: choice.finish_reason,
            usage: TokenUsage {
                input_tokens: response.usage.prompt_tokens,
                output_tokens: response.usage.completion_tokens,
            },
        })
    }
}

/// OpenAI embedding gateway implementing [`EmbeddingAdapter`].
///
/// OpenAI embedding vectors are unit length, so downstream cosine
/// similarity reduces to a dot product.
pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
}

impl OpenAiEmbedder {
    /// Creates a new OpenAI embedder from the given configuration.
    ///
    /// Uses the same API key resolution as [`OpenAiProvider`].
    pub fn new(config: &MnemoConfig) -> Result<Self, MnemoError> {
        let api_key = resolve_api_key(&config.provider.api_key)?;
        let client = OpenAiClient::new(
            api_key,
            config.provider.base_url.clone(),
            config.provider.timeout_secs,
        )?;

        info!(
            model = config.provider.embedding_model,
            "OpenAI embedder initialized"
        );

        Ok(Self {
            client,
            model: config.provider.embedding_model.clone(),
        })
    }

    /// Creates an embedder with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenAiClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai-embeddings"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MnemoError> {
        debug!("OpenAI embedder shutting down");
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenAiEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MnemoError> {
        if input.texts.is_empty() {
            return Ok(EmbeddingOutput {
                embeddings: Vec::new(),
                dimensions: 0,
            });
        }

        let request = EmbeddingRequest {
            model: self.model.clone(),
            input: input.texts.clone(),
        };
        let response = self.client.embeddings(&request).await?;

        if response.data.len() != input.texts.len() {
            return Err(MnemoError::Embedding {
                message: format!(
                    "expected {} embeddings, got {}",
                    input.texts.len(),
                    response.data.len()
                ),
                source: None,
            });
        }

        // The API may return data out of order; index ties each vector
        // back to its input text.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        let dimensions = data.first().map(|d| d.embedding.len()).unwrap_or(0);
        let embeddings = data.into_iter().map(|d| d.embedding).collect();

        Ok(EmbeddingOutput {
            embeddings,
            dimensions,
        })
    }
}

/// Converts a [`ProviderRequest`] to an OpenAI [`ChatRequest`].
///
/// The system prompt, when present, becomes the first message with role
/// `system`, per the chat completions conversation format.
fn to_chat_request(request: &ProviderRequest) -> ChatRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(ref system) = request.system_prompt {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system.clone(),
        });
    }

    messages.extend(request.messages.iter().map(|m| ChatMessage {
        role: m.role.clone(),
        content: m.content.clone(),
    }));

    ChatRequest {
        model: request.model.clone(),
        messages,
        max_tokens: request.max_tokens,
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, MnemoError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("OPENAI_API_KEY").map_err(|_| {
        MnemoError::Config(
            "OpenAI API key not found. Set provider.api_key in config or OPENAI_API_KEY environment variable.".into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo_core::ProviderMessage;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn resolve_api_key_from_config() {
        let result = resolve_api_key(&Some("sk-test-123".into()));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "sk-test-123");
    }

    #[test]
    fn resolve_api_key_empty_config_falls_back_to_env() {
        let result = resolve_api_key(&Some("".into()));
        // Will fail unless OPENAI_API_KEY is set, which is fine for tests.
        // We just verify it doesn't return the empty string.
        if result.is_ok() {
            assert!(!result.unwrap().is_empty());
        }
    }

    #[test]
    fn resolve_api_key_none_falls_back_to_env() {
        let result = resolve_api_key(&None);
        // Will succeed if env is set, fail otherwise.
        if result.is_err() {
            let err = result.unwrap_err().to_string();
            assert!(err.contains("API key not found"), "got: {err}");
        }
    }

    #[test]
    fn to_chat_request_prepends_system_message() {
        let request = ProviderRequest {
            model: "gpt-4".into(),
            system_prompt: Some("You are helpful.".into()),
            messages: vec![ProviderMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            max_tokens: 256,
        };
        let chat = to_chat_request(&request);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[0].content, "You are helpful.");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.max_tokens, 256);
    }

    #[test]
    fn to_chat_request_without_system() {
        let request = ProviderRequest {
            model: "gpt-4".into(),
            system_prompt: None,
            messages: vec![ProviderMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            max_tokens: 256,
        };
        let chat = to_chat_request(&request);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].role, "user");
    }

    #[tokio::test]
    async fn provider_complete_maps_response() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "chatcmpl-map",
            "object": "chat.completion",
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "add_memory"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 42, "completion_tokens": 3, "total_tokens": 45}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".into(), server.uri(), 30).unwrap();
        let provider = OpenAiProvider::with_client(client);

        let response = provider
            .complete(ProviderRequest {
                model: "gpt-4".into(),
                system_prompt: None,
                messages: vec![ProviderMessage {
                    role: "user".into(),
                    content: "classify this".into(),
                }],
                max_tokens: 64,
            })
            .await
            .unwrap();

        assert_eq!(response.content, "add_memory");
        assert_eq!(response.stop_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.input_tokens, 42);
        assert_eq!(response.usage.output_tokens, 3);
    }

    #[tokio::test]
    async fn embedder_sorts_vectors_by_index() {
        let server = MockServer::start().await;

        // Data deliberately out of order.
        let response_body = serde_json::json!({
            "object": "list",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.0, 1.0]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        });

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".into(), server.uri(), 30).unwrap();
        let embedder = OpenAiEmbedder::with_client(client, "text-embedding-3-small".into());

        let output = embedder
            .embed(EmbeddingInput {
                texts: vec!["first".into(), "second".into()],
            })
            .await
            .unwrap();

        assert_eq!(output.embeddings.len(), 2);
        assert_eq!(output.embeddings[0], vec![1.0, 0.0]);
        assert_eq!(output.embeddings[1], vec![0.0, 1.0]);
        assert_eq!(output.dimensions, 2);
    }

    #[tokio::test]
    async fn embedder_rejects_count_mismatch() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "object": "list",
            "data": [
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        });

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".into(), server.uri(), 30).unwrap();
        let embedder = OpenAiEmbedder::with_client(client, "text-embedding-3-small".into());

        let result = embedder
            .embed(EmbeddingInput {
                texts: vec!["first".into(), "second".into()],
            })
            .await;

        assert!(matches!(result, Err(MnemoError::Embedding { .. })));
    }

    #[tokio::test]
    async fn embedder_empty_input_skips_api_call() {
        // No mock server mounted: an HTTP call would fail the test.
        let client =
            OpenAiClient::new("test-key".into(), "http://127.0.0.1:1".into(), 30).unwrap();
        let embedder = OpenAiEmbedder::with_client(client, "text-embedding-3-small".into());

        let output = embedder.embed(EmbeddingInput { texts: vec![] }).await.unwrap();
        assert!(output.embeddings.is_empty());
        assert_eq!(output.dimensions, 0);
    }
}
