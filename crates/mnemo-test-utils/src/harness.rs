// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end conversation testing.
//!
//! `TestHarness` assembles a complete agent stack with mock adapters
//! and a temp SQLite index. Provides `send()` to drive full turns
//! (classify -> dispatch -> reply) through the real session logic.

use std::sync::Arc;

use mnemo_agent::{AgentSession, ConversationHistory};
use mnemo_core::MnemoError;
use mnemo_memory::{
    FactExtractor, IntentClassifier, MemoryManager, MemorySettings, SqliteIndex, collection_name,
};

use crate::mock_confirm::MockConfirm;
use crate::mock_embedder::MockEmbedder;
use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    confirm_answers: Vec<String>,
    vectors: Vec<(String, Vec<f32>)>,
    similarity_threshold: f32,
    retrieval_k: usize,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            confirm_answers: Vec::new(),
            vectors: Vec::new(),
            similarity_threshold: 0.9,
            retrieval_k: 3,
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Queue answers for deletion confirmations.
    pub fn with_confirm_answers(mut self, answers: Vec<String>) -> Self {
        self.confirm_answers = answers;
        self
    }

    /// Pin embedding vectors for specific texts.
    pub fn with_vectors(mut self, vectors: Vec<(String, Vec<f32>)>) -> Self {
        self.vectors = vectors;
        self
    }

    /// Override the duplicate-skip similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Override how many stored facts retrieval feeds into answer synthesis.
    pub fn with_retrieval_k(mut self, k: usize) -> Self {
        self.retrieval_k = k;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, MnemoError> {
        // Temp directory for the SQLite index
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| MnemoError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");
        let index = Arc::new(SqliteIndex::open(&db_path).await?);

        // Mock adapters
        let mock_provider = Arc::new(if self.responses.is_empty() {
            MockProvider::new()
        } else {
            MockProvider::with_responses(self.responses)
        });
        let mock_embedder = Arc::new(if self.vectors.is_empty() {
            MockEmbedder::new()
        } else {
            MockEmbedder::with_vectors(self.vectors)
        });
        let mock_confirm = Arc::new(MockConfirm::with_answers(self.confirm_answers));

        let classifier =
            IntentClassifier::new(mock_provider.clone(), "mock-model".to_string(), 256);
        let extractor = FactExtractor::new(mock_provider.clone(), "mock-model".to_string(), 256);
        let manager = MemoryManager::new(
            mock_provider.clone(),
            mock_embedder.clone(),
            index,
            mock_confirm.clone(),
            MemorySettings {
                model: "mock-model".to_string(),
                max_tokens: 256,
                collection: collection_name("test-user"),
                similarity_threshold: self.similarity_threshold,
                retrieval_k: self.retrieval_k,
            },
        );
        let session = AgentSession::new(classifier, extractor, manager);

        Ok(TestHarness {
            mock_provider,
            mock_embedder,
            mock_confirm,
            session,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and a temp vector index.
///
/// Provides access to the mocks for assertions and a `send()` method
/// that drives one full conversation turn through the real session.
pub struct TestHarness {
    /// The mock LLM provider.
    pub mock_provider: Arc<MockProvider>,
    /// The mock embedding adapter.
    pub mock_embedder: Arc<MockEmbedder>,
    /// The scripted confirmation prompt.
    pub mock_confirm: Arc<MockConfirm>,
    session: AgentSession,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Send a user message through a full agent turn and return the reply.
    pub async fn send(&mut self, text: &str) -> Result<String, MnemoError> {
        self.session.handle_turn(text).await
    }

    /// The conversation history accumulated across `send` calls.
    pub fn history(&self) -> &ConversationHistory {
        self.session.history()
    }

    /// Add a response to the mock provider's queue.
    pub async fn add_provider_response(&self, text: String) {
        self.mock_provider.add_response(text).await;
    }
}
