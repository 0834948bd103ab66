// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory store manager: deduplicated insertion, confirmed deletion,
//! and top-k retrieval with answer synthesis.

use std::sync::Arc;

use mnemo_core::{
    ConfirmPrompt, EmbeddingAdapter, EmbeddingInput, IndexEntry, MnemoError, ProviderAdapter,
    ProviderMessage, ProviderRequest, VectorIndex,
};
use tracing::debug;

use crate::fact::fact_id;

/// Fixed reply when retrieval finds nothing. No LLM call is made.
pub const NO_MEMORIES_REPLY: &str = "No relevant memories found.";

/// Derive the index collection name for a user.
pub fn collection_name(user_id: &str) -> String {
    format!("memories_{user_id}")
}

/// Tunables for the memory manager, resolved from config at startup.
#[derive(Debug, Clone)]
pub struct MemorySettings {
    /// Model used for answer synthesis.
    pub model: String,
    /// Completion budget for answer synthesis.
    pub max_tokens: u32,
    /// Index collection, `memories_{user_id}`.
    pub collection: String,
    /// Cosine similarity at or above which a new fact is a duplicate.
    pub similarity_threshold: f32,
    /// Number of nearest facts fed into answer synthesis.
    pub retrieval_k: usize,
}

/// Orchestrates fact storage against the vector index.
///
/// All user-visible notices and confirmations go through the
/// [`ConfirmPrompt`] seam; the manager never prints directly.
pub struct MemoryManager {
    provider: Arc<dyn ProviderAdapter>,
    embedder: Arc<dyn EmbeddingAdapter>,
    index: Arc<dyn VectorIndex>,
    confirm: Arc<dyn ConfirmPrompt>,
    settings: MemorySettings,
}

impl MemoryManager {
    /// Creates a new manager over the given gateways.
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        embedder: Arc<dyn EmbeddingAdapter>,
        index: Arc<dyn VectorIndex>,
        confirm: Arc<dyn ConfirmPrompt>,
        settings: MemorySettings,
    ) -> Self {
        Self {
            provider,
            embedder,
            index,
            confirm,
            settings,
        }
    }

    /// Insert facts in order, skipping near-duplicates.
    ///
    /// A fact whose nearest stored neighbor scores at or above the
    /// similarity threshold is skipped with a notice naming both texts.
    /// Stored ids are the content hash of the fact text, so re-inserting
    /// byte-identical text is idempotent at the index level.
    pub async fn insert(&self, facts: &[String]) -> Result<(), MnemoError> {
        if facts.is_empty() {
            self.confirm.notify("No facts found to add.").await?;
            return Ok(());
        }

        for fact in facts {
            let embedding = self.embed_one(fact).await?;
            let hits = self
                .index
                .search(&self.settings.collection, &embedding, 1)
                .await?;

            if let Some(existing) = hits.first()
                && existing.similarity >= self.settings.similarity_threshold
            {
                debug!(
                    similarity = existing.similarity,
                    existing = %existing.text,
                    "skipped near-duplicate fact"
                );
                self.confirm
                    .notify(&format!(
                        "Fact '{fact}' is too similar to existing fact '{}'. Skipping.",
                        existing.text
                    ))
                    .await?;
                continue;
            }

            let entry = IndexEntry {
                id: fact_id(fact),
                text: fact.clone(),
                embedding,
            };
            self.index.add(&self.settings.collection, entry).await?;
        }

        Ok(())
    }

    /// Delete the stored fact nearest each target, confirming per fact.
    ///
    /// Only an explicit "y" (case-insensitive, trimmed) deletes; any
    /// other answer cancels that single deletion and continues.
    pub async fn delete(&self, facts: &[String]) -> Result<(), MnemoError> {
        for fact in facts {
            let embedding = self.embed_one(fact).await?;
            let hits = self
                .index
                .search(&self.settings.collection, &embedding, 1)
                .await?;

            let Some(hit) = hits.into_iter().next() else {
                self.confirm
                    .notify(&format!("No matching fact found for deletion: {fact}"))
                    .await?;
                continue;
            };

            // Stored id is the content hash written at insert; re-hash the
            // stored text if an index implementation returns no id.
            let id = if hit.id.is_empty() {
                fact_id(&hit.text)
            } else {
                hit.id
            };

            let answer = self
                .confirm
                .ask(&format!(
                    "I am Deleting fact: '{}'. Shall I go ahead? (Y/N)",
                    hit.text
                ))
                .await?;

            if answer.trim().eq_ignore_ascii_case("y") {
                self.index.delete(&self.settings.collection, &id).await?;
                self.confirm.notify("Memory Deleted.").await?;
            } else {
                self.confirm.notify("Deletion Cancelled.").await?;
            }
        }

        Ok(())
    }

    /// Retrieve the k nearest facts and synthesize an answer.
    ///
    /// An empty collection short-circuits to [`NO_MEMORIES_REPLY`]
    /// without calling the model.
    pub async fn retrieve(&self, query: &str) -> Result<String, MnemoError> {
        let embedding = self.embed_one(query).await?;
        let hits = self
            .index
            .search(&self.settings.collection, &embedding, self.settings.retrieval_k)
            .await?;

        if hits.is_empty() {
            return Ok(NO_MEMORIES_REPLY.to_string());
        }

        let facts_text = hits
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let prompt = build_answer_prompt(&facts_text, query);

        let request = ProviderRequest {
            model: self.settings.model.clone(),
            system_prompt: None,
            messages: vec![ProviderMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: self.settings.max_tokens,
        };

        let response = self.provider.complete(request).await?;
        Ok(response.content.trim().to_string())
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, MnemoError> {
        let output = self
            .embedder
            .embed(EmbeddingInput {
                texts: vec![text.to_string()],
            })
            .await?;
        output
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| MnemoError::Embedding {
                message: "embedding returned no results".to_string(),
                source: None,
            })
    }
}

/// Build the answer-synthesis prompt around retrieved facts.
fn build_answer_prompt(facts_text: &str, query: &str) -> String {
    format!(
        "Given the following facts from the user's memory:\n\
         {facts_text}\n\n\
         And the user's question: \"{query}\"\n\
         Generate a concise, natural language answer to the question using the facts."
    )
}
