// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic mock embedding adapter.
//!
//! Vectors are seeded from a hash of the input text, so the same text
//! always embeds identically within a test run, while distinct texts
//! land far apart in the 32-dim space. Exact-similarity tests can pin
//! specific texts to preset vectors.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;

use mnemo_core::{
    AdapterType, EmbeddingAdapter, EmbeddingInput, EmbeddingOutput, HealthStatus, MnemoError,
    PluginAdapter,
};

const MOCK_DIMENSIONS: usize = 32;

/// A mock embedder producing deterministic, L2-normalized vectors.
pub struct MockEmbedder {
    overrides: HashMap<String, Vec<f32>>,
}

impl MockEmbedder {
    /// Create a mock embedder with purely hash-seeded vectors.
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Create a mock embedder with preset vectors for specific texts.
    ///
    /// Texts without a preset fall back to hash-seeded vectors.
    pub fn with_vectors(pairs: Vec<(String, Vec<f32>)>) -> Self {
        Self {
            overrides: pairs.into_iter().collect(),
        }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some(v) = self.overrides.get(text) {
            return v.clone();
        }

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut v: Vec<f32> = (0..MOCK_DIMENSIONS)
            .map(|_| {
                // Plain LCG over the seed; quality does not matter here.
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let bits = (state >> 40) as u32;
                bits as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
            })
            .collect();

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
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
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MnemoError> {
        let embeddings: Vec<Vec<f32>> = input.texts.iter().map(|t| self.vector_for(t)).collect();
        let dimensions = embeddings.first().map(|v| v.len()).unwrap_or(0);
        Ok(EmbeddingOutput {
            embeddings,
            dimensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn embed_one(embedder: &MockEmbedder, text: &str) -> Vec<f32> {
        embedder
            .embed(EmbeddingInput {
                texts: vec![text.to_string()],
            })
            .await
            .unwrap()
            .embeddings
            .remove(0)
    }

    #[tokio::test]
    async fn same_text_embeds_identically() {
        let embedder = MockEmbedder::new();
        let a = embed_one(&embedder, "I love hiking").await;
        let b = embed_one(&embedder, "I love hiking").await;
        assert_eq!(a, b);
        assert_eq!(a.len(), MOCK_DIMENSIONS);
    }

    #[tokio::test]
    async fn different_texts_embed_differently() {
        let embedder = MockEmbedder::new();
        let a = embed_one(&embedder, "I love hiking").await;
        let b = embed_one(&embedder, "I play chess").await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn vectors_are_normalized() {
        let embedder = MockEmbedder::new();
        let v = embed_one(&embedder, "normalize me").await;
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[tokio::test]
    async fn preset_vectors_take_precedence() {
        let embedder = MockEmbedder::with_vectors(vec![(
            "pinned".to_string(),
            vec![1.0, 0.0],
        )]);
        let v = embed_one(&embedder, "pinned").await;
        assert_eq!(v, vec![1.0, 0.0]);

        // Unpinned text still gets a hash-seeded vector.
        let other = embed_one(&embedder, "free").await;
        assert_eq!(other.len(), MOCK_DIMENSIONS);
    }
}
