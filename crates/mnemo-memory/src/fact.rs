// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fact identity, embedding BLOB codecs, and similarity scoring.

use sha2::{Digest, Sha256};

/// Derive the index identity for a fact text.
///
/// SHA-256 hex digest of the raw text, so byte-identical facts collide
/// to the same id across process restarts.
pub fn fact_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Convert f32 vector to bytes for SQLite BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert SQLite BLOB back to f32 vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// Compute cosine similarity between two vectors.
///
/// For L2-normalized vectors (as returned by the embeddings API),
/// this is equivalent to the dot product.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "vectors must have same length");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_id_is_stable_sha256_hex() {
        assert_eq!(
            fact_id("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        // Deterministic across calls.
        assert_eq!(fact_id("hello"), fact_id("hello"));
    }

    #[test]
    fn fact_id_differs_for_different_text() {
        assert_ne!(fact_id("I love hiking"), fact_id("I love biking"));
    }

    #[test]
    fn vec_to_blob_roundtrip() {
        let original = vec![0.1_f32, 0.2, 0.3, -0.5, 1.0];
        let blob = vec_to_blob(&original);
        let recovered = blob_to_vec(&blob);
        assert_eq!(original.len(), recovered.len());
        for (a, b) in original.iter().zip(recovered.iter()) {
            assert!((a - b).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn vec_to_blob_1536_dim() {
        let vec1536: Vec<f32> = (0..1536).map(|i| i as f32 / 1536.0).collect();
        let blob = vec_to_blob(&vec1536);
        assert_eq!(blob.len(), 1536 * 4);
        let recovered = blob_to_vec(&blob);
        assert_eq!(recovered.len(), 1536);
    }

    #[test]
    fn cosine_similarity_identical_normalized() {
        let v: Vec<f32> = vec![0.5773, 0.5773, 0.5773]; // ~1/sqrt(3) each
        let sim = cosine_similarity(&v, &v);
        assert!(
            (sim - 1.0).abs() < 0.01,
            "identical normalized vectors should have sim ~1.0, got {sim}"
        );
    }

    #[test]
    fn cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(
            sim.abs() < f32::EPSILON,
            "orthogonal vectors should have sim ~0.0, got {sim}"
        );
    }

    #[test]
    fn cosine_similarity_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(
            (sim - (-1.0)).abs() < f32::EPSILON,
            "opposite vectors should have sim ~-1.0, got {sim}"
        );
    }
}
