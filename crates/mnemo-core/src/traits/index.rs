// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector index trait for nearest-neighbor search over stored facts.

use async_trait::async_trait;

use crate::error::MnemoError;
use crate::types::{IndexEntry, SearchHit};

/// A persistent vector index organized into named collections.
///
/// Each collection holds fact entries keyed by a stable ID. Adding an
/// entry with an existing ID replaces it, which makes inserts of
/// identical text idempotent.
#[async_trait]
pub trait VectorIndex: Send + Sync + 'static {
    /// Adds an entry to a collection, replacing any entry with the same ID.
    async fn add(&self, collection: &str, entry: IndexEntry) -> Result<(), MnemoError>;

    /// Returns up to `k` entries most similar to `query`, best first.
    ///
    /// An empty collection yields an empty result, never an error.
    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<SearchHit>, MnemoError>;

    /// Deletes an entry by ID. Returns `true` if an entry was removed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, MnemoError>;
}
