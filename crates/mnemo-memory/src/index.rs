// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed vector index with in-process cosine ranking.
//!
//! Embeddings are stored as little-endian f32 BLOBs. Nearest-neighbor
//! search is a full scan over one collection; collections hold one
//! user's facts and stay small, so no ANN structure is needed.

use std::path::Path;

use async_trait::async_trait;
use mnemo_core::{IndexEntry, MnemoError, SearchHit, VectorIndex};
use tokio_rusqlite::Connection;

use crate::fact::{blob_to_vec, cosine_similarity, vec_to_blob};

/// Helper to convert tokio_rusqlite errors into MnemoError::Storage.
fn storage_err(e: tokio_rusqlite::Error) -> MnemoError {
    MnemoError::Storage {
        source: Box::new(e),
    }
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS memories (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    text TEXT NOT NULL,
    embedding BLOB NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    UNIQUE (collection, id)
);
CREATE INDEX IF NOT EXISTS idx_memories_collection ON memories(collection);";

/// Persistent vector index over SQLite.
pub struct SqliteIndex {
    conn: Connection,
}

impl SqliteIndex {
    /// Open (or create) the index database at the given path.
    ///
    /// Parent directories are created if missing; the schema is applied
    /// idempotently on every open.
    pub async fn open(path: &Path) -> Result<Self, MnemoError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| MnemoError::Storage {
                source: Box::new(e),
            })?;
        }
        let conn = Connection::open(path)
            .await
            .map_err(|e| storage_err(e.into()))?;
        Self::with_connection(conn).await
    }

    /// Open an ephemeral in-memory index.
    pub async fn open_in_memory() -> Result<Self, MnemoError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| storage_err(e.into()))?;
        Self::with_connection(conn).await
    }

    async fn with_connection(conn: Connection) -> Result<Self, MnemoError> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl VectorIndex for SqliteIndex {
    async fn add(&self, collection: &str, entry: IndexEntry) -> Result<(), MnemoError> {
        let collection = collection.to_string();
        let embedding_blob = vec_to_blob(&entry.embedding);
        let id = entry.id;
        let text = entry.text;

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO memories (collection, id, text, embedding) VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![collection, id, text, embedding_blob],
                )?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<SearchHit>, MnemoError> {
        let collection = collection.to_string();
        let query = query.to_vec();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, text, embedding FROM memories WHERE collection = ?1",
                )?;
                let rows = stmt
                    .query_map(rusqlite::params![collection], |row| {
                        let id: String = row.get(0)?;
                        let text: String = row.get(1)?;
                        let blob: Vec<u8> = row.get(2)?;
                        Ok((id, text, blob_to_vec(&blob)))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                let mut hits: Vec<SearchHit> = rows
                    .into_iter()
                    .filter(|(_, _, emb)| emb.len() == query.len())
                    .map(|(id, text, emb)| {
                        let similarity = cosine_similarity(&query, &emb);
                        SearchHit {
                            id,
                            text,
                            similarity,
                        }
                    })
                    .collect();

                hits.sort_by(|a, b| {
                    b.similarity
                        .partial_cmp(&a.similarity)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                hits.truncate(k);
                Ok(hits)
            })
            .await
            .map_err(storage_err)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, MnemoError> {
        let collection = collection.to_string();
        let id = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn.execute(
                    "DELETE FROM memories WHERE collection = ?1 AND id = ?2",
                    rusqlite::params![collection, id],
                )?;
                Ok(rows > 0)
            })
            .await
            .map_err(storage_err)
    }
}
