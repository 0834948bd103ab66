// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term memory pipeline for the Mnemo agent.
//!
//! Classifies user turns into memory intents, extracts atomic facts via
//! the LLM, deduplicates them by embedding similarity on insert, and
//! serves top-k retrieval with answer synthesis.
//!
//! ## Architecture
//!
//! - **IntentClassifier**: maps (message, history) to a memory intent
//! - **FactExtractor**: maps a message to atomic fact strings
//! - **SqliteIndex**: persistent vector index with cosine ranking
//! - **MemoryManager**: insert / delete / retrieve over the index
//! - **fact**: identity hashing, BLOB codecs, similarity scoring

pub mod classifier;
pub mod extractor;
pub mod fact;
pub mod index;
pub mod manager;

pub use classifier::IntentClassifier;
pub use extractor::FactExtractor;
pub use fact::*;
pub use index::SqliteIndex;
pub use manager::{MemoryManager, MemorySettings, NO_MEMORIES_REPLY, collection_name};
