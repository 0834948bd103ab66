// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mnemo memory agent.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Mnemo workspace. The LLM gateway, the
//! embedding gateway, and the vector index all implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MnemoError;
pub use types::{
    AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus, IndexEntry, Intent,
    ProviderMessage, ProviderRequest, ProviderResponse, SearchHit, TokenUsage,
};

// Re-export all adapter traits at crate root.
pub use traits::{ConfirmPrompt, EmbeddingAdapter, PluginAdapter, ProviderAdapter, VectorIndex};
