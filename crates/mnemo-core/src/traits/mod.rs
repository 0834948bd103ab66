// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Mnemo plugin architecture.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod confirm;
pub mod embedding;
pub mod index;
pub mod provider;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use confirm::ConfirmPrompt;
pub use embedding::EmbeddingAdapter;
pub use index::VectorIndex;
pub use provider::ProviderAdapter;
