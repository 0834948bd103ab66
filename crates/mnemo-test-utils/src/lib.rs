// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Mnemo integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock LLM provider with pre-configured responses
//! - [`MockEmbedder`] - Deterministic embedding adapter with optional pinned vectors
//! - [`MockConfirm`] - Scripted confirmation prompt that records notices
//! - [`TestHarness`] - Full agent stack over a temp SQLite index

pub mod harness;
pub mod mock_confirm;
pub mod mock_embedder;
pub mod mock_provider;

pub use harness::TestHarness;
pub use mock_confirm::MockConfirm;
pub use mock_embedder::MockEmbedder;
pub use mock_provider::MockProvider;
