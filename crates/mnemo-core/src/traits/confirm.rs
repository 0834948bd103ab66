// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive prompt seam for destructive memory operations.

use async_trait::async_trait;

use crate::error::MnemoError;

/// User-facing prompt surface for per-fact notices and confirmations.
///
/// The memory manager emits notices (skipped duplicates, deletion results)
/// and asks for confirmation through this trait so the chat shell and the
/// test harness can supply their own front ends. Answer interpretation is
/// the caller's job; implementations return the raw reply.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Prints a single notice line to the user.
    async fn notify(&self, line: &str) -> Result<(), MnemoError>;

    /// Asks the user a question and returns the raw, untrimmed reply.
    async fn ask(&self, prompt: &str) -> Result<String, MnemoError>;
}
