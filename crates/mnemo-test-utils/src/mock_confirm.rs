// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted confirmation prompt for testing deletion flows.
//!
//! Queued answers are returned to `ask` in FIFO order (empty string
//! once exhausted, which cancels a deletion); every notice and prompt
//! is recorded for assertions.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mnemo_core::{ConfirmPrompt, MnemoError};

/// A scripted [`ConfirmPrompt`] that records all interaction.
pub struct MockConfirm {
    answers: Mutex<VecDeque<String>>,
    notices: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockConfirm {
    /// Create a confirm prompt with no queued answers.
    pub fn new() -> Self {
        Self::with_answers(Vec::new())
    }

    /// Create a confirm prompt pre-loaded with `ask` answers.
    pub fn with_answers(answers: Vec<String>) -> Self {
        Self {
            answers: Mutex::new(VecDeque::from(answers)),
            notices: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue another answer for a future `ask`.
    pub async fn push_answer(&self, answer: String) {
        self.answers.lock().await.push_back(answer);
    }

    /// All notices shown so far, in order.
    pub async fn notices(&self) -> Vec<String> {
        self.notices.lock().await.clone()
    }

    /// All confirmation prompts asked so far, in order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

impl Default for MockConfirm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmPrompt for MockConfirm {
    async fn notify(&self, line: &str) -> Result<(), MnemoError> {
        self.notices.lock().await.push(line.to_string());
        Ok(())
    }

    async fn ask(&self, prompt: &str) -> Result<String, MnemoError> {
        self.prompts.lock().await.push(prompt.to_string());
        Ok(self.answers.lock().await.pop_front().unwrap_or_default())
    }
}
