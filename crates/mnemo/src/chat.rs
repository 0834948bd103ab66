// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mnemo chat` command implementation.
//!
//! Launches the interactive memory REPL with colored prompt and readline
//! history. Every turn is classified into a memory intent and dispatched
//! through the memory pipeline; per-fact notices and deletion
//! confirmations print inline as agent output.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;
use mnemo_agent::AgentSession;
use mnemo_config::MnemoConfig;
use mnemo_core::{ConfirmPrompt, MnemoError};
use mnemo_memory::{
    FactExtractor, IntentClassifier, MemoryManager, MemorySettings, SqliteIndex, collection_name,
};
use mnemo_openai::{OpenAiEmbedder, OpenAiProvider};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

/// Prompt surface for the REPL: notices print as agent output, deletion
/// confirmations block on a plain stdin line.
struct StdioConfirm;

#[async_trait]
impl ConfirmPrompt for StdioConfirm {
    async fn notify(&self, line: &str) -> Result<(), MnemoError> {
        println!("{} {line}", "Agent:".bold().cyan());
        Ok(())
    }

    async fn ask(&self, prompt: &str) -> Result<String, MnemoError> {
        println!("{} {prompt}", "Agent:".bold().cyan());
        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .map_err(|e| MnemoError::Internal(format!("failed to read confirmation: {e}")))?;
        Ok(answer)
    }
}

/// Runs the `mnemo chat` interactive REPL.
///
/// Builds the OpenAI gateways and the SQLite-backed memory pipeline for
/// the configured user, then reads turns until `exit`, Ctrl+C, or Ctrl+D.
pub async fn run_chat(config: MnemoConfig) -> Result<(), MnemoError> {
    // Initialize OpenAI gateways. A missing API key is fatal here.
    let provider = Arc::new(OpenAiProvider::new(&config).inspect_err(|_| {
        eprintln!(
            "error: OpenAI API key required. Set provider.api_key in config or the OPENAI_API_KEY environment variable."
        );
    })?);
    let embedder = Arc::new(OpenAiEmbedder::new(&config)?);

    // Open the fact index.
    let index = Arc::new(SqliteIndex::open(Path::new(&config.memory.database_path)).await?);
    info!(path = %config.memory.database_path, "fact index ready");

    let classifier = IntentClassifier::new(
        provider.clone(),
        config.provider.model.clone(),
        config.provider.max_tokens,
    );
    let extractor = FactExtractor::new(
        provider.clone(),
        config.provider.model.clone(),
        config.provider.max_tokens,
    );
    let manager = MemoryManager::new(
        provider,
        embedder,
        index,
        Arc::new(StdioConfirm),
        MemorySettings {
            model: config.provider.model.clone(),
            max_tokens: config.provider.max_tokens,
            collection: collection_name(&config.agent.user_id),
            similarity_threshold: config.memory.similarity_threshold as f32,
            retrieval_k: config.memory.retrieval_k,
        },
    );
    let mut session = AgentSession::new(classifier, extractor, manager);

    // Set up readline editor.
    let mut rl = DefaultEditor::new()
        .map_err(|e| MnemoError::Internal(format!("failed to initialize readline: {e}")))?;

    // Print welcome message.
    println!(
        "{} {}",
        "Conversational Memory Agent".bold().green(),
        "(type 'exit' to quit)".dimmed()
    );

    // REPL loop.
    let prompt = format!("{} ", "You:".bold().blue());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.eq_ignore_ascii_case("exit") {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match session.handle_turn(trimmed).await {
                    Ok(reply) => {
                        println!("{} {reply}", "Agent:".bold().cyan());
                    }
                    Err(e) => {
                        eprintln!("{}: {e}", "error".red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
