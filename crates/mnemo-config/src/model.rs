// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mnemo memory agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Mnemo configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MnemoConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI API settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Memory store settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// User whose memories this agent manages. Scopes the fact collection.
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            user_id: default_user_id(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "mnemo".to_string()
}

fn default_user_id() -> String {
    "default".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// OpenAI API key. `None` requires the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for intent classification, fact extraction, and answers.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used for text embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            embedding_model: default_embedding_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

/// Memory store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Path to the SQLite database file holding the fact index.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Cosine similarity at or above which a new fact is considered a
    /// duplicate of an existing one (0.0-1.0, exclusive-inclusive).
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Number of facts retrieved to answer a question.
    #[serde(default = "default_retrieval_k")]
    pub retrieval_k: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            similarity_threshold: default_similarity_threshold(),
            retrieval_k: default_retrieval_k(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("mnemo").join("mnemo.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("mnemo.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_similarity_threshold() -> f64 {
    0.9
}

fn default_retrieval_k() -> usize {
    3
}
