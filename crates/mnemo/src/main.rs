// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mnemo - a conversational agent with long-term memory.
//!
//! This is the binary entry point for the Mnemo agent.

mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use mnemo_config::MnemoConfig;
use mnemo_core::MnemoError;

/// Mnemo - a conversational agent with long-term memory.
#[derive(Parser, Debug)]
#[command(name = "mnemo", version, about, long_about = None)]
struct Cli {
    /// Path to a config file (bypasses the XDG hierarchy).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Memory owner; overrides `agent.user_id` from config.
    #[arg(long, global = true, value_name = "USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (the default).
    Chat,
    /// Manage Mnemo configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the resolved configuration as TOML.
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let loaded = match cli.config.as_deref() {
        Some(path) => mnemo_config::load_and_validate_path(path),
        None => mnemo_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            mnemo_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if let Some(user) = cli.user {
        config.agent.user_id = user;
    }

    init_tracing(&config.agent.log_level);

    let outcome = match cli.command {
        Some(Commands::Config {
            command: ConfigCommands::Show,
        }) => show_config(&config),
        Some(Commands::Chat) | None => chat::run_chat(config).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the configured level
/// applies to the mnemo target with `warn` for everything else.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mnemo={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Prints the resolved configuration as pretty TOML.
fn show_config(config: &MnemoConfig) -> Result<(), MnemoError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Renders the configuration as pretty TOML, with the API key replaced
/// by a placeholder when present.
fn render_config(config: &MnemoConfig) -> Result<String, MnemoError> {
    let mut shown = config.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("<redacted>".to_string());
    }

    toml::to_string_pretty(&shown)
        .map_err(|e| MnemoError::Internal(format!("failed to render config: {e}")))
}
