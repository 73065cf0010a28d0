//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Chat with a tool-using assistant over OpenAI, Anthropic or Gemini")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one message, or start an interactive session when none is given
    Chat(ChatArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    /// Message to send (omit for an interactive prompt)
    pub message: Option<String>,

    /// Path to configuration file [default: <config dir>/parley/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Provider to use instead of the configured default
    #[arg(long)]
    pub provider: Option<String>,

    /// Model to use instead of the configured one
    #[arg(long)]
    pub model: Option<String>,

    /// Load the conversation from this JSON file and save it back after each turn
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Approve every tool call without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

impl ChatArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parley")
        .join("config.toml")
}
