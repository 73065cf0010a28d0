//! Parley command-line host
//!
//! ```bash
//! parley chat "What is on the front page?"   # one turn, then exit
//! parley chat --history site.json            # interactive, conversation kept on disk
//! ```
//!
//! Set `RUST_LOG=parley_core=debug` for request-level logging.

mod args;
mod builtin_tools;
mod commands;
mod console;
mod history;

use anyhow::Result;
use args::{ChatArgs, Cli, Commands};
use clap::Parser;
use parley_core::ParleyConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat(args) => {
            let config_path = args.config_path();
            let config = parley_core::load_config(&config_path)?;

            // RUST_LOG wins over the configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(fallback_level(&args, &config))),
                )
                .with_writer(std::io::stderr)
                .init();
            tracing::debug!(
                path = %config_path.display(),
                file_found = config_path.exists(),
                provider = %config.default_provider,
                "configuration loaded"
            );

            commands::chat::run(args, config).await
        }
    }
}

fn fallback_level<'a>(args: &ChatArgs, config: &'a ParleyConfig) -> &'a str {
    if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    }
}
